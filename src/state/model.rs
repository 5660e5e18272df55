// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Model State definition.
//!
//! The model state is the caller the core expects: it owns weights, bias and
//! hyperparameters, drives the MAC pipeline one clock at a time, and latches
//! the update engine's output as the next weights.

use tracing::{debug, trace, warn};

use crate::config::{ModelConfig, DEFAULT_SATURATION_STREAK};
use crate::error::Result;
use crate::fxp::qformat::QFormat;
use crate::mac::{MacOutput, MacPipeline};
use crate::sgd::{sgd_update, Hyperparams};
use crate::state::command::Command;
use crate::types::id::{ClockStep, Version};
use crate::types::sat::Sat;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;

/// Saturation bookkeeping across computations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SaturationStats {
    /// MAC results latched with the flag set.
    pub mac: u64,
    /// Update computations with the flag set.
    pub update: u64,
    /// Consecutive saturated computations, MAC or update.
    pub streak: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Predicted(Sat<FxpScalar>),
    Trained {
        prediction: Sat<FxpScalar>,
        update_saturated: bool,
    },
    Loaded,
}

impl Outcome {
    pub fn prediction(&self) -> Option<Sat<FxpScalar>> {
        match self {
            Outcome::Predicted(p) => Some(*p),
            Outcome::Trained { prediction, .. } => Some(*prediction),
            Outcome::Loaded => None,
        }
    }

    /// True if any computation behind this outcome clipped.
    pub fn saturated(&self) -> bool {
        match self {
            Outcome::Predicted(p) => p.saturated,
            Outcome::Trained {
                prediction,
                update_saturated,
            } => prediction.saturated || *update_saturated,
            Outcome::Loaded => false,
        }
    }
}

pub struct ModelState<const N: usize> {
    pub(crate) fmt: QFormat,
    pub(crate) version: Version,
    pub(crate) clock: ClockStep,
    pub(crate) weights: FxpVector<N>,
    pub(crate) bias: FxpScalar,
    pub(crate) hyper: Hyperparams,
    pub(crate) pipeline: MacPipeline<N>,
    pub(crate) stats: SaturationStats,
    pub(crate) warn_streak: u32,
}

impl<const N: usize> ModelState<N> {
    /// Zero weights and bias.
    pub fn new(fmt: QFormat, hyper: Hyperparams) -> Self {
        Self {
            fmt,
            version: Version(0),
            clock: ClockStep(0),
            weights: FxpVector::new_zeros(),
            bias: FxpScalar::ZERO,
            hyper,
            pipeline: MacPipeline::new(fmt),
            stats: SaturationStats::default(),
            warn_streak: DEFAULT_SATURATION_STREAK,
        }
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        Ok(Self::new(config.format()?, config.hyperparams()?)
            .with_warn_streak(config.saturation_warn_streak))
    }

    /// Consecutive saturated computations before a warning; 0 disables it.
    pub fn with_warn_streak(mut self, streak: u32) -> Self {
        self.warn_streak = streak;
        self
    }

    /// Seeds weights and bias, e.g. from a snapshot.
    pub fn with_weights(mut self, weights: FxpVector<N>, bias: FxpScalar) -> Self {
        self.weights = weights;
        self.bias = bias;
        self
    }

    // --- Read APIs ---

    pub fn format(&self) -> QFormat {
        self.fmt
    }

    pub fn version(&self) -> u64 {
        self.version.0
    }

    pub fn clock(&self) -> u64 {
        self.clock.0
    }

    pub fn weights(&self) -> &FxpVector<N> {
        &self.weights
    }

    pub fn bias(&self) -> FxpScalar {
        self.bias
    }

    pub fn hyperparams(&self) -> Hyperparams {
        self.hyper
    }

    pub fn warn_streak(&self) -> u32 {
        self.warn_streak
    }

    pub fn stats(&self) -> SaturationStats {
        self.stats
    }

    // --- Write Logic ---

    pub fn apply(&mut self, cmd: &Command<N>) -> Outcome {
        let outcome = match cmd {
            Command::Train { x, y_true } => {
                let out = self.predict(x);
                let prediction = Sat::new(out.prediction, out.saturated);

                // The update sees the same (x, w, b) the MAC was fed.
                let update = sgd_update(
                    &self.fmt,
                    x,
                    &self.weights,
                    self.bias,
                    *y_true,
                    out.prediction,
                    &self.hyper,
                );
                self.weights = update.weights;
                self.bias = update.bias;
                self.record(update.saturated, false);

                trace!(
                    version = self.version.0,
                    y_hat = out.prediction.0,
                    y_true = y_true.0,
                    bias = self.bias.0,
                    "trained sample"
                );

                Outcome::Trained {
                    prediction,
                    update_saturated: update.saturated,
                }
            }
            Command::Infer { x } => {
                let out = self.predict(x);
                Outcome::Predicted(Sat::new(out.prediction, out.saturated))
            }
            Command::LoadWeights { weights, bias } => {
                self.weights = *weights;
                self.bias = *bias;
                Outcome::Loaded
            }
            Command::SetHyperparams(hp) => {
                self.hyper = *hp;
                Outcome::Loaded
            }
        };

        self.version = self.version.next();
        outcome
    }

    /// Clock 1 accepts the sample, clock 2 observes the registered result.
    fn predict(&mut self, x: &FxpVector<N>) -> MacOutput {
        self.pipeline.step(x, &self.weights, self.bias, true);
        self.clock = self.clock.next();
        let out = self.pipeline.idle();
        self.clock = self.clock.next();

        debug_assert!(out.valid, "registered output must be valid one step after acceptance");
        self.record(out.saturated, true);
        out
    }

    fn record(&mut self, saturated: bool, from_mac: bool) {
        if !saturated {
            self.stats.streak = 0;
            return;
        }

        if from_mac {
            self.stats.mac += 1;
        } else {
            self.stats.update += 1;
        }
        self.stats.streak = self.stats.streak.saturating_add(1);

        debug!(
            version = self.version.0,
            stage = if from_mac { "mac" } else { "update" },
            streak = self.stats.streak,
            "saturated computation"
        );
        if self.warn_streak > 0 && self.stats.streak == self.warn_streak {
            warn!(
                streak = self.stats.streak,
                eta = self.hyper.eta.0,
                "repeated saturation; consider a smaller learning rate or a wider Q-format"
            );
        }
    }
}
