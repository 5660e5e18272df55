// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Registered multiply-accumulate pipeline.
//!
//! The datapath itself is [`fxp_dot_bias`]; this module adds the one-step
//! output register. A sample accepted on step `t` becomes observable on step
//! `t + 1`.
//!
//! There is no backpressure. Accepting a new sample before the previous
//! result was read overwrites the register, and the earlier result is lost.

use crate::fxp::qformat::QFormat;
use crate::math::dot::fxp_dot_bias;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;

/// Contents of the output register.
///
/// `prediction` and `saturated` are only meaningful while `valid` is set;
/// otherwise they hold whatever was last latched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MacOutput {
    pub prediction: FxpScalar,
    pub valid: bool,
    pub saturated: bool,
}

#[derive(Clone, Debug)]
pub struct MacPipeline<const N: usize> {
    fmt: QFormat,
    latched: MacOutput,
}

impl<const N: usize> MacPipeline<N> {
    pub fn new(fmt: QFormat) -> Self {
        Self {
            fmt,
            latched: MacOutput::default(),
        }
    }

    pub fn format(&self) -> QFormat {
        self.fmt
    }

    /// Advances one step.
    ///
    /// Returns the register as observed during this step, i.e. the result
    /// of the sample accepted on the previous step, then clocks the register:
    /// an accepted sample latches `(prediction, valid = true, saturated)`,
    /// a rejected one only drops `valid`.
    pub fn step(
        &mut self,
        x: &FxpVector<N>,
        w: &FxpVector<N>,
        bias: FxpScalar,
        accepted: bool,
    ) -> MacOutput {
        let observed = self.latched;
        if accepted {
            let raw = fxp_dot_bias(&self.fmt, x, w, bias);
            self.latched = MacOutput {
                prediction: raw.value,
                valid: true,
                saturated: raw.saturated,
            };
        } else {
            self.latched.valid = false;
        }
        observed
    }

    /// Advances one step without presenting a sample.
    pub fn idle(&mut self) -> MacOutput {
        let observed = self.latched;
        self.latched.valid = false;
        observed
    }

    /// What the next step will observe.
    pub fn output(&self) -> MacOutput {
        self.latched
    }

    /// Clears the register to its power-on state.
    pub fn reset(&mut self) {
        self.latched = MacOutput::default();
    }
}
