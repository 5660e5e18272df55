// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants and the runtime model configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fxp::qformat::QFormat;
use crate::sgd::Hyperparams;

/// Default storage width in bits.
pub const DEFAULT_WIDTH: u32 = 32;

/// Number of fractional bits for Fixed-Point representation (Q16.16).
pub const FRAC_BITS: u32 = 16;

/// Scaling factor for Fixed-Point representation (1 << FRAC_BITS).
pub const SCALE: i32 = 1 << FRAC_BITS;

/// Default feature count for callers that do not pick one.
pub const DEFAULT_FEATURES: usize = 8;

/// Consecutive saturated computations before the model state warns.
pub const DEFAULT_SATURATION_STREAK: u32 = 16;

/// Runtime configuration of a model.
///
/// Hyperparameters are given as real numbers and encoded with the model's
/// Q-format. A `decay` that encodes to zero disables decay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub width: u32,
    pub frac_bits: u32,
    pub learning_rate: f64,
    pub decay: f64,
    pub saturation_warn_streak: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            frac_bits: FRAC_BITS,
            learning_rate: 0.02,
            decay: 0.0,
            saturation_warn_streak: DEFAULT_SATURATION_STREAK,
        }
    }
}

impl ModelConfig {
    /// Validates the width/fraction pair.
    pub fn format(&self) -> Result<QFormat> {
        QFormat::new(self.width, self.frac_bits)
    }

    /// Encodes learning rate and decay in the configured format.
    pub fn hyperparams(&self) -> Result<Hyperparams> {
        let fmt = self.format()?;
        Ok(Hyperparams {
            eta: fmt.encode(self.learning_rate),
            lambda: fmt.encode(self.decay),
        })
    }
}
