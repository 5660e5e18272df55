// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Q-format description: storage width and fractional bits.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_WIDTH, FRAC_BITS};
use crate::error::{KernelError, Result};
use crate::types::sat::Sat;
use crate::types::scalar::FxpScalar;

/// A signed `width`-bit word scaled by `2^-frac_bits`.
///
/// Words are stored in an `i32`, so `width` is at most 32. Narrower formats
/// keep every stored value inside `[min_raw, max_raw]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QFormat {
    width: u32,
    frac_bits: u32,
}

impl Default for QFormat {
    fn default() -> Self {
        Self::Q16_16
    }
}

impl fmt::Display for QFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}.{}", self.width - self.frac_bits, self.frac_bits)
    }
}

impl QFormat {
    pub const Q16_16: QFormat = QFormat {
        width: DEFAULT_WIDTH,
        frac_bits: FRAC_BITS,
    };

    pub fn new(width: u32, frac_bits: u32) -> Result<Self> {
        if !(2..=32).contains(&width) || frac_bits == 0 || frac_bits >= width {
            return Err(KernelError::InvalidFormat { width, frac_bits });
        }
        Ok(Self { width, frac_bits })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    pub fn min_raw(&self) -> i64 {
        -(1i64 << (self.width - 1))
    }

    pub fn max_raw(&self) -> i64 {
        (1i64 << (self.width - 1)) - 1
    }

    pub fn min_value(&self) -> FxpScalar {
        FxpScalar(self.min_raw() as i32)
    }

    pub fn max_value(&self) -> FxpScalar {
        FxpScalar(self.max_raw() as i32)
    }

    /// Clips a wide intermediate into the storage range.
    pub fn clip(&self, wide: i64) -> Sat<FxpScalar> {
        if wide > self.max_raw() {
            Sat::new(self.max_value(), true)
        } else if wide < self.min_raw() {
            Sat::new(self.min_value(), true)
        } else {
            Sat::exact(FxpScalar(wide as i32))
        }
    }

    /// The encoding of exactly 1.0, `1 << frac_bits`.
    ///
    /// Only saturates when `frac_bits == width - 1`.
    pub fn one(&self) -> Sat<FxpScalar> {
        self.clip(1i64 << self.frac_bits)
    }

    /// Encodes a real number: truncate `r * 2^frac_bits` toward zero, reduce
    /// modulo `2^width`, reinterpret as signed.
    ///
    /// Values whose scaled magnitude exceeds the `i64` range are pinned to
    /// the `i64` bounds before reduction. NaN encodes to zero.
    pub fn encode(&self, r: f64) -> FxpScalar {
        let scaled = (r * (1u64 << self.frac_bits) as f64).trunc() as i64;
        let shift = 64 - self.width;
        FxpScalar(((scaled << shift) >> shift) as i32)
    }

    /// Decodes a word to the real number it represents.
    pub fn decode(&self, v: FxpScalar) -> f64 {
        v.0 as f64 / (1u64 << self.frac_bits) as f64
    }

    /// Weight of one least-significant bit.
    pub fn resolution(&self) -> f64 {
        1.0 / (1u64 << self.frac_bits) as f64
    }
}
