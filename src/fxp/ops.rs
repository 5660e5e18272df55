//! Fixed-point operations.
//!
//! Every operation is pure and total: it always yields a word inside the
//! format's range plus a flag telling whether it had to clip. Wraparound
//! never happens.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::fxp::qformat::QFormat;
use crate::types::sat::Sat;
use crate::types::scalar::FxpScalar;

impl QFormat {
    /// Saturating addition. The sum is formed in 64 bits, then clipped.
    pub fn add(&self, a: FxpScalar, b: FxpScalar) -> Sat<FxpScalar> {
        self.clip(a.0 as i64 + b.0 as i64)
    }

    /// Saturating multiplication with round-half-up.
    ///
    /// The exact double-width product gets `2^(frac_bits - 1)` added
    /// regardless of sign before the arithmetic right shift, so negative
    /// halves round toward positive infinity too. Only the final clip is
    /// reported.
    pub fn mul(&self, a: FxpScalar, b: FxpScalar) -> Sat<FxpScalar> {
        let product = (a.0 as i64) * (b.0 as i64);
        let rounded = product + (1i64 << (self.frac_bits() - 1));
        self.clip(rounded >> self.frac_bits())
    }

    /// Exact negation; only the most negative word clips.
    pub fn neg(&self, a: FxpScalar) -> Sat<FxpScalar> {
        self.clip(-(a.0 as i64))
    }
}

/// Q16.16 saturating addition.
pub fn fxp_add(a: FxpScalar, b: FxpScalar) -> Sat<FxpScalar> {
    QFormat::Q16_16.add(a, b)
}

/// Q16.16 saturating multiplication.
pub fn fxp_mul(a: FxpScalar, b: FxpScalar) -> Sat<FxpScalar> {
    QFormat::Q16_16.mul(a, b)
}

/// Q16.16 saturating negation.
pub fn fxp_neg(a: FxpScalar) -> Sat<FxpScalar> {
    QFormat::Q16_16.neg(a)
}

/// Helper to convert f64 to a Q16.16 word.
pub fn from_f64(f: f64) -> FxpScalar {
    QFormat::Q16_16.encode(f)
}

/// Helper to convert a Q16.16 word to f64.
pub fn to_f64(s: FxpScalar) -> f64 {
    QFormat::Q16_16.decode(s)
}
