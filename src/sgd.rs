// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! SGD/LMS update engine.
//!
//! A pure function of its inputs: it never mutates caller storage and keeps
//! no state between calls. The caller latches the returned weights and bias
//! as the current model before the next step.

use serde::{Deserialize, Serialize};

use crate::fxp::qformat::QFormat;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;

/// Learning rate and decay, both as raw words in the model's format.
///
/// `lambda` equal to the zero word disables decay. This is an exact
/// sentinel: any non-zero word, however small, selects the decayed path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hyperparams {
    pub eta: FxpScalar,
    pub lambda: FxpScalar,
}

impl Hyperparams {
    pub fn new(eta: FxpScalar, lambda: FxpScalar) -> Self {
        Self { eta, lambda }
    }

    pub fn decay_enabled(&self) -> bool {
        !self.lambda.is_zero()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SgdOutput<const N: usize> {
    pub weights: FxpVector<N>,
    pub bias: FxpScalar,
    pub saturated: bool,
}

/// Computes the next weights and bias from one prediction error.
///
/// ```text
/// e     = y_true + (-y_hat)
/// g     = eta * e
/// b_out = b_in + g
/// w_out = base_i + g * x_i,  base_i = (1 - lambda) * w_in_i  if lambda != 0
///                                   = w_in_i                 otherwise
/// ```
///
/// The decayed term is computed for every feature whether or not decay is
/// enabled, so the work done never depends on the data. The flag is the OR
/// of every operation's flag, across all features.
pub fn sgd_update<const N: usize>(
    fmt: &QFormat,
    x: &FxpVector<N>,
    w_in: &FxpVector<N>,
    b_in: FxpScalar,
    y_true: FxpScalar,
    y_hat: FxpScalar,
    hp: &Hyperparams,
) -> SgdOutput<N> {
    let mut saturated = false;

    let neg_y_hat = fmt.neg(y_hat).take(&mut saturated);
    let e = fmt.add(y_true, neg_y_hat).take(&mut saturated);
    let g = fmt.mul(hp.eta, e).take(&mut saturated);
    let bias = fmt.add(b_in, g).take(&mut saturated);

    let use_decay = hp.decay_enabled();
    let one = fmt.one().take(&mut saturated);
    let neg_lambda = fmt.neg(hp.lambda).take(&mut saturated);
    let one_minus_lambda = fmt.add(one, neg_lambda).take(&mut saturated);

    let mut weights = FxpVector::<N>::new_zeros();
    for i in 0..N {
        let grad = fmt.mul(g, x.data[i]).take(&mut saturated);
        let decayed = fmt.mul(one_minus_lambda, w_in.data[i]).take(&mut saturated);
        let base = if use_decay { decayed } else { w_in.data[i] };
        weights.data[i] = fmt.add(base, grad).take(&mut saturated);
    }

    SgdOutput {
        weights,
        bias,
        saturated,
    }
}
