//! Fixed-point dot product plus bias.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::fxp::qformat::QFormat;
use crate::types::sat::Sat;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;

/// Computes `sum_i(x_i * w_i) + bias` through the saturating ALU.
///
/// Each product is rounded and clipped on its own. The fold is strictly
/// left-to-right in ascending feature index (`acc_0 = prod_0`,
/// `acc_i = acc_{i-1} + prod_i`), since clipping makes the sum
/// non-associative. The flag is the OR over every multiply and add.
///
/// With `N == 0` the fold is empty and the result is the bias.
pub fn fxp_dot_bias<const N: usize>(
    fmt: &QFormat,
    x: &FxpVector<N>,
    w: &FxpVector<N>,
    bias: FxpScalar,
) -> Sat<FxpScalar> {
    let mut saturated = false;

    let products: [FxpScalar; N] =
        core::array::from_fn(|i| fmt.mul(x.data[i], w.data[i]).take(&mut saturated));

    let mut terms = products.into_iter();
    let mut acc = match terms.next() {
        Some(first) => first,
        None => return fmt.add(FxpScalar::ZERO, bias),
    };
    for term in terms {
        acc = fmt.add(acc, term).take(&mut saturated);
    }

    let raw = fmt.add(acc, bias).take(&mut saturated);
    Sat::new(raw, saturated)
}

