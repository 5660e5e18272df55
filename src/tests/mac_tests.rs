// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::fxp::ops::{from_f64, to_f64};
use crate::fxp::qformat::QFormat;
use crate::mac::{MacOutput, MacPipeline};
use crate::synth::Pcg32;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;

fn vec_of<const N: usize>(values: [f64; N]) -> FxpVector<N> {
    FxpVector {
        data: values.map(from_f64),
    }
}

#[test]
fn test_one_step_latency() {
    let mut mac = MacPipeline::<2>::new(QFormat::Q16_16);
    let x = vec_of([1.0, 2.0]);
    let w = vec_of([0.5, 0.25]);
    let b = from_f64(1.0);

    // Step t: nothing registered yet.
    let at_t = mac.step(&x, &w, b, true);
    assert!(!at_t.valid);

    // Step t + 1: the sample from step t.
    let at_t1 = mac.idle();
    assert_eq!(
        at_t1,
        MacOutput {
            prediction: from_f64(2.0),
            valid: true,
            saturated: false,
        }
    );

    // Step t + 2: nothing was accepted at t + 1.
    let at_t2 = mac.idle();
    assert!(!at_t2.valid);
    assert_eq!(at_t2.prediction, from_f64(2.0), "register holds its last value");
}

#[test]
fn test_rejected_sample_only_drops_valid() {
    let mut mac = MacPipeline::<1>::new(QFormat::Q16_16);
    mac.step(&vec_of([3.0]), &vec_of([2.0]), FxpScalar::ZERO, true);

    let observed = mac.step(&vec_of([100.0]), &vec_of([100.0]), FxpScalar::ZERO, false);
    assert!(observed.valid);
    assert_eq!(observed.prediction, from_f64(6.0));

    let held = mac.output();
    assert!(!held.valid);
    assert_eq!(held.prediction, from_f64(6.0));
    assert!(!held.saturated);
}

#[test]
fn test_back_to_back_samples_stream() {
    let mut mac = MacPipeline::<1>::new(QFormat::Q16_16);
    let w = vec_of([2.0]);

    mac.step(&vec_of([1.0]), &w, FxpScalar::ZERO, true);
    let first = mac.step(&vec_of([2.0]), &w, FxpScalar::ZERO, true);
    assert_eq!(first.prediction, from_f64(2.0));
    assert!(first.valid);

    // A third sample overwrites the second before anyone reads it.
    mac.step(&vec_of([3.0]), &w, FxpScalar::ZERO, true);
    assert_eq!(mac.output().prediction, from_f64(6.0));
}

#[test]
fn test_saturation_reaches_output() {
    let mut mac = MacPipeline::<2>::new(QFormat::Q16_16);
    let x = vec_of([32000.0, 32000.0]);
    let w = vec_of([1000.0, 1000.0]);

    let at_t = mac.step(&x, &w, FxpScalar::ZERO, true);
    assert!(!at_t.saturated);

    let at_t1 = mac.idle();
    assert!(at_t1.valid);
    assert!(at_t1.saturated);
    assert_eq!(at_t1.prediction, FxpScalar::MAX);
}

#[test]
fn test_matches_ascending_reference_fold() {
    const N: usize = 8;
    let fmt = QFormat::Q16_16;
    let mut rng = Pcg32::new(11);
    let mut mac = MacPipeline::<N>::new(fmt);

    for _ in 0..50 {
        let xr: [f64; N] = core::array::from_fn(|_| rng.next_symmetric(2.0));
        let wr: [f64; N] = core::array::from_fn(|_| rng.next_symmetric(2.0));
        let br = rng.next_symmetric(2.0);
        let (x, w, b) = (vec_of(xr), vec_of(wr), from_f64(br));

        mac.step(&x, &w, b, true);
        let out = mac.idle();

        let mut acc = fmt.mul(x[0], w[0]).value;
        for i in 1..N {
            acc = fmt.add(acc, fmt.mul(x[i], w[i]).value).value;
        }
        let expected = fmt.add(acc, b).value;
        assert_eq!(out.prediction, expected);
        assert!(!out.saturated);

        // Within the rounding of the encoded inputs plus one LSB per product.
        let exact: f64 = (0..N).map(|i| to_f64(x[i]) * to_f64(w[i])).sum::<f64>() + to_f64(b);
        assert!((to_f64(out.prediction) - exact).abs() <= N as f64 * fmt.resolution());
    }
}

#[test]
fn test_reset() {
    let mut mac = MacPipeline::<1>::new(QFormat::Q16_16);
    mac.step(&vec_of([1.0]), &vec_of([1.0]), FxpScalar::ZERO, true);
    mac.reset();
    assert_eq!(mac.output(), MacOutput::default());
}
