// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Deterministic synthetic data for demos and tests.

use crate::fxp::qformat::QFormat;
use crate::state::command::Command;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;

/// Largest sampling half-width: `2 * steps + 1` grid points must fit a `u32` draw.
pub const MAX_RANGE: f64 = (u32::MAX / 2000) as f64;

/// PCG-XSH-RR 32-bit generator. Same seed, same stream, on every platform.
#[derive(Clone, Debug)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (seed << 1) | 1,
        };
        rng.next_u32();
        rng.state = rng.state.wrapping_add(seed);
        rng.next_u32();
        rng
    }

    pub fn next_u32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate
            .wrapping_mul(6364136223846793005)
            .wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform in `[-range, range]` on a grid of 1/1000.
    ///
    /// `range` is clamped to `MAX_RANGE`; NaN and non-positive ranges draw zero.
    pub fn next_symmetric(&mut self, range: f64) -> f64 {
        if range.is_nan() || range <= 0.0 {
            return 0.0;
        }
        let steps = (range.min(MAX_RANGE) * 1000.0).round() as u64;
        if steps == 0 {
            return 0.0;
        }
        let k = u64::from(self.next_u32()) % (2 * steps + 1);
        (k as f64 - steps as f64) / 1000.0
    }
}

/// Noiseless target `y = sum_i(slope_i * x_i) + intercept`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearTarget<const N: usize> {
    pub slopes: [f64; N],
    pub intercept: f64,
    /// Features are drawn from `[-range, range]`.
    pub range: f64,
}

impl<const N: usize> LinearTarget<N> {
    pub fn new(slopes: [f64; N], intercept: f64, range: f64) -> Self {
        Self {
            slopes,
            intercept,
            range,
        }
    }

    pub fn eval(&self, x: &[f64; N]) -> f64 {
        self.slopes
            .iter()
            .zip(x)
            .fold(self.intercept, |acc, (s, xi)| acc + s * xi)
    }

    /// Draws one sample, encoded in `fmt`.
    pub fn sample(&self, fmt: &QFormat, rng: &mut Pcg32) -> (FxpVector<N>, FxpScalar) {
        let x: [f64; N] = core::array::from_fn(|_| rng.next_symmetric(self.range));
        let encoded = FxpVector {
            data: x.map(|xi| fmt.encode(xi)),
        };
        (encoded, fmt.encode(self.eval(&x)))
    }

    /// `count` training commands.
    pub fn train_commands(&self, fmt: &QFormat, rng: &mut Pcg32, count: usize) -> Vec<Command<N>> {
        (0..count)
            .map(|_| {
                let (x, y_true) = self.sample(fmt, rng);
                Command::Train { x, y_true }
            })
            .collect()
    }
}
