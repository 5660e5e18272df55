// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Packed vector transport.
//!
//! A vector travels as one wide little-endian bit bus: word `i` occupies
//! bits `[i * width, (i + 1) * width)`, so index 0 sits in the
//! least-significant position. Only the serialization boundary uses this
//! layout; everything inside the core works on [`FxpVector`].

use crate::error::{KernelError, Result};
use crate::fxp::qformat::QFormat;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;

/// Bytes needed to carry `n` words of `fmt`.
pub fn packed_len(fmt: &QFormat, n: usize) -> usize {
    (n * fmt.width() as usize).div_ceil(8)
}

pub fn pack<const N: usize>(fmt: &QFormat, v: &FxpVector<N>) -> Vec<u8> {
    let width = fmt.width() as usize;
    let mask = (1u64 << width) - 1;
    let mut bus = vec![0u8; packed_len(fmt, N)];

    for (i, word) in v.iter().enumerate() {
        let bits = (word.0 as u32 as u64) & mask;
        let offset = i * width;
        for b in 0..width {
            if (bits >> b) & 1 == 1 {
                let pos = offset + b;
                bus[pos / 8] |= 1 << (pos % 8);
            }
        }
    }

    bus
}

pub fn unpack<const N: usize>(fmt: &QFormat, bus: &[u8]) -> Result<FxpVector<N>> {
    let expected = packed_len(fmt, N);
    if bus.len() != expected {
        return Err(KernelError::InvalidPayloadLength {
            expected,
            found: bus.len(),
        });
    }

    let width = fmt.width() as usize;
    let shift = 64 - width as u32;
    let mut v = FxpVector::<N>::new_zeros();

    for i in 0..N {
        let offset = i * width;
        let mut bits = 0u64;
        for b in 0..width {
            let pos = offset + b;
            if (bus[pos / 8] >> (pos % 8)) & 1 == 1 {
                bits |= 1 << b;
            }
        }
        // Sign-extend from `width` bits.
        v.data[i] = FxpScalar((((bits << shift) as i64) >> shift) as i32);
    }

    Ok(v)
}
