// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot encoding.
//!
//! Layout, all little-endian:
//! `MAGIC | schema u32 | width u32 | frac u32 | n_features u32 | version u64 |
//! eta i32 | lambda i32 | bias i32 | weights i32 * N | crc64 u64`.
//! The CRC-64 covers every byte before it.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::Result;
use crate::snapshot::checksum;
use crate::state::model::ModelState;

pub const MAGIC: &[u8; 4] = b"FXLM";
pub const SCHEMA_VERSION: u32 = 1;

/// Bytes before the first parameter word.
pub const HEADER_SIZE: usize = 4 + 4 + 4 + 4 + 4 + 8;

pub const fn encoded_len(n_features: usize) -> usize {
    HEADER_SIZE + 4 * (3 + n_features) + 8
}

pub fn encode_state<const N: usize>(state: &ModelState<N>) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(encoded_len(N));

    // Header
    buf.extend_from_slice(MAGIC);
    buf.write_u32::<LittleEndian>(SCHEMA_VERSION)?;
    buf.write_u32::<LittleEndian>(state.fmt.width())?;
    buf.write_u32::<LittleEndian>(state.fmt.frac_bits())?;
    buf.write_u32::<LittleEndian>(N as u32)?;
    buf.write_u64::<LittleEndian>(state.version.0)?;

    // Parameters
    buf.write_i32::<LittleEndian>(state.hyper.eta.0)?;
    buf.write_i32::<LittleEndian>(state.hyper.lambda.0)?;
    buf.write_i32::<LittleEndian>(state.bias.0)?;
    for w in state.weights.iter() {
        buf.write_i32::<LittleEndian>(w.0)?;
    }

    let crc = checksum(&buf);
    buf.write_u64::<LittleEndian>(crc)?;
    Ok(buf)
}
