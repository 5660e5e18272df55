// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Model snapshots and the packed-vector transport convention.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::state::model::ModelState;

pub mod decode;
pub mod encode;
pub mod pack;

pub use decode::{decode_state, read_header, SnapshotHeader};
pub use encode::encode_state;

pub(crate) fn checksum(data: &[u8]) -> u64 {
    let mut digest = crc64fast::Digest::new();
    digest.write(data);
    digest.sum64()
}

pub fn write_to<const N: usize>(path: impl AsRef<Path>, state: &ModelState<N>) -> Result<()> {
    let bytes = encode_state(state)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(&bytes)?;
    file.sync_data()?;
    info!(path = %path.as_ref().display(), bytes = bytes.len(), version = state.version(), "snapshot written");
    Ok(())
}

pub fn read_from<const N: usize>(path: impl AsRef<Path>) -> Result<ModelState<N>> {
    let bytes = read_bytes(path)?;
    decode_state(&bytes)
}

pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}
