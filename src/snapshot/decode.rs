// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot decoding.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{KernelError, Result};
use crate::fxp::qformat::QFormat;
use crate::sgd::Hyperparams;
use crate::snapshot::checksum;
use crate::snapshot::encode::{encoded_len, HEADER_SIZE, MAGIC, SCHEMA_VERSION};
use crate::state::model::ModelState;
use crate::types::id::Version;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub schema_version: u32,
    pub format: QFormat,
    pub n_features: usize,
    pub version: u64,
}

/// Reads only the header, so tools can learn the feature count before
/// picking a concrete `N`.
pub fn read_header(buf: &[u8]) -> Result<SnapshotHeader> {
    if buf.len() < HEADER_SIZE {
        return Err(KernelError::InvalidPayloadLength {
            expected: HEADER_SIZE,
            found: buf.len(),
        });
    }
    if &buf[0..4] != MAGIC {
        return Err(KernelError::InvalidMagic);
    }

    let mut cursor = Cursor::new(&buf[4..HEADER_SIZE]);
    let schema_version = cursor.read_u32::<LittleEndian>()?;
    if schema_version != SCHEMA_VERSION {
        return Err(KernelError::UnsupportedVersion(schema_version));
    }
    let width = cursor.read_u32::<LittleEndian>()?;
    let frac_bits = cursor.read_u32::<LittleEndian>()?;
    let n_features = cursor.read_u32::<LittleEndian>()? as usize;
    let version = cursor.read_u64::<LittleEndian>()?;

    Ok(SnapshotHeader {
        schema_version,
        format: QFormat::new(width, frac_bits)?,
        n_features,
        version,
    })
}

/// Restores a model state.
///
/// Snapshots do not carry the saturation warning threshold: the restored
/// state uses [`DEFAULT_SATURATION_STREAK`]. Callers that configured another
/// threshold reapply it with [`ModelState::with_warn_streak`].
///
/// [`DEFAULT_SATURATION_STREAK`]: crate::config::DEFAULT_SATURATION_STREAK
pub fn decode_state<const N: usize>(buf: &[u8]) -> Result<ModelState<N>> {
    let header = read_header(buf)?;
    if header.n_features != N {
        return Err(KernelError::DimensionMismatch {
            expected: N,
            found: header.n_features,
        });
    }

    let expected_len = encoded_len(N);
    if buf.len() != expected_len {
        return Err(KernelError::InvalidPayloadLength {
            expected: expected_len,
            found: buf.len(),
        });
    }

    let (body, trailer) = buf.split_at(expected_len - 8);
    let stored = u64::from_le_bytes(trailer.try_into().map_err(|_| {
        KernelError::InvalidPayloadLength {
            expected: 8,
            found: trailer.len(),
        }
    })?);
    let computed = checksum(body);
    if stored != computed {
        return Err(KernelError::ChecksumMismatch {
            expected: stored,
            found: computed,
        });
    }

    let fmt = header.format;
    let mut cursor = Cursor::new(&body[HEADER_SIZE..]);
    let eta = read_word(&mut cursor, &fmt)?;
    let lambda = read_word(&mut cursor, &fmt)?;
    let bias = read_word(&mut cursor, &fmt)?;
    let mut weights = FxpVector::<N>::new_zeros();
    for i in 0..N {
        weights.data[i] = read_word(&mut cursor, &fmt)?;
    }

    let mut state = ModelState::new(fmt, Hyperparams::new(eta, lambda)).with_weights(weights, bias);
    state.version = Version(header.version);
    Ok(state)
}

/// Reads one word and rejects values a `fmt`-wide register cannot hold.
pub(crate) fn read_word(cursor: &mut Cursor<&[u8]>, fmt: &QFormat) -> Result<FxpScalar> {
    let raw = cursor.read_i32::<LittleEndian>()?;
    if fmt.clip(raw as i64).saturated {
        return Err(KernelError::ValueOutOfRange(raw));
    }
    Ok(FxpScalar(raw))
}
