//! Deterministic Replay Logic.
//!
//! A sample log is a header followed by tagged command records:
//!
//! ```text
//! [Version: u32][Features: u32][Width: u32][Frac: u32]
//! Train:          [1][x: packed][y_true: i32]
//! Infer:          [2][x: packed]
//! LoadWeights:    [3][w: packed][bias: i32]
//! SetHyperparams: [4][eta: i32][lambda: i32]
//! ```
//!
//! Vectors use the packed bus layout from [`crate::snapshot::pack`].

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::info;

use crate::error::{KernelError, Result};
use crate::fxp::qformat::QFormat;
use crate::proof::TrainingProof;
use crate::sgd::Hyperparams;
use crate::snapshot::decode::{decode_state, read_header, read_word};
use crate::snapshot::encode::SCHEMA_VERSION;
use crate::snapshot::pack::{pack, packed_len, unpack};
use crate::state::command::{
    Command, KIND_INFER, KIND_LOAD_WEIGHTS, KIND_SET_HYPERPARAMS, KIND_TRAIN,
};
use crate::state::model::ModelState;
use crate::types::vector::FxpVector;
use crate::verify::{log_hash, model_state_hash, snapshot_hash};

pub const LOG_VERSION: u32 = 1;

/// Sample log header (16 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogHeader {
    pub version: u32,
    pub n_features: u32,
    pub format: QFormat,
}

impl LogHeader {
    pub const SIZE: usize = 16;

    pub fn new(fmt: QFormat, n_features: usize) -> Self {
        Self {
            version: LOG_VERSION,
            n_features: n_features as u32,
            format: fmt,
        }
    }

    pub fn read(buf: &[u8]) -> Result<(Self, &[u8])> {
        if buf.len() < Self::SIZE {
            return Err(KernelError::InvalidPayloadLength {
                expected: Self::SIZE,
                found: buf.len(),
            });
        }

        let mut cursor = Cursor::new(&buf[..Self::SIZE]);
        let version = cursor.read_u32::<LittleEndian>()?;
        if version != LOG_VERSION {
            return Err(KernelError::UnsupportedVersion(version));
        }
        let n_features = cursor.read_u32::<LittleEndian>()?;
        let width = cursor.read_u32::<LittleEndian>()?;
        let frac_bits = cursor.read_u32::<LittleEndian>()?;

        Ok((
            Self {
                version,
                n_features,
                format: QFormat::new(width, frac_bits)?,
            },
            &buf[Self::SIZE..],
        ))
    }

    pub fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.write_u32::<LittleEndian>(self.version)?;
        buf.write_u32::<LittleEndian>(self.n_features)?;
        buf.write_u32::<LittleEndian>(self.format.width())?;
        buf.write_u32::<LittleEndian>(self.format.frac_bits())?;
        Ok(())
    }
}

pub fn encode_log<const N: usize>(fmt: &QFormat, commands: &[Command<N>]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    LogHeader::new(*fmt, N).write(&mut buf)?;

    for cmd in commands {
        buf.write_u8(cmd.kind())?;
        match cmd {
            Command::Train { x, y_true } => {
                buf.extend_from_slice(&pack(fmt, x));
                buf.write_i32::<LittleEndian>(y_true.0)?;
            }
            Command::Infer { x } => {
                buf.extend_from_slice(&pack(fmt, x));
            }
            Command::LoadWeights { weights, bias } => {
                buf.extend_from_slice(&pack(fmt, weights));
                buf.write_i32::<LittleEndian>(bias.0)?;
            }
            Command::SetHyperparams(hp) => {
                buf.write_i32::<LittleEndian>(hp.eta.0)?;
                buf.write_i32::<LittleEndian>(hp.lambda.0)?;
            }
        }
    }

    Ok(buf)
}

pub fn decode_log<const N: usize>(log_bytes: &[u8]) -> Result<(LogHeader, Vec<Command<N>>)> {
    let (header, body) = LogHeader::read(log_bytes)?;
    if header.n_features as usize != N {
        return Err(KernelError::DimensionMismatch {
            expected: N,
            found: header.n_features as usize,
        });
    }

    let fmt = header.format;
    let mut cursor = Cursor::new(body);
    let mut commands = Vec::new();

    while (cursor.position() as usize) < body.len() {
        let cmd = match cursor.read_u8()? {
            KIND_TRAIN => {
                let x = read_vector(&mut cursor, &fmt)?;
                let y_true = read_word(&mut cursor, &fmt)?;
                Command::Train { x, y_true }
            }
            KIND_INFER => Command::Infer {
                x: read_vector(&mut cursor, &fmt)?,
            },
            KIND_LOAD_WEIGHTS => {
                let weights = read_vector(&mut cursor, &fmt)?;
                let bias = read_word(&mut cursor, &fmt)?;
                Command::LoadWeights { weights, bias }
            }
            KIND_SET_HYPERPARAMS => {
                let eta = read_word(&mut cursor, &fmt)?;
                let lambda = read_word(&mut cursor, &fmt)?;
                Command::SetHyperparams(Hyperparams::new(eta, lambda))
            }
            other => return Err(KernelError::InvalidRecord(other)),
        };
        commands.push(cmd);
    }

    Ok((header, commands))
}

fn read_vector<const N: usize>(cursor: &mut Cursor<&[u8]>, fmt: &QFormat) -> Result<FxpVector<N>> {
    let mut bus = vec![0u8; packed_len(fmt, N)];
    cursor.read_exact(&mut bus)?;
    unpack(fmt, &bus)
}

/// Replays a sample log on top of a base snapshot.
///
/// An empty snapshot starts from zero weights and zero hyperparameters in the
/// log's format; the log is expected to set hyperparameters before training.
/// An empty log is a no-op.
pub fn replay<const N: usize>(snapshot_bytes: &[u8], log_bytes: &[u8]) -> Result<ModelState<N>> {
    let base: Option<ModelState<N>> = if snapshot_bytes.is_empty() {
        None
    } else {
        Some(decode_state(snapshot_bytes)?)
    };

    if log_bytes.is_empty() {
        return Ok(base.unwrap_or_else(|| ModelState::new(QFormat::default(), Hyperparams::default())));
    }

    let (header, commands) = decode_log::<N>(log_bytes)?;
    let mut state = match base {
        Some(state) => {
            let (have, want) = (state.format(), header.format);
            if have != want {
                return Err(KernelError::FormatMismatch {
                    expected_width: have.width(),
                    expected_frac: have.frac_bits(),
                    found_width: want.width(),
                    found_frac: want.frac_bits(),
                });
            }
            state
        }
        None => ModelState::new(header.format, Hyperparams::default()),
    };

    for cmd in &commands {
        state.apply(cmd);
    }

    let stats = state.stats();
    info!(
        commands = commands.len(),
        version = state.version(),
        mac_saturations = stats.mac,
        update_saturations = stats.update,
        "replay complete"
    );
    Ok(state)
}

/// Replays and returns the final state hash.
pub fn replay_and_hash<const N: usize>(snapshot_bytes: &[u8], log_bytes: &[u8]) -> Result<[u8; 32]> {
    let state = replay::<N>(snapshot_bytes, log_bytes)?;
    Ok(model_state_hash(&state))
}

/// Replays and binds inputs and result into a [`TrainingProof`].
pub fn prove<const N: usize>(snapshot_bytes: &[u8], log_bytes: &[u8]) -> Result<TrainingProof> {
    let base_version = if snapshot_bytes.is_empty() {
        0
    } else {
        read_header(snapshot_bytes)?.version
    };
    let state = replay::<N>(snapshot_bytes, log_bytes)?;
    let fmt = state.format();

    Ok(TrainingProof {
        schema_version: SCHEMA_VERSION,
        n_features: N as u32,
        width: fmt.width(),
        frac_bits: fmt.frac_bits(),
        commands: state.version() - base_version,
        snapshot_hash: if snapshot_bytes.is_empty() {
            [0u8; 32]
        } else {
            snapshot_hash(snapshot_bytes)
        },
        log_hash: log_hash(log_bytes),
        final_state_hash: model_state_hash(&state),
    })
}
