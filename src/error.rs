// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.
//!
//! Arithmetic never fails: saturation is reported through [`crate::Sat`].
//! These errors only arise when building a format or crossing the
//! serialization boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Invalid Q-format: width {width}, fraction {frac_bits} (need 2 <= width <= 32, 0 < fraction < width)")]
    InvalidFormat { width: u32, frac_bits: u32 },

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Format mismatch: expected Q{expected_width}/{expected_frac}, found Q{found_width}/{found_frac}")]
    FormatMismatch {
        expected_width: u32,
        expected_frac: u32,
        found_width: u32,
        found_frac: u32,
    },

    #[error("Invalid magic bytes in header")]
    InvalidMagic,

    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(u32),

    #[error("Checksum mismatch: expected {expected:016x}, found {found:016x}")]
    ChecksumMismatch { expected: u64, found: u64 },

    #[error("Invalid payload length: expected {expected}, found {found}")]
    InvalidPayloadLength { expected: usize, found: usize },

    #[error("Word {0} outside the format's range")]
    ValueOutOfRange(i32),

    #[error("Invalid record kind: {0}")]
    InvalidRecord(u8),

    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type KernelResult<T> = std::result::Result<T, KernelError>;
pub type Result<T> = KernelResult<T>;
