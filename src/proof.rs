//! Deterministic Proof Structures.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

/// A receipt that replaying a specific sample log over a specific starting
/// snapshot yields a specific model state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingProof {
    /// Snapshot schema version.
    pub schema_version: u32,

    pub n_features: u32,
    pub width: u32,
    pub frac_bits: u32,

    /// Commands in the log.
    pub commands: u64,

    /// BLAKE3 hash of the starting snapshot bytes (zero-filled for a fresh model).
    pub snapshot_hash: [u8; 32],

    /// BLAKE3 hash of the sample log bytes.
    pub log_hash: [u8; 32],

    /// BLAKE3 hash of the final model state.
    pub final_state_hash: [u8; 32],
}
