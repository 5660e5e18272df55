//! Deterministic Hashing and Verification.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::state::model::ModelState;

/// Computes the cryptographic hash of a model state.
///
/// Covers the Q-format, command version, hyperparameters, bias and weights
/// in index order. The pipeline register, clock and saturation counters are
/// runtime state and are excluded.
pub fn model_state_hash<const N: usize>(state: &ModelState<N>) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();

    hasher.update(&state.fmt.width().to_le_bytes());
    hasher.update(&state.fmt.frac_bits().to_le_bytes());
    hasher.update(&(N as u32).to_le_bytes());
    hasher.update(&state.version.0.to_le_bytes());

    hasher.update(&state.hyper.eta.0.to_le_bytes());
    hasher.update(&state.hyper.lambda.0.to_le_bytes());

    hasher.update(&state.bias.0.to_le_bytes());
    for w in state.weights.iter() {
        hasher.update(&w.0.to_le_bytes());
    }

    *hasher.finalize().as_bytes()
}

pub fn snapshot_hash(snapshot_bytes: &[u8]) -> [u8; 32] {
    blake3::hash(snapshot_bytes).into()
}

pub fn log_hash(log_bytes: &[u8]) -> [u8; 32] {
    blake3::hash(log_bytes).into()
}

/// Lowercase hex rendering of a hash.
pub fn to_hex(hash: &[u8; 32]) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
