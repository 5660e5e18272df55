use std::fs;
use std::path::Path;

use anyhow::Context;
use fxp_lms::replay::{replay_and_hash, LogHeader};
use fxp_lms::snapshot::{decode_state, read_bytes};
use fxp_lms::verify::{model_state_hash, to_hex};
use fxp_lms::ModelState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub state_hash: String,
    /// `Some` when an expected snapshot was given.
    pub matches: Option<bool>,
}

/// Replays `log_path` over `base` (or a fresh model) and optionally compares
/// the result with `expect`. A mismatch is an error.
pub fn run(log_path: &Path, base: Option<&Path>, expect: Option<&Path>) -> anyhow::Result<ReplayReport> {
    let log_bytes = fs::read(log_path)
        .with_context(|| format!("Failed to read log {}", log_path.display()))?;
    let base_bytes = match base {
        Some(path) => read_bytes(path)?,
        None => Vec::new(),
    };
    let expected_bytes = match expect {
        Some(path) => Some(read_bytes(path)?),
        None => None,
    };

    let (header, _) = LogHeader::read(&log_bytes)?;
    let n = header.n_features as usize;

    let replayed = dispatch_features!(n, replayed_hash(&base_bytes, &log_bytes))?;
    let state_hash = to_hex(&replayed);

    println!("\nReplay: {} features, {}", n, header.format);
    println!("Final State Hash: {state_hash}");

    let matches = match &expected_bytes {
        Some(bytes) => {
            let expected = dispatch_features!(n, expected_hash(bytes))?;
            Some(expected == state_hash)
        }
        None => None,
    };

    match matches {
        Some(true) => println!("✅ MATCHES expected snapshot\n"),
        Some(false) => {
            println!("❌ DIVERGED from expected snapshot\n");
            anyhow::bail!("replayed state does not match the expected snapshot");
        }
        None => println!(),
    }

    Ok(ReplayReport { state_hash, matches })
}

fn replayed_hash<const N: usize>(base: &[u8], log: &[u8]) -> anyhow::Result<[u8; 32]> {
    Ok(replay_and_hash::<N>(base, log)?)
}

fn expected_hash<const N: usize>(bytes: &[u8]) -> anyhow::Result<String> {
    let model: ModelState<N> = decode_state(bytes)?;
    Ok(to_hex(&model_state_hash(&model)))
}
