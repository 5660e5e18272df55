use std::path::Path;

use fxp_lms::snapshot::{decode_state, read_bytes, read_header};
use fxp_lms::verify::{model_state_hash, snapshot_hash, to_hex};
use fxp_lms::ModelState;

/// Checks magic, schema, checksum and word ranges. Returns the state hash.
pub fn run(snapshot_path: &Path) -> anyhow::Result<String> {
    let bytes = read_bytes(snapshot_path)?;

    let result = read_header(&bytes)
        .map_err(anyhow::Error::from)
        .and_then(|header| dispatch_features!(header.n_features, state_hash(&bytes)));

    match result {
        Ok(hash) => {
            println!("\n✅ VERIFIED\n");
            println!("File Hash:   {}", to_hex(&snapshot_hash(&bytes)));
            println!("State Hash:  {}", hash);
            println!("Confidence:  STRONG (CRC64 + range check)\n");
            Ok(hash)
        }
        Err(e) => {
            println!("\n❌ CORRUPTED\n");
            println!("Reason: {e}\n");
            Err(e)
        }
    }
}

fn state_hash<const N: usize>(bytes: &[u8]) -> anyhow::Result<String> {
    let model: ModelState<N> = decode_state(bytes)?;
    Ok(to_hex(&model_state_hash(&model)))
}
