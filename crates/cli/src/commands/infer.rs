use std::path::Path;

use fxp_lms::snapshot::{decode_state, read_bytes, read_header};
use fxp_lms::{Command, FxpVector, ModelState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub value: f64,
    pub raw: i32,
    pub saturated: bool,
}

pub fn run(snapshot_path: &Path, features: &[f64]) -> anyhow::Result<Prediction> {
    let bytes = read_bytes(snapshot_path)?;
    let header = read_header(&bytes)?;
    if features.len() != header.n_features {
        anyhow::bail!(
            "model expects {} features, got {}",
            header.n_features,
            features.len()
        );
    }

    let prediction = dispatch_features!(header.n_features, predict(&bytes, features))?;
    println!(
        "Prediction: {:.6} (raw {}){}",
        prediction.value,
        prediction.raw,
        if prediction.saturated { " [saturated]" } else { "" }
    );
    Ok(prediction)
}

fn predict<const N: usize>(bytes: &[u8], features: &[f64]) -> anyhow::Result<Prediction> {
    let mut model: ModelState<N> = decode_state(bytes)?;
    let fmt = model.format();

    let mut x = FxpVector::<N>::new_zeros();
    for (slot, value) in x.as_mut_slice().iter_mut().zip(features) {
        *slot = fmt.encode(*value);
    }

    let outcome = model.apply(&Command::Infer { x });
    let prediction = outcome
        .prediction()
        .ok_or_else(|| anyhow::anyhow!("inference produced no prediction"))?;

    Ok(Prediction {
        value: fmt.decode(prediction.value),
        raw: prediction.value.0,
        saturated: prediction.saturated,
    })
}
