use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use fxp_lms::config::ModelConfig;
use fxp_lms::replay::{encode_log, prove};
use fxp_lms::snapshot;
use fxp_lms::synth::{LinearTarget, Pcg32, MAX_RANGE};
use fxp_lms::verify::{model_state_hash, to_hex};
use fxp_lms::{Command, ModelState};
use serde::Serialize;
use tracing::info;

/// Everything needed to fit a model to a synthetic linear target.
#[derive(Debug, Clone)]
pub struct TrainArgs {
    pub slopes: Vec<f64>,
    pub intercept: f64,
    pub samples: usize,
    pub range: f64,
    pub seed: u64,
    pub config: ModelConfig,
    pub out: PathBuf,
    pub log: Option<PathBuf>,
    pub proof: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainSummary {
    pub n_features: usize,
    pub commands: u64,
    pub weights: Vec<f64>,
    pub bias: f64,
    pub mac_saturations: u64,
    pub update_saturations: u64,
    pub state_hash: String,
}

pub fn run(args: &TrainArgs) -> anyhow::Result<TrainSummary> {
    if !args.range.is_finite() || args.range < 0.0 || args.range > MAX_RANGE {
        anyhow::bail!("range must be a finite value in [0, {MAX_RANGE}], got {}", args.range);
    }

    let summary = dispatch_features!(args.slopes.len(), train(args))?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Parameter", "Target", "Learned"]);
    for (i, (target, learned)) in args.slopes.iter().zip(&summary.weights).enumerate() {
        table.add_row(vec![
            format!("w[{i}]"),
            format!("{target:.4}"),
            format!("{learned:.4}"),
        ]);
    }
    table.add_row(vec![
        "bias".to_string(),
        format!("{:.4}", args.intercept),
        format!("{:.4}", summary.bias),
    ]);

    println!("\nTraining Report");
    println!("---------------");
    println!("{table}");
    println!(
        "Saturations: {} MAC, {} update",
        summary.mac_saturations, summary.update_saturations
    );
    println!("State Hash:  {}\n", summary.state_hash);

    Ok(summary)
}

fn train<const N: usize>(args: &TrainArgs) -> anyhow::Result<TrainSummary> {
    let slopes: [f64; N] = args.slopes.as_slice().try_into()?;
    let mut model = ModelState::<N>::from_config(&args.config)?;
    let fmt = model.format();

    let target = LinearTarget::new(slopes, args.intercept, args.range);
    let mut rng = Pcg32::new(args.seed);

    // The log opens with the hyperparameters so it replays onto a fresh model.
    let mut commands = vec![Command::SetHyperparams(model.hyperparams())];
    commands.extend(target.train_commands(&fmt, &mut rng, args.samples));

    info!(format = %fmt, features = N, samples = args.samples, "training");
    for cmd in &commands {
        model.apply(cmd);
    }

    snapshot::write_to(&args.out, &model)?;

    if args.log.is_some() || args.proof.is_some() {
        let log_bytes = encode_log(&fmt, &commands)?;
        if let Some(path) = &args.log {
            fs::write(path, &log_bytes)
                .with_context(|| format!("Failed to write log {}", path.display()))?;
        }
        if let Some(path) = &args.proof {
            let proof = prove::<N>(&[], &log_bytes)?;
            fs::write(path, serde_json::to_string_pretty(&proof)?)
                .with_context(|| format!("Failed to write proof {}", path.display()))?;
        }
    }

    let stats = model.stats();
    Ok(TrainSummary {
        n_features: N,
        commands: model.version(),
        weights: model.weights().iter().map(|w| fmt.decode(*w)).collect(),
        bias: fmt.decode(model.bias()),
        mac_saturations: stats.mac,
        update_saturations: stats.update,
        state_hash: to_hex(&model_state_hash(&model)),
    })
}
