use clap::{Parser, Subcommand};
use std::path::PathBuf;
use fxp_lms::config::{ModelConfig, DEFAULT_WIDTH, FRAC_BITS};
use fxp_lms_cli::commands::{codec, infer, inspect, replay, train, verify};
use fxp_lms_cli::config::{self, Overrides};
use fxp_lms_cli::telemetry::init_telemetry;

#[derive(Parser)]
#[command(name = "fxp-lms")]
#[command(about = "Deterministic fixed-point linear model: train, infer, replay, verify", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a model to a synthetic linear target and write a snapshot.
    Train {
        /// Target slopes, one per feature (comma separated).
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        slopes: Vec<f64>,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        intercept: f64,

        #[arg(long, default_value_t = 1000)]
        samples: usize,

        /// Features are drawn from [-range, range].
        #[arg(long, default_value_t = 2.0)]
        range: f64,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// JSON model config. Flags below override it.
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        eta: Option<f64>,

        #[arg(long)]
        decay: Option<f64>,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        frac: Option<u32>,

        #[arg(long, short)]
        out: PathBuf,

        /// Also write the sample log.
        #[arg(long)]
        log: Option<PathBuf>,

        /// Also write a JSON training proof.
        #[arg(long)]
        proof: Option<PathBuf>,
    },
    /// Run one prediction against a snapshot.
    Infer {
        snapshot: PathBuf,

        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        features: Vec<f64>,
    },
    /// Show a snapshot's header and parameters.
    Inspect {
        snapshot: PathBuf,
    },
    /// Verify the integrity of a snapshot file.
    Verify {
        snapshot: PathBuf,
    },
    /// Replay a sample log and report the final state hash.
    Replay {
        log: PathBuf,

        /// Starting snapshot (defaults to a fresh model).
        #[arg(long)]
        base: Option<PathBuf>,

        /// Snapshot the replayed state must match.
        #[arg(long)]
        expect: Option<PathBuf>,
    },
    /// Encode a real number as a fixed-point word.
    Encode {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,

        #[arg(long, default_value_t = FRAC_BITS)]
        frac: u32,
    },
    /// Decode a fixed-point word (0x-prefixed bits or signed decimal).
    Decode {
        #[arg(allow_hyphen_values = true)]
        raw: String,

        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,

        #[arg(long, default_value_t = FRAC_BITS)]
        frac: u32,
    },
}

fn main() -> anyhow::Result<()> {
    init_telemetry();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            slopes,
            intercept,
            samples,
            range,
            seed,
            config: config_path,
            eta,
            decay,
            width,
            frac,
            out,
            log,
            proof,
        } => {
            let base = match config_path {
                Some(path) => config::load(&path)?,
                None => ModelConfig::default(),
            };
            let overrides = Overrides {
                width,
                frac_bits: frac,
                learning_rate: eta,
                decay,
            };
            let args = train::TrainArgs {
                slopes,
                intercept,
                samples,
                range,
                seed,
                config: overrides.apply(base),
                out,
                log,
                proof,
            };
            train::run(&args).map(|_| ())
        }
        Commands::Infer { snapshot, features } => infer::run(&snapshot, &features).map(|_| ()),
        Commands::Inspect { snapshot } => inspect::run(&snapshot),
        Commands::Verify { snapshot } => verify::run(&snapshot).map(|_| ()),
        Commands::Replay { log, base, expect } => {
            replay::run(&log, base.as_deref(), expect.as_deref()).map(|_| ())
        }
        Commands::Encode { value, width, frac } => codec::encode(value, width, frac).map(|_| ()),
        Commands::Decode { raw, width, frac } => codec::decode(&raw, width, frac).map(|_| ()),
    }
}
