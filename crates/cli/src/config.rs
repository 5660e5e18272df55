use std::fs;
use std::path::Path;

use anyhow::Context;
use fxp_lms::config::ModelConfig;

/// Loads a [`ModelConfig`] from JSON. Missing fields take their defaults.
pub fn load(path: &Path) -> anyhow::Result<ModelConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: ModelConfig = serde_json::from_str(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    config.format()?;
    Ok(config)
}

/// Flag overrides applied on top of a loaded or default config.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub width: Option<u32>,
    pub frac_bits: Option<u32>,
    pub learning_rate: Option<f64>,
    pub decay: Option<f64>,
}

impl Overrides {
    pub fn apply(&self, mut config: ModelConfig) -> ModelConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(frac_bits) = self.frac_bits {
            config.frac_bits = frac_bits;
        }
        if let Some(eta) = self.learning_rate {
            config.learning_rate = eta;
        }
        if let Some(decay) = self.decay {
            config.decay = decay;
        }
        config
    }
}
