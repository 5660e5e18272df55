// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! fxp-lms: a deterministic, saturating fixed-point linear model core.
//!
//! Inference is a registered multiply-accumulate pipeline (dot product plus
//! bias, one step of latency). Training is a stateless SGD/LMS update engine
//! whose outputs the caller latches as the next step's weights and bias.

pub mod config;
pub mod error;
pub mod fxp;
pub mod types;
pub mod math;
pub mod mac;
pub mod sgd;
pub mod state;
pub mod snapshot;
pub mod verify;
pub mod proof;
pub mod replay;
pub mod synth;

pub use error::{KernelError, Result};
pub use fxp::qformat::QFormat;
pub use mac::{MacOutput, MacPipeline};
pub use sgd::{sgd_update, Hyperparams, SgdOutput};
pub use state::command::Command;
pub use state::model::{ModelState, Outcome};
pub use types::sat::Sat;
pub use types::scalar::FxpScalar;
pub use types::vector::FxpVector;

#[cfg(test)]
pub mod tests;
