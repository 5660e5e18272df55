// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Commands a caller presents to a model state.

use crate::sgd::Hyperparams;
use crate::types::scalar::FxpScalar;
use crate::types::vector::FxpVector;

/// Record tags used by the sample log.
pub const KIND_TRAIN: u8 = 1;
pub const KIND_INFER: u8 = 2;
pub const KIND_LOAD_WEIGHTS: u8 = 3;
pub const KIND_SET_HYPERPARAMS: u8 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<const N: usize> {
    /// Predict `x`, then apply one SGD/LMS step towards `y_true`.
    Train {
        x: FxpVector<N>,
        y_true: FxpScalar,
    },
    /// Predict `x`; weights and bias are held.
    Infer {
        x: FxpVector<N>,
    },
    /// Replace the weights and bias.
    LoadWeights {
        weights: FxpVector<N>,
        bias: FxpScalar,
    },
    SetHyperparams(Hyperparams),
}

impl<const N: usize> Command<N> {
    pub fn kind(&self) -> u8 {
        match self {
            Command::Train { .. } => KIND_TRAIN,
            Command::Infer { .. } => KIND_INFER,
            Command::LoadWeights { .. } => KIND_LOAD_WEIGHTS,
            Command::SetHyperparams(_) => KIND_SET_HYPERPARAMS,
        }
    }
}
