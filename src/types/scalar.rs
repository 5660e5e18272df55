// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Wrapper for a raw signed word holding a fixed-point value.

use serde::{Deserialize, Serialize};

/// A raw fixed-point word. Its Q-format is carried by the surrounding
/// [`crate::QFormat`]; the associated constants assume Q16.16.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct FxpScalar(pub i32);

impl FxpScalar {
    pub const ZERO: FxpScalar = FxpScalar(0);
    pub const ONE: FxpScalar = FxpScalar(crate::config::SCALE);
    pub const MIN: FxpScalar = FxpScalar(i32::MIN);
    pub const MAX: FxpScalar = FxpScalar(i32::MAX);

    pub fn raw(self) -> i32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for FxpScalar {
    fn from(raw: i32) -> Self {
        FxpScalar(raw)
    }
}
