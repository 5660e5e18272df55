// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Counters.

/// Number of commands applied to a model state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Version(pub u64);

impl Version {
    pub fn next(&self) -> Self {
        Version(self.0 + 1)
    }
}

/// Number of pipeline clock steps taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct ClockStep(pub u64);

impl ClockStep {
    pub fn next(&self) -> Self {
        ClockStep(self.0 + 1)
    }
}
