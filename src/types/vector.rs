// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-Point Vector type.
//!
//! Feature and weight vectors share this shape: `N` words indexed `0..N`.

use crate::error::{KernelError, Result};
use crate::types::scalar::FxpScalar;
use core::ops::{Index, IndexMut};

/// A fixed-dimension vector definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FxpVector<const N: usize> {
    pub data: [FxpScalar; N],
}

impl<const N: usize> Default for FxpVector<N> {
    fn default() -> Self {
        Self {
            data: [FxpScalar::ZERO; N],
        }
    }
}

impl<const N: usize> FxpVector<N> {
    /// Creates a new vector with all zeros.
    pub fn new_zeros() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: [i32; N]) -> Self {
        Self {
            data: raw.map(FxpScalar),
        }
    }

    /// Builds a vector from a slice, which must hold exactly `N` words.
    pub fn try_from_slice(values: &[FxpScalar]) -> Result<Self> {
        let data: [FxpScalar; N] = values.try_into().map_err(|_| KernelError::DimensionMismatch {
            expected: N,
            found: values.len(),
        })?;
        Ok(Self { data })
    }

    pub fn to_raw(&self) -> [i32; N] {
        self.data.map(FxpScalar::raw)
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns a slice of the vector data.
    pub fn as_slice(&self) -> &[FxpScalar] {
        &self.data
    }

    /// Returns a mutable slice of the vector data.
    pub fn as_mut_slice(&mut self) -> &mut [FxpScalar] {
        &mut self.data
    }

    pub fn iter(&self) -> core::slice::Iter<'_, FxpScalar> {
        self.data.iter()
    }
}

// Iterator support
impl<'a, const N: usize> IntoIterator for &'a FxpVector<N> {
    type Item = &'a FxpScalar;
    type IntoIter = core::slice::Iter<'a, FxpScalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<const N: usize> Index<usize> for FxpVector<N> {
    type Output = FxpScalar;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<const N: usize> IndexMut<usize> for FxpVector<N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}
