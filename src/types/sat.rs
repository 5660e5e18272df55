// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Value paired with a saturation flag.

/// Result of a saturating computation.
///
/// `saturated` is true if any operation that produced `value` clipped its
/// result to the representable range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Sat<T> {
    pub value: T,
    pub saturated: bool,
}

impl<T> Sat<T> {
    pub fn new(value: T, saturated: bool) -> Self {
        Self { value, saturated }
    }

    /// A result that did not clip.
    pub fn exact(value: T) -> Self {
        Self { value, saturated: false }
    }

    /// ORs this result's flag into `flag` and returns the value.
    pub fn take(self, flag: &mut bool) -> T {
        *flag |= self.saturated;
        self.value
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Sat<U> {
        Sat { value: f(self.value), saturated: self.saturated }
    }
}
