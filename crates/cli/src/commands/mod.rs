//! Subcommand implementations.
//!
//! The core fixes the feature count at compile time; files carry it at run
//! time. [`dispatch_features!`] bridges the two for `1..=MAX_FEATURES`.

/// Largest feature count the CLI instantiates.
pub const MAX_FEATURES: usize = 8;

macro_rules! dispatch_features {
    ($n:expr, $func:ident ( $($arg:expr),* $(,)? )) => {
        match $n {
            1 => $func::<1>($($arg),*),
            2 => $func::<2>($($arg),*),
            3 => $func::<3>($($arg),*),
            4 => $func::<4>($($arg),*),
            5 => $func::<5>($($arg),*),
            6 => $func::<6>($($arg),*),
            7 => $func::<7>($($arg),*),
            8 => $func::<8>($($arg),*),
            other => Err(anyhow::anyhow!(
                "unsupported feature count {} (supported: 1..={})",
                other,
                $crate::commands::MAX_FEATURES
            )),
        }
    };
}

pub mod codec;
pub mod infer;
pub mod inspect;
pub mod replay;
pub mod train;
pub mod verify;
