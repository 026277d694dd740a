//! # Common Types and Traits
use core::hash::Hash;
use num_traits::{FromPrimitive, ToPrimitive, Unsigned};
use std::fmt::Debug;

/// A type that can be used as a token id.
pub trait TokenType:
    'static
    + Default
    + Debug
    + Clone
    + Copy
    + Hash
    + Send
    + Sync
    + Unsigned
    + FromPrimitive
    + ToPrimitive
    + Ord
    + serde::Serialize
    + for<'de> serde::Deserialize<'de>
{
}

impl<T> TokenType for T where
    T: 'static
        + Default
        + Debug
        + Clone
        + Copy
        + Hash
        + Send
        + Sync
        + Unsigned
        + FromPrimitive
        + ToPrimitive
        + Ord
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>
{
}

/// Token string to T map.
pub type StringToTokenMap<T> = ahash::AHashMap<String, T>;

/// Convert a token to a `usize` index, if it fits.
pub fn token_index<T: TokenType>(token: T) -> Option<usize> {
    token.to_usize()
}

/// Check if a type is `Send`.
#[cfg(test)]
pub(crate) fn check_is_send<S: Send>(_: S) {}

#[cfg(test)]
/// Check if a type is `Sync`.
pub(crate) fn check_is_sync<S: Sync>(_: S) {}
