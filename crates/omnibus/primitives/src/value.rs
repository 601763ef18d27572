//! Decoded event argument values.

use crate::bytes::{decode_byte_string, equal_byte_slices};
use alloc::{string::String, vec::Vec};
use alloy_primitives::{Address, B256, Bytes, U256};
use core::str::FromStr;
use derive_more::{Display, From};

/// A single ABI value decoded from an event log, or supplied by an expectation.
///
/// Only the value shapes carried by governance events are represented. Every variant keeps the
/// natural alloy type so comparisons never have to sniff a runtime representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub enum ArgValue {
    /// An `address`.
    #[display("{_0}")]
    Address(Address),
    /// A `bool`.
    #[display("{_0}")]
    Bool(bool),
    /// Any unsigned integer width, widened to 256 bits.
    #[display("{_0}")]
    Uint(U256),
    /// A `bytes32` word.
    #[display("{_0}")]
    FixedBytes(B256),
    /// Dynamic `bytes`.
    #[display("{_0}")]
    Bytes(Bytes),
    /// A `string`.
    #[display("{_0:?}")]
    String(String),
}

impl ArgValue {
    /// Loose equality between two values.
    ///
    /// Values of the same kind compare exactly. An unsigned integer equals a string holding the
    /// same number in decimal or `0x` notation, and a boolean equals the integers `0` and `1`.
    /// Anything else is unequal; byte equivalence is checked separately through
    /// [`ArgValue::byte_repr`].
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Uint(n), Self::String(s)) | (Self::String(s), Self::Uint(n)) => {
                U256::from_str(s.trim()).is_ok_and(|parsed| parsed == *n)
            }
            (Self::Bool(b), Self::Uint(n)) | (Self::Uint(n), Self::Bool(b)) => {
                U256::from(*b as u8) == *n
            }
            _ => self == other,
        }
    }

    /// The byte view of the value, if it has one.
    ///
    /// Addresses, words and dynamic bytes always have a byte view. Strings have one only when
    /// they are valid hex byte strings. Integers and booleans never do.
    pub fn byte_repr(&self) -> Option<Vec<u8>> {
        match self {
            Self::Address(address) => Some(address.to_vec()),
            Self::FixedBytes(word) => Some(word.to_vec()),
            Self::Bytes(bytes) => Some(bytes.to_vec()),
            Self::String(s) => decode_byte_string(s),
            Self::Bool(_) | Self::Uint(_) => None,
        }
    }

    /// Returns `true` if both values have a byte view and the views are equivalent.
    pub fn bytes_eq(&self, other: &Self) -> bool {
        match (self.byte_repr(), other.byte_repr()) {
            (Some(a), Some(b)) => equal_byte_slices(&a, &b),
            _ => false,
        }
    }
}

impl From<u64> for ArgValue {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}
