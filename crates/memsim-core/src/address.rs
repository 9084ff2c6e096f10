//! Address tokens.
//!
//! An [`Address`] is an opaque string key. Only the addresses generated when a
//! space is seeded follow a fixed format (`0x` plus a zero-padded decimal
//! index); anything written later is accepted as-is and never re-validated.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix that marks a textual token as an address.
pub const ADDRESS_PREFIX: &str = "0x";

/// Default zero-pad width for seeded addresses.
pub const DEFAULT_ADDRESS_WIDTH: usize = 4;

/// An opaque address token identifying one slot in an address space.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap an arbitrary token. No format validation is performed.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The seeded address for `index`: `0x` followed by the decimal index,
    /// zero-padded to at least `width` digits. Wider indices are not truncated.
    ///
    /// ```
    /// use memsim_core::Address;
    ///
    /// assert_eq!(Address::indexed(7, 4).as_str(), "0x0007");
    /// assert_eq!(Address::indexed(12345, 4).as_str(), "0x12345");
    /// ```
    pub fn indexed(index: usize, width: usize) -> Self {
        Self(format!("{ADDRESS_PREFIX}{index:0width$}"))
    }

    /// The underlying token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the address, returning the token.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Returns `true` if `token` reads as an address: at least two characters,
/// the first two being `0` and `x`.
pub fn looks_like_address(token: &str) -> bool {
    token.starts_with(ADDRESS_PREFIX)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Address {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl Borrow<str> for Address {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
