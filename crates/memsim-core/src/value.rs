//! Stored values.
//!
//! A slot holds either a pointer to another address or a raw payload of any
//! shape. The tag alone decides whether a chase keeps going.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::{looks_like_address, Address};

/// A value stored at an address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// A reference to another address. Followed by chasing operations.
    Pointer(Address),
    /// Any other payload. Never followed.
    Raw(serde_json::Value),
}

impl Value {
    /// Build a pointer value.
    pub fn pointer(target: impl Into<Address>) -> Self {
        Value::Pointer(target.into())
    }

    /// Build a raw text value. The text is never treated as an address, even
    /// when it starts with `0x`.
    pub fn text(text: impl Into<String>) -> Self {
        Value::Raw(serde_json::Value::String(text.into()))
    }

    /// Classify a textual literal.
    ///
    /// - a token starting with `0x` becomes a [`Value::Pointer`]
    /// - valid JSON (`42`, `1.5`, `true`, `null`, `"quoted"`, `[1,2]`) becomes
    ///   the matching raw payload
    /// - anything else becomes raw text
    ///
    /// ```
    /// use memsim_core::Value;
    ///
    /// assert!(Value::from_literal("0x0003").is_pointer_like());
    /// assert_eq!(Value::from_literal("42"), Value::from(42));
    /// assert_eq!(Value::from_literal("hello"), Value::text("hello"));
    /// ```
    pub fn from_literal(literal: &str) -> Self {
        let literal = literal.trim();
        if looks_like_address(literal) {
            return Value::pointer(literal);
        }
        match serde_json::from_str::<serde_json::Value>(literal) {
            Ok(json) => Value::Raw(json),
            Err(_) => Value::text(literal),
        }
    }

    /// Returns `true` if a chase should follow this value.
    pub fn is_pointer_like(&self) -> bool {
        matches!(self, Value::Pointer(_))
    }

    /// The address this value points to, if it is a pointer.
    pub fn as_pointer(&self) -> Option<&Address> {
        match self {
            Value::Pointer(target) => Some(target),
            Value::Raw(_) => None,
        }
    }

    /// The raw payload, if this is not a pointer.
    pub fn as_raw(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Raw(payload) => Some(payload),
            Value::Pointer(_) => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::from(0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Pointer(target) => write!(f, "{target}"),
            Value::Raw(serde_json::Value::String(s)) => f.write_str(s),
            Value::Raw(other) => write!(f, "{other}"),
        }
    }
}

impl From<Address> for Value {
    fn from(target: Address) -> Self {
        Value::Pointer(target)
    }
}

impl From<serde_json::Value> for Value {
    fn from(payload: serde_json::Value) -> Self {
        Value::Raw(payload)
    }
}

/// Text starting with `0x` becomes a pointer; use [`Value::text`] to store
/// such text raw.
impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::from(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        if looks_like_address(&text) {
            Value::Pointer(Address::from(text))
        } else {
            Value::text(text)
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Raw(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Raw(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Raw(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Raw(b.into())
    }
}
