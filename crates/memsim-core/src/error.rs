//! Error types for address-space operations.

use thiserror::Error;

use crate::address::Address;

/// Errors that can occur while operating on an address space.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// The address (or the target a chase resolved to) is not in the table.
    #[error("address not found: {address}")]
    AddressNotFound { address: Address },

    /// A chase revisited an address it had already passed through.
    #[error("pointer cycle detected starting at {start}: revisited {revisited} via {}", format_path(.path))]
    CycleDetected {
        start: Address,
        revisited: Address,
        path: Vec<Address>,
    },

    /// A chase followed more pointers than the configured hop limit.
    #[error("pointer chain from {start} exceeds {limit} hops")]
    DepthExceeded { start: Address, limit: usize },

    /// A script line or value literal could not be parsed.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The configuration is malformed or holds an invalid value.
    #[error("config error: {0}")]
    Config(String),

    /// A shared table lock was poisoned by a panicking holder.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// I/O error while reading a config or script file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MemoryError {
    pub(crate) fn not_found(address: &Address) -> Self {
        MemoryError::AddressNotFound {
            address: address.clone(),
        }
    }

    /// Returns `true` for the chase-termination errors.
    pub fn is_chase_failure(&self) -> bool {
        matches!(
            self,
            MemoryError::CycleDetected { .. } | MemoryError::DepthExceeded { .. }
        )
    }
}

fn format_path(path: &[Address]) -> String {
    path.iter()
        .map(Address::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Convenience type alias for address-space operations.
pub type Result<T> = std::result::Result<T, MemoryError>;
