//! Pointer chasing.
//!
//! A chase starts at an address and follows [`Value::Pointer`]s until it hits
//! either a missing key or a non-pointer value. Both are ordinary stopping
//! points. Revisiting an address or following more than `max_hops`
//! pointers is an error.
//!
//! # Invariants
//!
//! - A chase never mutates the table.
//! - A chase always terminates: each hop either visits a new address or fails.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::address::Address;
use crate::error::{MemoryError, Result};
use crate::value::Value;

/// Where a chase stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The address the chase resolved to.
    pub target: Address,
    /// Every address visited, starting address first and `target` last.
    pub path: Vec<Address>,
    /// Whether `target` currently holds a value.
    pub exists: bool,
}

impl Resolution {
    /// Number of pointers followed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Follow pointers from `start` through `table`.
pub(crate) fn resolve(
    table: &IndexMap<Address, Value>,
    start: &Address,
    max_hops: usize,
) -> Result<Resolution> {
    let mut current = start.clone();
    let mut path = vec![current.clone()];
    let mut visited: HashSet<Address> = HashSet::from([current.clone()]);

    loop {
        let next = match table.get(&current) {
            None => {
                return Ok(Resolution {
                    target: current,
                    path,
                    exists: false,
                })
            }
            Some(Value::Raw(_)) => {
                return Ok(Resolution {
                    target: current,
                    path,
                    exists: true,
                })
            }
            Some(Value::Pointer(next)) => next,
        };

        if path.len() > max_hops {
            warn!(start = %start, limit = max_hops, "pointer chain exceeds hop limit");
            return Err(MemoryError::DepthExceeded {
                start: start.clone(),
                limit: max_hops,
            });
        }

        if !visited.insert(next.clone()) {
            warn!(start = %start, revisited = %next, "pointer cycle detected");
            return Err(MemoryError::CycleDetected {
                start: start.clone(),
                revisited: next.clone(),
                path,
            });
        }

        trace!(from = %current, to = %next, "following pointer");
        current = next.clone();
        path.push(current.clone());
    }
}
