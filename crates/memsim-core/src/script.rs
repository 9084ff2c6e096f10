//! Line-oriented operation scripts.
//!
//! A script is a sequence of lines, one operation each:
//!
//! ```text
//! # seed a pointer, then write through it
//! raw-write 0xAAAA 0xBBBB
//! raw-write 0xBBBB 42
//! write 0xAAAA 99
//! read 0xBBBB
//! list
//! ```
//!
//! Blank lines and `#` comments are skipped. The value of a write is the rest
//! of the line, classified by [`Value::from_literal`].

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::address::Address;
use crate::error::{MemoryError, Result};
use crate::traits::Memory;
use crate::value::Value;

/// One operation against a [`Memory`].
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    List,
    Read(Address),
    Write(Address, Value),
    Delete(Address),
    RawWrite(Address, Value),
    RawDelete(Address),
}

impl Op {
    /// The keyword this operation is written with.
    pub fn keyword(&self) -> &'static str {
        match self {
            Op::List => "list",
            Op::Read(_) => "read",
            Op::Write(..) => "write",
            Op::Delete(_) => "delete",
            Op::RawWrite(..) => "raw-write",
            Op::RawDelete(_) => "raw-delete",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::List => f.write_str("list"),
            Op::Read(a) | Op::Delete(a) | Op::RawDelete(a) => write!(f, "{} {a}", self.keyword()),
            Op::Write(a, v) | Op::RawWrite(a, v) => write!(f, "{} {a} {v}", self.keyword()),
        }
    }
}

/// The successful result of one [`Op`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Outcome {
    Listed { entries: Vec<(Address, Value)> },
    Read { address: Address, value: Value },
    Written { target: Address },
    Deleted { target: Address },
    RawWritten { address: Address },
    RawDeleted { address: Address, value: Value },
}

/// Parse one line. Returns `Ok(None)` for blank lines and comments.
///
/// `line_no` is only used in error messages.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Op>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((k, r)) => (k, r.trim()),
        None => (line, ""),
    };

    let parse_err = |reason: String| MemoryError::Parse {
        line: line_no,
        reason,
    };

    let address_only = |rest: &str| -> Result<Address> {
        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(a), None) => Ok(Address::from(a)),
            (None, _) => Err(parse_err(format!("`{keyword}` expects an address"))),
            (Some(_), Some(extra)) => Err(parse_err(format!(
                "`{keyword}` takes one address, found extra `{extra}`"
            ))),
        }
    };

    let address_and_value = |rest: &str| -> Result<(Address, Value)> {
        match rest.split_once(char::is_whitespace) {
            Some((a, v)) if !v.trim().is_empty() => {
                Ok((Address::from(a), Value::from_literal(v)))
            }
            _ => Err(parse_err(format!(
                "`{keyword}` expects an address and a value"
            ))),
        }
    };

    let op = match keyword.to_ascii_lowercase().as_str() {
        "list" => {
            if !rest.is_empty() {
                return Err(parse_err("`list` takes no arguments".into()));
            }
            Op::List
        }
        "read" => Op::Read(address_only(rest)?),
        "write" | "add" => {
            let (a, v) = address_and_value(rest)?;
            Op::Write(a, v)
        }
        "delete" => Op::Delete(address_only(rest)?),
        "raw-write" | "force-write" | "force-add" => {
            let (a, v) = address_and_value(rest)?;
            Op::RawWrite(a, v)
        }
        "raw-delete" | "force-delete" => Op::RawDelete(address_only(rest)?),
        other => return Err(parse_err(format!("unknown operation `{other}`"))),
    };
    Ok(Some(op))
}

/// Parse a whole script. Line numbers in errors start at 1.
pub fn parse_script(text: &str) -> Result<Vec<Op>> {
    let mut ops = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(op) = parse_line(line, index + 1)? {
            ops.push(op);
        }
    }
    Ok(ops)
}

/// Apply one operation.
pub fn run_op<M: Memory + ?Sized>(memory: &mut M, op: &Op) -> Result<Outcome> {
    debug!(op = %op, "running op");
    let outcome = match op {
        Op::List => Outcome::Listed {
            entries: memory.list_all()?,
        },
        Op::Read(address) => Outcome::Read {
            address: address.clone(),
            value: memory.read(address.as_str())?,
        },
        Op::Write(address, value) => Outcome::Written {
            target: memory.write(address.as_str(), value.clone())?,
        },
        Op::Delete(address) => Outcome::Deleted {
            target: memory.delete(address.as_str())?,
        },
        Op::RawWrite(address, value) => {
            memory.raw_write(address.as_str(), value.clone())?;
            Outcome::RawWritten {
                address: address.clone(),
            }
        }
        Op::RawDelete(address) => Outcome::RawDeleted {
            address: address.clone(),
            value: memory.raw_delete(address.as_str())?,
        },
    };
    Ok(outcome)
}

/// Apply operations in order, stopping at the first failure.
pub fn run_script<M: Memory + ?Sized>(memory: &mut M, ops: &[Op]) -> Result<Vec<Outcome>> {
    ops.iter().map(|op| run_op(memory, op)).collect()
}
