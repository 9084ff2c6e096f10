//! Addressable-memory simulator.
//!
//! An [`AddressSpace`] maps opaque [`Address`] tokens to [`Value`]s and
//! supports *pointer chasing*: a chased write or delete that lands on a
//! [`Value::Pointer`] follows it, hop by hop, until it reaches a missing key or
//! a raw value, and acts there. Raw operations act on the literal address.
//!
//! # Architecture
//!
//! - Each [`AddressSpace`] owns its table exclusively.
//! - [`SharedAddressSpace`] is the opt-in way to let several handles see one
//!   table.
//! - Chases are bounded: revisiting an address fails with
//!   [`MemoryError::CycleDetected`], and exceeding
//!   [`SpaceConfig::max_hops`] fails with [`MemoryError::DepthExceeded`].
//!
//! # Modules
//!
//! - [`address`]: the [`Address`] token and seeded address format
//! - [`value`]: the tagged [`Value`] type and literal classification
//! - [`chase`]: the bounded pointer walk and its [`Resolution`]
//! - [`space`]: [`AddressSpace`]
//! - [`shared`]: [`SharedAddressSpace`]
//! - [`traits`]: the [`Memory`] operation trait
//! - [`config`]: [`SpaceConfig`], loadable from TOML
//! - [`render`]: text table output
//! - [`script`]: line-oriented operation scripts
//! - [`error`]: [`MemoryError`]

pub mod address;
pub mod chase;
pub mod config;
pub mod error;
pub mod render;
pub mod script;
pub mod shared;
pub mod space;
pub mod traits;
pub mod value;

pub use address::{looks_like_address, Address};
pub use chase::Resolution;
pub use config::SpaceConfig;
pub use error::{MemoryError, Result};
pub use render::{render_entry, render_table};
pub use script::{parse_line, parse_script, run_op, run_script, Op, Outcome};
pub use shared::SharedAddressSpace;
pub use space::AddressSpace;
pub use traits::Memory;
pub use value::Value;
