//! The [`Memory`] trait: the operation surface shared by owned and shared
//! address spaces.

use crate::address::Address;
use crate::chase::Resolution;
use crate::error::Result;
use crate::value::Value;

/// Operations on an address table.
///
/// Implemented by [`AddressSpace`] (exclusively owned) and
/// [`SharedAddressSpace`] (one table behind many handles), so callers such as
/// the script runner work with either.
///
/// [`AddressSpace`]: crate::space::AddressSpace
/// [`SharedAddressSpace`]: crate::shared::SharedAddressSpace
pub trait Memory {
    /// All (address, value) pairs in insertion order.
    fn list_all(&self) -> Result<Vec<(Address, Value)>>;

    /// The value at exactly `address`, without chasing.
    fn read(&self, address: &str) -> Result<Value>;

    /// Chase from `address` without changing anything.
    fn resolve(&self, address: &str) -> Result<Resolution>;

    /// Chase from `address` and store `value` at the target.
    /// Returns the address that was written.
    fn write(&mut self, address: &str, value: Value) -> Result<Address>;

    /// Chase from `address` and remove the target.
    /// Returns the address that was removed.
    fn delete(&mut self, address: &str) -> Result<Address>;

    /// Store `value` at exactly `address`.
    fn raw_write(&mut self, address: &str, value: Value) -> Result<()>;

    /// Remove exactly `address`, returning its value.
    fn raw_delete(&mut self, address: &str) -> Result<Value>;

    /// Current number of addresses.
    fn len(&self) -> Result<usize>;

    /// Returns `true` if no addresses exist.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
