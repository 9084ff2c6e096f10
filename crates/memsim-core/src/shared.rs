//! Explicitly shared address spaces.
//!
//! [`SharedAddressSpace`] is a cloneable handle to one [`AddressSpace`] held
//! behind an `Arc<RwLock<_>>`. Every clone observes and mutates the same
//! table, so a process can opt into a single global memory. Each call takes
//! the lock once, which makes every operation atomic with respect to the
//! others; nothing groups several calls into a transaction.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::address::Address;
use crate::chase::Resolution;
use crate::config::SpaceConfig;
use crate::error::{MemoryError, Result};
use crate::space::AddressSpace;
use crate::traits::Memory;
use crate::value::Value;

/// A cloneable handle to an address space shared by every clone.
#[derive(Clone, Debug, Default)]
pub struct SharedAddressSpace {
    inner: Arc<RwLock<AddressSpace>>,
}

impl SharedAddressSpace {
    /// Seed a new shared space. See [`AddressSpace::new`].
    pub fn new(count: usize, default: impl Into<Value>) -> Self {
        Self::from_space(AddressSpace::new(count, default))
    }

    /// Seed a new shared space with an explicit configuration. Fails if
    /// `config` is invalid, as [`AddressSpace::with_config`] does.
    pub fn with_config(
        count: usize,
        default: impl Into<Value>,
        config: SpaceConfig,
    ) -> Result<Self> {
        AddressSpace::with_config(count, default, config).map(Self::from_space)
    }

    /// Move an existing space behind a shared handle.
    pub fn from_space(space: AddressSpace) -> Self {
        Self {
            inner: Arc::new(RwLock::new(space)),
        }
    }

    /// Returns `true` if both handles refer to the same table.
    pub fn same_table(&self, other: &SharedAddressSpace) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this table.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Copy the current table into an independent, owned space.
    pub fn snapshot(&self) -> Result<AddressSpace> {
        Ok(self.read_guard()?.clone())
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, AddressSpace>> {
        self.inner
            .read()
            .map_err(|e| MemoryError::LockPoisoned(e.to_string()))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, AddressSpace>> {
        self.inner
            .write()
            .map_err(|e| MemoryError::LockPoisoned(e.to_string()))
    }
}

impl Memory for SharedAddressSpace {
    fn list_all(&self) -> Result<Vec<(Address, Value)>> {
        Ok(self.read_guard()?.list_all())
    }

    fn read(&self, address: &str) -> Result<Value> {
        self.read_guard()?.read(address).cloned()
    }

    fn resolve(&self, address: &str) -> Result<Resolution> {
        self.read_guard()?.resolve(address)
    }

    fn write(&mut self, address: &str, value: Value) -> Result<Address> {
        self.write_guard()?.write(address, value)
    }

    fn delete(&mut self, address: &str) -> Result<Address> {
        self.write_guard()?.delete(address)
    }

    fn raw_write(&mut self, address: &str, value: Value) -> Result<()> {
        self.write_guard()?.raw_write(address, value);
        Ok(())
    }

    fn raw_delete(&mut self, address: &str) -> Result<Value> {
        self.write_guard()?.raw_delete(address)
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read_guard()?.len())
    }
}
