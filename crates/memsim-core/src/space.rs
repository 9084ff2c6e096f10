//! The [`AddressSpace`] table.
//!
//! Each `AddressSpace` exclusively owns its table; two spaces never observe
//! each other's writes. Use [`SharedAddressSpace`] when several handles must
//! see the same table.
//!
//! [`SharedAddressSpace`]: crate::shared::SharedAddressSpace

use indexmap::IndexMap;
use tracing::debug;

use crate::address::Address;
use crate::chase::{self, Resolution};
use crate::config::SpaceConfig;
use crate::error::{MemoryError, Result};
use crate::traits::Memory;
use crate::value::Value;

/// An insertion-ordered table from [`Address`] to [`Value`] with
/// pointer-chasing writes and deletes.
#[derive(Clone, Debug)]
pub struct AddressSpace {
    table: IndexMap<Address, Value>,
    initial_size: usize,
    config: SpaceConfig,
}

impl AddressSpace {
    /// Create a space seeded with `count` addresses (`0x0000`, `0x0001`, ...)
    /// all holding `default`.
    pub fn new(count: usize, default: impl Into<Value>) -> Self {
        Self::seeded(count, default.into(), SpaceConfig::default())
    }

    /// Like [`AddressSpace::new`] but with an explicit configuration.
    ///
    /// Fails with [`MemoryError::Config`] if `config` does not pass
    /// [`SpaceConfig::validate`].
    pub fn with_config(
        count: usize,
        default: impl Into<Value>,
        config: SpaceConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::seeded(count, default.into(), config))
    }

    fn seeded(count: usize, default: Value, config: SpaceConfig) -> Self {
        let mut space = Self {
            table: IndexMap::with_capacity(count),
            initial_size: count,
            config,
        };
        space.create(count, default);
        space
    }

    /// Populate the seeded addresses. Generated keys overwrite existing ones.
    fn create(&mut self, count: usize, default: Value) {
        let width = self.config.address_width;
        for index in 0..count {
            self.table
                .insert(Address::indexed(index, width), default.clone());
        }
        debug!(count, width, "seeded address space");
    }

    /// Number of addresses the space was seeded with.
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Current number of addresses.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no addresses exist.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns `true` if `address` holds a value.
    pub fn contains(&self, address: &str) -> bool {
        self.table.contains_key(address)
    }

    /// The configuration this space was created with.
    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    /// All (address, value) pairs in insertion order. No chasing.
    pub fn list_all(&self) -> Vec<(Address, Value)> {
        self.table
            .iter()
            .map(|(address, value)| (address.clone(), value.clone()))
            .collect()
    }

    /// Borrowing iterator over the table in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Value)> {
        self.table.iter()
    }

    /// The value stored at exactly `address`. No chasing.
    pub fn read(&self, address: &str) -> Result<&Value> {
        self.table
            .get(address)
            .ok_or_else(|| MemoryError::not_found(&Address::from(address)))
    }

    /// Chase pointers from `address` without changing anything.
    pub fn resolve(&self, address: &str) -> Result<Resolution> {
        chase::resolve(&self.table, &Address::from(address), self.config.max_hops)
    }

    /// Chase pointers from `address`, then store `value` at the target.
    ///
    /// Creates the target if the chase ended on a missing key. Leaves the
    /// table untouched if the chase fails.
    pub fn write(&mut self, address: &str, value: impl Into<Value>) -> Result<Address> {
        let resolution = self.resolve(address)?;
        debug!(
            start = address,
            target = %resolution.target,
            hops = resolution.hops(),
            "chased write"
        );
        self.table.insert(resolution.target.clone(), value.into());
        Ok(resolution.target)
    }

    /// Chase pointers from `address`, then remove the target.
    ///
    /// Fails with [`MemoryError::AddressNotFound`] if the chase ended on a
    /// missing key. Pointers elsewhere that named the removed address are left
    /// dangling.
    pub fn delete(&mut self, address: &str) -> Result<Address> {
        let resolution = self.resolve(address)?;
        if !resolution.exists {
            return Err(MemoryError::not_found(&resolution.target));
        }
        debug!(
            start = address,
            target = %resolution.target,
            hops = resolution.hops(),
            "chased delete"
        );
        self.table.shift_remove(&resolution.target);
        Ok(resolution.target)
    }

    /// Store `value` at exactly `address`. Never chases, never fails.
    pub fn raw_write(&mut self, address: &str, value: impl Into<Value>) {
        self.table.insert(Address::from(address), value.into());
    }

    /// Remove exactly `address`. Never chases.
    pub fn raw_delete(&mut self, address: &str) -> Result<Value> {
        self.table
            .shift_remove(address)
            .ok_or_else(|| MemoryError::not_found(&Address::from(address)))
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new(0, Value::default())
    }
}

impl Memory for AddressSpace {
    fn list_all(&self) -> Result<Vec<(Address, Value)>> {
        Ok(AddressSpace::list_all(self))
    }

    fn read(&self, address: &str) -> Result<Value> {
        AddressSpace::read(self, address).cloned()
    }

    fn resolve(&self, address: &str) -> Result<Resolution> {
        AddressSpace::resolve(self, address)
    }

    fn write(&mut self, address: &str, value: Value) -> Result<Address> {
        AddressSpace::write(self, address, value)
    }

    fn delete(&mut self, address: &str) -> Result<Address> {
        AddressSpace::delete(self, address)
    }

    fn raw_write(&mut self, address: &str, value: Value) -> Result<()> {
        AddressSpace::raw_write(self, address, value);
        Ok(())
    }

    fn raw_delete(&mut self, address: &str) -> Result<Value> {
        AddressSpace::raw_delete(self, address)
    }

    fn len(&self) -> Result<usize> {
        Ok(AddressSpace::len(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ---- Construction ----

    #[test]
    fn seeds_count_addresses_in_order() {
        let space = AddressSpace::new(3, 0);
        let all = space.list_all();
        assert_eq!(
            all,
            vec![
                (Address::from("0x0000"), Value::from(0)),
                (Address::from("0x0001"), Value::from(0)),
                (Address::from("0x0002"), Value::from(0)),
            ]
        );
        assert_eq!(space.initial_size(), 3);
    }

    #[test]
    fn empty_space() {
        let space = AddressSpace::new(0, 0);
        assert!(space.is_empty());
        assert!(space.list_all().is_empty());
    }

    #[test]
    fn custom_width() {
        let config = SpaceConfig {
            address_width: 2,
            ..SpaceConfig::default()
        };
        let space = AddressSpace::with_config(2, "x", config).unwrap();
        assert!(space.contains("0x00"));
        assert!(space.contains("0x01"));
    }

    proptest! {
        #[test]
        fn construction_yields_count_default_entries(count in 0usize..300, default in any::<i64>()) {
            let space = AddressSpace::new(count, default);
            let all = space.list_all();
            prop_assert_eq!(all.len(), count);
            for (index, (address, value)) in all.iter().enumerate() {
                prop_assert_eq!(address.as_str(), format!("0x{index:04}"));
                prop_assert_eq!(value, &Value::from(default));
            }
        }
    }

    #[test]
    fn wide_indices_are_not_truncated() {
        let space = AddressSpace::new(10_001, 0);
        let (last, _) = space.iter().last().unwrap();
        assert_eq!(last.as_str(), "0x10000");
        assert!(space.contains("0x9999"));
    }

    // ---- Read ----

    #[test]
    fn read_missing_address() {
        let space = AddressSpace::new(1, 0);
        let err = space.read("0xFFFF").unwrap_err();
        assert!(matches!(err, MemoryError::AddressNotFound { .. }));
    }

    #[test]
    fn read_does_not_chase() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", Value::pointer("0xB"));
        space.raw_write("0xB", 5);
        assert_eq!(space.read("0xA").unwrap(), &Value::pointer("0xB"));
    }

    // ---- Chased write ----

    #[test]
    fn write_follows_pointer_chain() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xAAAA", Value::pointer("0xBBBB"));
        space.raw_write("0xBBBB", 42);

        let target = space.write("0xAAAA", 99).unwrap();
        assert_eq!(target, Address::from("0xBBBB"));
        assert_eq!(space.read("0xBBBB").unwrap(), &Value::from(99));
        assert_eq!(space.read("0xAAAA").unwrap(), &Value::pointer("0xBBBB"));
    }

    #[test]
    fn write_cycle_fails_without_mutation() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", Value::pointer("0xB"));
        space.raw_write("0xB", Value::pointer("0xA"));
        let before = space.list_all();

        let err = space.write("0xA", 1).unwrap_err();
        assert!(
            matches!(err, MemoryError::CycleDetected { .. }),
            "expected CycleDetected, got: {err}"
        );
        assert_eq!(space.list_all(), before);
    }

    #[test]
    fn write_chases_through_string_address() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xAAAA", "0xBBBB");
        space.raw_write("0xBBBB", 42);

        let target = space.write("0xAAAA", 99).unwrap();
        assert_eq!(target, Address::from("0xBBBB"));
        assert_eq!(space.read("0xBBBB").unwrap(), &Value::from(99));
        assert_eq!(space.read("0xAAAA").unwrap(), &Value::from("0xBBBB"));
    }

    #[test]
    fn string_address_cycle_is_detected() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", "0xB");
        space.raw_write("0xB", "0xA");
        let err = space.write("0xA", 1).unwrap_err();
        assert!(
            matches!(err, MemoryError::CycleDetected { .. }),
            "expected CycleDetected, got: {err}"
        );
    }

    #[test]
    fn explicit_text_is_not_chased() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", Value::text("0xB"));
        space.raw_write("0xB", 1);
        assert_eq!(space.write("0xA", 2).unwrap(), Address::from("0xA"));
        assert_eq!(space.read("0xB").unwrap(), &Value::from(1));
    }

    #[test]
    fn with_config_rejects_zero_limits() {
        let zero_hops = SpaceConfig {
            max_hops: 0,
            ..SpaceConfig::default()
        };
        let err = AddressSpace::with_config(0, 0, zero_hops).unwrap_err();
        assert!(matches!(err, MemoryError::Config(_)));

        let zero_width = SpaceConfig {
            address_width: 0,
            ..SpaceConfig::default()
        };
        let err = AddressSpace::with_config(3, 0, zero_width).unwrap_err();
        assert!(matches!(err, MemoryError::Config(_)));
    }

    #[test]
    fn write_stops_at_non_pointer() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xC", "notapointer");
        space.write("0xC", 5).unwrap();
        assert_eq!(space.read("0xC").unwrap(), &Value::from(5));
    }

    #[test]
    fn write_to_new_address_creates_it() {
        let mut space = AddressSpace::new(2, 0);
        space.write("scratch", "hello").unwrap();
        assert_eq!(space.len(), 3);
        let (last, value) = space.iter().last().unwrap();
        assert_eq!(last.as_str(), "scratch");
        assert_eq!(value, &Value::text("hello"));
    }

    #[test]
    fn write_through_dangling_pointer_creates_target() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", Value::pointer("0xNEW"));
        let target = space.write("0xA", 7).unwrap();
        assert_eq!(target, Address::from("0xNEW"));
        assert_eq!(space.read("0xNEW").unwrap(), &Value::from(7));
    }

    #[test]
    fn write_can_store_a_pointer() {
        let mut space = AddressSpace::new(2, 0);
        space.write("0x0000", Value::pointer("0x0001")).unwrap();
        space.write("0x0000", 3).unwrap();
        assert_eq!(space.read("0x0001").unwrap(), &Value::from(3));
        assert_eq!(space.read("0x0000").unwrap(), &Value::pointer("0x0001"));
    }

    #[test]
    fn write_depth_limit() {
        let config = SpaceConfig::default().with_max_hops(2);
        let mut space = AddressSpace::with_config(0, 0, config).unwrap();
        space.raw_write("0x1", Value::pointer("0x2"));
        space.raw_write("0x2", Value::pointer("0x3"));
        space.raw_write("0x3", Value::pointer("0x4"));
        space.raw_write("0x4", 0);

        let err = space.write("0x1", 9).unwrap_err();
        assert!(matches!(err, MemoryError::DepthExceeded { limit: 2, .. }));
        assert!(space.write("0x2", 9).is_ok());
    }

    // ---- Chased delete ----

    #[test]
    fn delete_never_written_address() {
        let mut space = AddressSpace::new(4, 0);
        let err = space.delete("0xZZZZ").unwrap_err();
        match err {
            MemoryError::AddressNotFound { address } => {
                assert_eq!(address, Address::from("0xZZZZ"))
            }
            other => panic!("expected AddressNotFound, got: {other}"),
        }
    }

    #[test]
    fn delete_follows_chain_and_keeps_pointer() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", Value::pointer("0xB"));
        space.raw_write("0xB", 1);

        let removed = space.delete("0xA").unwrap();
        assert_eq!(removed, Address::from("0xB"));
        assert!(!space.contains("0xB"));
        assert_eq!(space.read("0xA").unwrap(), &Value::pointer("0xB"));
    }

    #[test]
    fn delete_through_dangling_pointer_fails() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", Value::pointer("0xB"));
        space.raw_write("0xB", 1);
        space.delete("0xA").unwrap();

        let err = space.delete("0xA").unwrap_err();
        match err {
            MemoryError::AddressNotFound { address } => assert_eq!(address, Address::from("0xB")),
            other => panic!("expected AddressNotFound, got: {other}"),
        }
    }

    #[test]
    fn delete_cycle() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", Value::pointer("0xB"));
        space.raw_write("0xB", Value::pointer("0xA"));
        let err = space.delete("0xB").unwrap_err();
        assert!(matches!(err, MemoryError::CycleDetected { .. }));
        assert_eq!(space.len(), 2);
    }

    #[test]
    fn delete_preserves_order_of_remaining() {
        let mut space = AddressSpace::new(4, 0);
        space.delete("0x0001").unwrap();
        let keys: Vec<String> = space
            .list_all()
            .into_iter()
            .map(|(a, _)| a.into_string())
            .collect();
        assert_eq!(keys, vec!["0x0000", "0x0002", "0x0003"]);
    }

    // ---- Raw operations ----

    #[test]
    fn raw_delete_then_read() {
        let mut space = AddressSpace::new(2, 0);
        assert_eq!(space.raw_delete("0x0001").unwrap(), Value::from(0));
        let err = space.read("0x0001").unwrap_err();
        assert!(matches!(err, MemoryError::AddressNotFound { .. }));
    }

    #[test]
    fn raw_delete_missing() {
        let mut space = AddressSpace::new(0, 0);
        let err = space.raw_delete("0xA").unwrap_err();
        assert!(matches!(err, MemoryError::AddressNotFound { .. }));
    }

    #[test]
    fn raw_operations_ignore_pointers() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", Value::pointer("0xB"));
        space.raw_write("0xB", 1);

        space.raw_write("0xA", 2);
        assert_eq!(space.read("0xA").unwrap(), &Value::from(2));
        assert_eq!(space.read("0xB").unwrap(), &Value::from(1));

        space.raw_write("0xA", Value::pointer("0xB"));
        space.raw_delete("0xA").unwrap();
        assert!(!space.contains("0xA"));
        assert!(space.contains("0xB"));
    }

    #[test]
    fn raw_write_is_idempotent() {
        let mut once = AddressSpace::new(2, 0);
        once.raw_write("0x0001", "v");
        let mut twice = AddressSpace::new(2, 0);
        twice.raw_write("0x0001", "v");
        twice.raw_write("0x0001", "v");
        assert_eq!(once.list_all(), twice.list_all());
    }

    // ---- Ownership ----

    #[test]
    fn spaces_do_not_share_tables() {
        let mut first = AddressSpace::new(2, 0);
        let second = AddressSpace::new(2, 0);
        first.raw_write("0x0000", 100);
        first.raw_write("extra", 1);

        assert_eq!(second.read("0x0000").unwrap(), &Value::from(0));
        assert!(!second.contains("extra"));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn resolve_reports_path() {
        let mut space = AddressSpace::new(0, 0);
        space.raw_write("0xA", Value::pointer("0xB"));
        let r = space.resolve("0xA").unwrap();
        assert_eq!(r.target, Address::from("0xB"));
        assert!(!r.exists);
        assert_eq!(r.hops(), 1);
    }
}
