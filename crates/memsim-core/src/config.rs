//! Address-space configuration.
//!
//! [`SpaceConfig`] controls how seeded addresses are formatted and how far a
//! chase may go. It can be built in code or loaded from a TOML file; missing
//! keys fall back to their defaults. Every constructor that accepts a config
//! runs [`SpaceConfig::validate`] first.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::address::DEFAULT_ADDRESS_WIDTH;
use crate::error::{MemoryError, Result};

/// Default bound on the number of pointers a single chase may follow.
pub const DEFAULT_MAX_HOPS: usize = 1024;

/// Configuration for an address space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    /// Minimum number of digits in seeded addresses (`0x0000` at width 4).
    pub address_width: usize,
    /// Maximum pointers a chase may follow before failing.
    pub max_hops: usize,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            address_width: DEFAULT_ADDRESS_WIDTH,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl SpaceConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SpaceConfig =
            toml::from_str(text).map_err(|e| MemoryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check that `address_width` and `max_hops` are both at least 1.
    pub fn validate(&self) -> Result<()> {
        if self.address_width == 0 {
            return Err(MemoryError::Config(
                "address_width must be at least 1".into(),
            ));
        }
        if self.max_hops == 0 {
            return Err(MemoryError::Config("max_hops must be at least 1".into()));
        }
        Ok(())
    }

    /// Same configuration with a different hop limit.
    pub fn with_max_hops(self, max_hops: usize) -> Self {
        Self { max_hops, ..self }
    }
}
