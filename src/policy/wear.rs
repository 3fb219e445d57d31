//! Wear limits: how many pours a physical kit survives, per material.
//!
//! The table is plain configuration. New materials are added through JSON,
//! never through code:
//!
//! ```json
//! { "default_limit": 10, "materials": { "Aluform": 100, "Plywood": 15 } }
//! ```
//!
//! Material lookup is exact and case-sensitive.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;

/// Reuse limit for materials without an override ("standard" formwork).
pub const DEFAULT_WEAR_LIMIT: u32 = 10;

/// Errors raised while loading a wear-limit table.
#[derive(Debug, thiserror::Error)]
pub enum WearLimitError {
    /// The table file could not be read.
    #[error("Failed to read wear-limit table {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The table is not valid JSON of the expected shape.
    #[error("Invalid wear-limit table: {0}")]
    Parse(#[from] serde_json::Error),
    /// A limit of zero would make every kit unusable.
    #[error("Wear limit for '{material}' must be at least 1")]
    ZeroLimit {
        /// Offending material (`"default"` for the fallback limit).
        material: String,
    },
}

/// Material name to wear limit, with one documented default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WearLimitTable {
    /// Limit applied to materials not listed in `materials`.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    /// Per-material overrides.
    #[serde(default)]
    pub materials: BTreeMap<String, u32>,
}

fn default_limit() -> u32 {
    DEFAULT_WEAR_LIMIT
}

impl WearLimitTable {
    /// Create a table with only a default limit.
    pub fn new(default_limit: u32) -> Self {
        Self {
            default_limit,
            materials: BTreeMap::new(),
        }
    }

    /// Builder-style override registration.
    pub fn with_material(mut self, material: impl Into<String>, limit: u32) -> Self {
        self.materials.insert(material.into(), limit);
        self
    }

    /// Register or replace a material override.
    pub fn insert(&mut self, material: impl Into<String>, limit: u32) {
        self.materials.insert(material.into(), limit);
    }

    /// Wear limit for a material, falling back to the default.
    pub fn limit_for(&self, material: &str) -> u32 {
        self.materials
            .get(material)
            .copied()
            .unwrap_or(self.default_limit)
    }

    /// Fewest kits such that round-robin use keeps every kit within its limit.
    ///
    /// `ceil(total_quantity / limit)`, independent of time overlap.
    pub fn wear_minimum(&self, material: &str, total_quantity: u64) -> u64 {
        let limit = u64::from(self.limit_for(material).max(1));
        total_quantity.div_ceil(limit)
    }

    /// Number of material overrides.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True when no overrides are configured.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Hash of the table, logged at startup so runs can be tied to a config.
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }

    /// Reject zero limits.
    pub fn validate(&self) -> Result<(), WearLimitError> {
        if self.default_limit == 0 {
            return Err(WearLimitError::ZeroLimit {
                material: "default".to_string(),
            });
        }
        if let Some((material, _)) = self.materials.iter().find(|(_, limit)| **limit == 0) {
            return Err(WearLimitError::ZeroLimit {
                material: material.clone(),
            });
        }
        Ok(())
    }

    /// Parse and validate a table from JSON.
    pub fn from_json(json: &str) -> Result<Self, WearLimitError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load and validate a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WearLimitError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WearLimitError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from environment variables.
    ///
    /// `KIT_WEAR_LIMITS` (inline JSON) wins over `KIT_WEAR_LIMITS_PATH`.
    /// Falls back to the built-in table when neither is set.
    pub fn from_env() -> Result<Self, WearLimitError> {
        match std::env::var("KIT_WEAR_LIMITS") {
            Ok(json) if !json.trim().is_empty() => return Self::from_json(&json),
            _ => {}
        }
        match std::env::var("KIT_WEAR_LIMITS_PATH") {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for WearLimitTable {
    /// Built-in limits: rigid aluminium systems last far longer than
    /// standard formwork, plywood sits just above it.
    fn default() -> Self {
        Self::new(DEFAULT_WEAR_LIMIT)
            .with_material("Aluform", 100)
            .with_material("Plywood", 15)
    }
}
