//! Partition items into interchangeable kit groups.
//!
//! Two items belong to the same group when material matches exactly and
//! length and width agree after rounding to one decimal. Dimensions are
//! stored as integer tenths so keys hash and order exactly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::ValidatedItem;

/// Round a dimension to integer tenths (half away from zero).
pub fn to_tenths(value: f64) -> i64 {
    (value * 10.0).round() as i64
}

/// Identity of a physical kit type.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// Material name (exact match).
    pub material: String,
    /// Length in tenths of a unit.
    pub length_tenths: i64,
    /// Width in tenths of a unit.
    pub width_tenths: i64,
}

impl GroupKey {
    /// Derive the key for an item.
    pub fn of(item: &ValidatedItem) -> Self {
        Self::new(&item.material, item.length, item.width)
    }

    /// Build a key from raw dimensions.
    pub fn new(material: &str, length: f64, width: f64) -> Self {
        Self {
            material: material.to_string(),
            length_tenths: to_tenths(length),
            width_tenths: to_tenths(width),
        }
    }

    /// Rounded length.
    pub fn length(&self) -> f64 {
        self.length_tenths as f64 / 10.0
    }

    /// Rounded width.
    pub fn width(&self) -> f64 {
        self.width_tenths as f64 / 10.0
    }

    /// Display dimensions, e.g. `"2.4x1.2"`.
    pub fn dimensions(&self) -> String {
        format!("{:.1}x{:.1}", self.length(), self.width())
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.material, self.dimensions())
    }
}

/// Items sharing one group key.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    /// Shared key.
    pub key: GroupKey,
    /// Member items, in input order.
    pub items: Vec<&'a ValidatedItem>,
}

/// Partition items by group key.
///
/// Pure function of the item fields. The returned groups carry no ordering
/// guarantee; items keep their input order within a group.
pub fn group_items(items: &[ValidatedItem]) -> Vec<Group<'_>> {
    let mut buckets: HashMap<GroupKey, Vec<&ValidatedItem>> = HashMap::new();
    for item in items {
        buckets.entry(GroupKey::of(item)).or_default().push(item);
    }

    buckets
        .into_iter()
        .map(|(key, items)| Group { key, items })
        .collect()
}
