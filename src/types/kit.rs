//! Per-group optimization output.

use serde::{Deserialize, Serialize};

use crate::grouping::GroupKey;

/// Kit requirement for one (material, length, width) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitResult {
    /// Display dimensions, `"{length:.1}x{width:.1}"`.
    pub dimensions: String,
    /// Material shared by every item in the group.
    pub material: String,
    /// Kits to procure: max of peak demand and wear-limit minimum.
    pub required_qty: u64,
    /// Total group demand divided by `required_qty`, rounded to 2 decimals.
    pub repetition_count: f64,
    /// Element ids that draw from this kit type, in input order.
    pub used_in_elements: Vec<String>,
    /// Group key, used for deterministic ordering.
    #[serde(skip)]
    pub key: GroupKey,
}

impl KitResult {
    /// Element ids sorted, for order-insensitive comparisons.
    pub fn sorted_elements(&self) -> Vec<String> {
        let mut elements = self.used_in_elements.clone();
        elements.sort();
        elements
    }
}
