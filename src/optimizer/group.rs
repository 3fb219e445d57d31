//! Per-group optimization.
//!
//! Each group is computed from its own items, the shared epoch and the
//! read-only wear table. Nothing here touches shared mutable state.

use crate::epoch::Epoch;
use crate::grouping::{Group, GroupKey};
use crate::policy::WearLimitTable;
use crate::types::{round2, KitResult};

use super::sweep::{DemandDeltas, DemandInterval};

/// Immutable result of optimizing one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOutcome {
    /// Group identity.
    pub key: GroupKey,
    /// Sum of item quantities.
    pub original_qty: u64,
    /// Largest number of units active on one day.
    pub peak_demand: u64,
    /// Wear limit applied for the group's material.
    pub wear_limit: u32,
    /// `ceil(original_qty / wear_limit)`.
    pub wear_minimum: u64,
    /// `max(peak_demand, wear_minimum)`.
    pub required_qty: u64,
    /// `original_qty / required_qty` rounded to 2 decimals, 0 when nothing is required.
    pub repetition: f64,
    /// Element ids in input order.
    pub elements: Vec<String>,
}

impl GroupOutcome {
    /// Consume into the wire representation.
    pub fn into_kit_result(self) -> KitResult {
        KitResult {
            dimensions: self.key.dimensions(),
            material: self.key.material.clone(),
            required_qty: self.required_qty,
            repetition_count: self.repetition,
            used_in_elements: self.elements,
            key: self.key,
        }
    }
}

/// Repetition factor for a group: how many times each kit is used on average.
pub fn repetition_factor(original_qty: u64, required_qty: u64) -> f64 {
    if required_qty == 0 {
        return 0.0;
    }
    round2(original_qty as f64 / required_qty as f64)
}

/// Optimize one group.
pub fn optimize_group(group: &Group<'_>, epoch: Epoch, limits: &WearLimitTable) -> GroupOutcome {
    let mut deltas = DemandDeltas::new();
    let mut original_qty: u64 = 0;
    let mut elements = Vec::with_capacity(group.items.len());

    for item in &group.items {
        elements.push(item.element_id.clone());
        original_qty += u64::from(item.quantity);
        deltas.add(DemandInterval::new(
            epoch.day_offset(item.start),
            epoch.day_offset(item.end),
            item.quantity,
        ));
    }

    let peak_demand = deltas.peak();
    let wear_limit = limits.limit_for(&group.key.material);
    let wear_minimum = limits.wear_minimum(&group.key.material, original_qty);
    let required_qty = peak_demand.max(wear_minimum);

    GroupOutcome {
        key: group.key.clone(),
        original_qty,
        peak_demand,
        wear_limit,
        wear_minimum,
        required_qty,
        repetition: repetition_factor(original_qty, required_qty),
        elements,
    }
}
