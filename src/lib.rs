//! # kit-optima
//!
//! Minimum reusable formwork kit counts for a construction schedule.
//!
//! Given a bill of quantities (BoQ) where every item needs some quantity of
//! a template shape for a date range, the optimizer answers:
//!
//! > How many physical kits of each (material, length, width) must be procured?
//!
//! ## Core Contract
//!
//! For every group of interchangeable items:
//!
//! 1. Never fewer kits than the peak number of units in use on one day
//! 2. Never fewer kits than `ceil(total uses / wear limit)` for the material
//! 3. Exactly `max` of the two
//!
//! ## Architecture
//!
//! ```text
//! BoQ items → validate dates → Epoch → Grouper → GroupOptimizer (parallel) → fold → Report
//!                                                       ↓
//!                                               WearLimitTable (read-only)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same items + same wear table → identical kit plan (see
//!   [`OptimizationReport::plan_fingerprint`])
//! - Item order and task completion order never affect the result
//! - `kit_details` are sorted by group key

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod policy;
pub mod epoch;
pub mod grouping;
pub mod optimizer;
pub mod boq;
pub mod canonical;

#[cfg(feature = "service")]
pub mod service;

// Re-exports
pub use types::{ScheduleItem, ValidatedItem, KitResult, OptimizationReport, DATE_FORMAT};
pub use policy::{WearLimitTable, WearLimitError, DEFAULT_WEAR_LIMIT};
pub use epoch::{Epoch, DateField, validate_items, resolve_epoch};
pub use grouping::{GroupKey, Group, group_items};
pub use optimizer::{
    KitOptimizer, OptimizeError, GroupOutcome, PlanAggregate,
    optimize_kitting, optimize_group, peak_concurrent_demand, DemandInterval,
};
pub use boq::{clean_boq, CleanedBoq, CleaningError, CleaningSummary, RawBoqRow};
pub use canonical::{canonical_hash, canonical_hash_hex};

// Service re-exports (when service feature is enabled)
#[cfg(feature = "service")]
pub use service::{create_router, ServiceState};

/// Service name reported by health checks and logs.
pub const SERVICE_NAME: &str = "kit-optima";
