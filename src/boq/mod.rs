//! Raw BoQ preparation.
//!
//! Site exports arrive with missing quantities, measurement noise, mixed-case
//! ids and the occasional impossible date. The cleaner turns such rows into
//! [`ScheduleItem`](crate::types::ScheduleItem)s the optimizer accepts.

pub mod cleaner;

pub use cleaner::{clean_boq, CleanedBoq, CleaningError, CleaningSummary, DropReason, RawBoqRow};
