//! Core types for the kit optimizer.

pub mod item;
pub mod kit;
pub mod report;

pub use item::{parse_boq_date, ScheduleItem, ValidatedItem, DATE_FORMAT};
pub use kit::KitResult;
pub use report::{OptimizationReport, round2};
