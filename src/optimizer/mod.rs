//! Kit optimizer.
//!
//! ## Pipeline
//!
//! ```text
//! items → validate dates → epoch → group → [optimize_group ‖ ...] → fold → report
//! ```
//!
//! Validation and epoch resolution finish before any parallel work starts.
//! Groups are optimized on a rayon pool with no cross-group dependency;
//! the fold runs only after every group task has returned.

pub mod aggregate;
pub mod group;
pub mod sweep;

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::epoch::{resolve_epoch, validate_items, DateField};
use crate::grouping::group_items;
use crate::policy::WearLimitTable;
use crate::types::{OptimizationReport, ScheduleItem};

pub use aggregate::PlanAggregate;
pub use group::{optimize_group, repetition_factor, GroupOutcome};
pub use sweep::{peak_concurrent_demand, DemandDeltas, DemandInterval};

/// Error type for optimizer operations.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    /// No items were submitted.
    #[error("No BoQ items submitted")]
    EmptyInput,
    /// A date field does not match `YYYY-MM-DD`.
    #[error("Invalid {field} format for {element_id}: '{value}'")]
    InvalidDate {
        /// Offending element.
        element_id: String,
        /// Which field failed.
        field: DateField,
        /// Raw value as submitted.
        value: String,
    },
    /// End date before start date.
    #[error("end_date {end} is before start_date {start} for {element_id}")]
    InvalidDateRange {
        /// Offending element.
        element_id: String,
        /// Parsed start date.
        start: NaiveDate,
        /// Parsed end date.
        end: NaiveDate,
    },
}

impl OptimizeError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::InvalidDate { .. } => "INVALID_DATE",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
        }
    }

    /// Element the error refers to, if any.
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Self::EmptyInput => None,
            Self::InvalidDate { element_id, .. } | Self::InvalidDateRange { element_id, .. } => {
                Some(element_id)
            }
        }
    }
}

/// Computes minimum kit counts for a BoQ schedule.
#[derive(Debug, Clone)]
pub struct KitOptimizer {
    limits: Arc<WearLimitTable>,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl KitOptimizer {
    /// Optimizer using the global rayon pool.
    pub fn new(limits: Arc<WearLimitTable>) -> Self {
        Self { limits, pool: None }
    }

    /// Optimizer running group tasks on a dedicated pool.
    pub fn with_pool(limits: Arc<WearLimitTable>, pool: Arc<rayon::ThreadPool>) -> Self {
        Self {
            limits,
            pool: Some(pool),
        }
    }

    /// The wear table in use.
    pub fn limits(&self) -> &WearLimitTable {
        &self.limits
    }

    /// Run the full optimization.
    ///
    /// Fails before any group work when a date is invalid; no partial result
    /// is ever returned.
    pub fn optimize(&self, items: &[ScheduleItem]) -> Result<OptimizationReport, OptimizeError> {
        let started = Instant::now();

        let validated = validate_items(items)?;
        let epoch = resolve_epoch(&validated).ok_or(OptimizeError::EmptyInput)?;
        let groups = group_items(&validated);

        debug!(
            items = validated.len(),
            groups = groups.len(),
            epoch = %epoch.date(),
            "BoQ validated and grouped"
        );

        let limits = self.limits.as_ref();
        let run = || -> Vec<GroupOutcome> {
            groups
                .par_iter()
                .map(|group| optimize_group(group, epoch, limits))
                .collect()
        };
        let outcomes = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let group_count = outcomes.len();
        let report = PlanAggregate::from_outcomes(outcomes).into_report(started.elapsed());

        info!(
            target: "kit_optima::metrics",
            metric_type = "optimization",
            items = items.len(),
            groups = group_count,
            original_boq_items = report.original_total_items,
            optimized_kits_required = report.optimized_total_kits,
            savings_percent = report.cost_savings_percent,
            plan_fingerprint = %report.plan_fingerprint(),
            latency_us = report.elapsed.as_micros() as u64,
            "optimization_metric"
        );

        Ok(report)
    }
}

impl Default for KitOptimizer {
    fn default() -> Self {
        Self::new(Arc::new(WearLimitTable::default()))
    }
}

/// One-shot optimization with an explicit wear table.
pub fn optimize_kitting(
    items: &[ScheduleItem],
    limits: &WearLimitTable,
) -> Result<OptimizationReport, OptimizeError> {
    KitOptimizer::new(Arc::new(limits.clone())).optimize(items)
}
