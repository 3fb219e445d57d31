//! Reduction of per-group outcomes and report assembly.
//!
//! Parallel tasks only ever produce immutable [`GroupOutcome`]s. The totals
//! and kit list are built afterwards by a single-threaded fold, so the two
//! running totals and the result list can never disagree.

use std::time::Duration;

use crate::types::report::format_execution_time;
use crate::types::{round2, KitResult, OptimizationReport};

use super::group::GroupOutcome;

/// Running totals plus the collected kit lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanAggregate {
    /// Sum of original quantities.
    pub original_total: u64,
    /// Sum of required kit counts.
    pub optimized_total: u64,
    /// One line per group.
    pub kits: Vec<KitResult>,
}

impl PlanAggregate {
    /// Empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one group outcome into the totals.
    pub fn absorb(&mut self, outcome: GroupOutcome) {
        self.original_total += outcome.original_qty;
        self.optimized_total += outcome.required_qty;
        self.kits.push(outcome.into_kit_result());
    }

    /// Fold every outcome.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = GroupOutcome>,
    {
        outcomes.into_iter().fold(Self::new(), |mut acc, outcome| {
            acc.absorb(outcome);
            acc
        })
    }

    /// Overall repetition factor, 0 when no kits are required.
    pub fn total_repetition(&self) -> f64 {
        if self.optimized_total == 0 {
            return 0.0;
        }
        round2(self.original_total as f64 / self.optimized_total as f64)
    }

    /// Percentage of units saved by reuse, 0 when there was no demand.
    pub fn cost_savings_percent(&self) -> f64 {
        if self.original_total == 0 {
            return 0.0;
        }
        let saved = self.original_total as f64 - self.optimized_total as f64;
        round2(saved / self.original_total as f64 * 100.0)
    }

    /// Build the final report. Kit lines are sorted by group key.
    pub fn into_report(mut self, elapsed: Duration) -> OptimizationReport {
        self.kits.sort_by(|a, b| a.key.cmp(&b.key));
        OptimizationReport {
            original_total_items: self.original_total,
            optimized_total_kits: self.optimized_total,
            total_repetition: self.total_repetition(),
            cost_savings_percent: self.cost_savings_percent(),
            execution_time_ms: format_execution_time(elapsed),
            kit_details: self.kits,
            elapsed,
        }
    }
}
