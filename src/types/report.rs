//! Aggregate optimization report.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use super::kit::KitResult;

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a duration as milliseconds with microsecond precision, e.g. `"1.204 ms"`.
pub fn format_execution_time(elapsed: Duration) -> String {
    format!("{:.3} ms", elapsed.as_micros() as f64 / 1000.0)
}

/// Result of one optimization run across all groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Sum of item quantities across all groups.
    #[serde(rename = "original_boq_items")]
    pub original_total_items: u64,
    /// Sum of per-group required kit counts.
    #[serde(rename = "optimized_kits_required")]
    pub optimized_total_kits: u64,
    /// `original / optimized`, rounded to 2 decimals (0 when nothing is required).
    #[serde(rename = "total_repetition_factor")]
    pub total_repetition: f64,
    /// `(original - optimized) / original * 100`, rounded to 2 decimals.
    #[serde(rename = "estimated_cost_savings_percent")]
    pub cost_savings_percent: f64,
    /// Wall-clock time of the run, e.g. `"0.412 ms"`.
    pub execution_time_ms: String,
    /// Per-group kit requirements, sorted by group key.
    pub kit_details: Vec<KitResult>,
    /// Raw elapsed time behind `execution_time_ms`.
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Canonical view of one kit line used for fingerprinting.
#[derive(Serialize)]
struct FingerprintLine<'a> {
    material: &'a str,
    dimensions: &'a str,
    required_qty: u64,
    elements: Vec<String>,
}

impl OptimizationReport {
    /// Find the kit line for a material and display dimensions.
    pub fn kit(&self, material: &str, dimensions: &str) -> Option<&KitResult> {
        self.kit_details
            .iter()
            .find(|k| k.material == material && k.dimensions == dimensions)
    }

    /// Deterministic hash of the kit plan.
    ///
    /// Independent of item order, task completion order and timing.
    pub fn plan_fingerprint(&self) -> String {
        let mut lines: Vec<FingerprintLine<'_>> = self
            .kit_details
            .iter()
            .map(|k| FingerprintLine {
                material: &k.material,
                dimensions: &k.dimensions,
                required_qty: k.required_qty,
                elements: k.sorted_elements(),
            })
            .collect();
        lines.sort_by(|a, b| (a.material, a.dimensions).cmp(&(b.material, b.dimensions)));
        canonical_hash_hex(&lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(3.333_333), 3.33);
    }

    #[test]
    fn test_format_execution_time() {
        assert_eq!(format_execution_time(Duration::from_micros(1204)), "1.204 ms");
        assert_eq!(format_execution_time(Duration::ZERO), "0.000 ms");
    }

    #[test]
    fn test_wire_field_names() {
        let report = OptimizationReport {
            original_total_items: 10,
            optimized_total_kits: 4,
            total_repetition: 2.5,
            cost_savings_percent: 60.0,
            execution_time_ms: "0.100 ms".to_string(),
            kit_details: vec![],
            elapsed: Duration::from_micros(100),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["original_boq_items"], 10);
        assert_eq!(value["optimized_kits_required"], 4);
        assert_eq!(value["total_repetition_factor"], 2.5);
        assert_eq!(value["estimated_cost_savings_percent"], 60.0);
        assert_eq!(value["execution_time_ms"], "0.100 ms");
        assert!(value.get("elapsed").is_none());
    }
}
