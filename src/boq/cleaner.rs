//! BoQ cleaning pipeline.
//!
//! Steps, in order:
//! 1. Impute a missing quantity as 1
//! 2. Drop rows missing length, width or either date
//! 3. Normalize `element_id` (trim, uppercase)
//! 4. Snap length and width to one decimal
//! 5. Drop rows with unparsable dates or `end < start`
//! 6. Drop rows with non-positive dimensions
//! 7. Derive `area_sqm` and `duration_days`

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grouping::to_tenths;
use crate::types::{parse_boq_date, round2, ScheduleItem, DATE_FORMAT};

/// Errors raised by the cleaner.
#[derive(Debug, thiserror::Error)]
pub enum CleaningError {
    /// No rows were submitted.
    #[error("No BoQ rows submitted")]
    EmptyInput,
}

/// One row as exported from a site spreadsheet. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBoqRow {
    /// Element identifier.
    #[serde(default)]
    pub element_id: String,
    /// Material name.
    #[serde(default)]
    pub material: String,
    /// Template length.
    pub length: Option<f64>,
    /// Template width.
    pub width: Option<f64>,
    /// Units required; imputed as 1 when missing.
    pub quantity: Option<u32>,
    /// Start date, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// End date, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

/// Why a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Length, width or a date was missing.
    MissingField,
    /// A date did not parse.
    InvalidDate,
    /// End date precedes start date.
    ReversedRange,
    /// Length or width was zero or negative after snapping.
    NonPositiveDimension,
}

/// Summary of a cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Rows received.
    pub total_rows: usize,
    /// Rows dropped.
    pub dropped_rows: usize,
    /// Dropped row counts by reason.
    pub dropped_by_reason: BTreeMap<DropReason, usize>,
    /// Rows whose quantity was imputed.
    pub imputed_quantities: usize,
    /// Σ area × quantity over kept rows, rounded to 2 decimals.
    pub total_formwork_area_sqm: f64,
    /// Distinct materials among kept rows, sorted.
    pub materials: Vec<String>,
}

/// Cleaned items plus the run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedBoq {
    /// Items ready for optimization.
    pub items: Vec<ScheduleItem>,
    /// What the cleaner did.
    pub summary: CleaningSummary,
}

fn snap(value: f64) -> f64 {
    to_tenths(value) as f64 / 10.0
}

/// Surrounding whitespace is a spreadsheet artifact and is stripped; the
/// date itself must still be strict `YYYY-MM-DD`.
fn parse(value: &str) -> Option<NaiveDate> {
    parse_boq_date(value.trim())
}

fn clean_row(row: &RawBoqRow) -> Result<ScheduleItem, DropReason> {
    let (length, width, start_raw, end_raw) =
        match (row.length, row.width, &row.start_date, &row.end_date) {
            (Some(l), Some(w), Some(s), Some(e)) if l.is_finite() && w.is_finite() => (l, w, s, e),
            _ => return Err(DropReason::MissingField),
        };

    let (start, end) = match (parse(start_raw), parse(end_raw)) {
        (Some(s), Some(e)) => (s, e),
        _ => return Err(DropReason::InvalidDate),
    };
    if end < start {
        return Err(DropReason::ReversedRange);
    }

    let length = snap(length);
    let width = snap(width);
    if length <= 0.0 || width <= 0.0 {
        return Err(DropReason::NonPositiveDimension);
    }

    Ok(ScheduleItem {
        element_id: row.element_id.trim().to_uppercase(),
        material: row.material.trim().to_string(),
        length,
        width,
        quantity: row.quantity.unwrap_or(1),
        start_date: start.format(DATE_FORMAT).to_string(),
        end_date: end.format(DATE_FORMAT).to_string(),
        area_sqm: Some((length * width * 1000.0).round() / 1000.0),
        duration_days: Some((end - start).num_days()),
    })
}

/// Clean raw BoQ rows.
pub fn clean_boq(rows: &[RawBoqRow]) -> Result<CleanedBoq, CleaningError> {
    if rows.is_empty() {
        return Err(CleaningError::EmptyInput);
    }

    let mut items = Vec::with_capacity(rows.len());
    let mut summary = CleaningSummary {
        total_rows: rows.len(),
        ..CleaningSummary::default()
    };
    let mut materials = BTreeSet::new();
    let mut area = 0.0;

    for row in rows {
        match clean_row(row) {
            Ok(item) => {
                if row.quantity.is_none() {
                    summary.imputed_quantities += 1;
                }
                area += item.area_sqm.unwrap_or(0.0) * f64::from(item.quantity);
                materials.insert(item.material.clone());
                items.push(item);
            }
            Err(reason) => {
                debug!(element_id = %row.element_id, ?reason, "Dropping BoQ row");
                summary.dropped_rows += 1;
                *summary.dropped_by_reason.entry(reason).or_default() += 1;
            }
        }
    }

    summary.total_formwork_area_sqm = round2(area);
    summary.materials = materials.into_iter().collect();

    Ok(CleanedBoq { items, summary })
}
