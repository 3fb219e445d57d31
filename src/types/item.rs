//! Bill-of-quantities schedule items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar format for all BoQ dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a BoQ date in exactly `YYYY-MM-DD` form.
///
/// Unpadded fields, a signed year and surrounding whitespace are rejected:
/// the value must be ten characters and round-trip through [`DATE_FORMAT`].
pub fn parse_boq_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == value).then_some(date)
}

/// One BoQ entry as submitted by the caller.
///
/// Dates are kept as raw strings; they are parsed once during validation
/// (see [`crate::epoch::validate_items`]) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Element identifier (unique per item).
    pub element_id: String,
    /// Material name; selects the wear-limit policy.
    pub material: String,
    /// Template length.
    pub length: f64,
    /// Template width (same unit as length).
    pub width: f64,
    /// Units simultaneously required by this item.
    pub quantity: u32,
    /// First day of use, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day of use (inclusive), `YYYY-MM-DD`.
    pub end_date: String,
    /// Plan area, if the cleaning pipeline derived it. Ignored by the optimizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_sqm: Option<f64>,
    /// Duration in days, if the cleaning pipeline derived it. Ignored by the optimizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
}

impl ScheduleItem {
    /// Create an item without the derived cleaning fields.
    pub fn new(
        element_id: impl Into<String>,
        material: impl Into<String>,
        length: f64,
        width: f64,
        quantity: u32,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            material: material.into(),
            length,
            width,
            quantity,
            start_date: start_date.into(),
            end_date: end_date.into(),
            area_sqm: None,
            duration_days: None,
        }
    }
}

/// A schedule item whose dates have been parsed and checked.
///
/// Produced only by validation, so every downstream stage can rely on
/// `start <= end`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem {
    /// Element identifier.
    pub element_id: String,
    /// Material name.
    pub material: String,
    /// Template length.
    pub length: f64,
    /// Template width.
    pub width: f64,
    /// Units simultaneously required.
    pub quantity: u32,
    /// Parsed start date.
    pub start: NaiveDate,
    /// Parsed end date (inclusive).
    pub end: NaiveDate,
}
