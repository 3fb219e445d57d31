//! Date validation and project epoch ("day 0") resolution.
//!
//! Every date field of every item is parsed in one pass before any grouping
//! or parallel work starts. A single bad date fails the whole batch.

use chrono::NaiveDate;

use crate::optimizer::OptimizeError;
use crate::types::{parse_boq_date, ScheduleItem, ValidatedItem};

/// Which date field of an item failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// `start_date`
    Start,
    /// `end_date`
    End,
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start_date"),
            Self::End => write!(f, "end_date"),
        }
    }
}

/// Earliest start date of a batch; day offsets are measured from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(NaiveDate);

impl Epoch {
    /// Wrap a date as the epoch.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The epoch date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Whole days from the epoch to `date` (negative before the epoch).
    pub fn day_offset(&self, date: NaiveDate) -> i64 {
        (date - self.0).num_days()
    }
}

/// Parse one BoQ date.
pub fn parse_date(
    element_id: &str,
    field: DateField,
    value: &str,
) -> Result<NaiveDate, OptimizeError> {
    parse_boq_date(value).ok_or_else(|| OptimizeError::InvalidDate {
        element_id: element_id.to_string(),
        field,
        value: value.to_string(),
    })
}

/// Parse and check the dates of every item, failing fast on the first error.
///
/// Start dates are checked across the whole batch first, so a bad start date
/// is always reported ahead of a bad end date elsewhere.
pub fn validate_items(items: &[ScheduleItem]) -> Result<Vec<ValidatedItem>, OptimizeError> {
    if items.is_empty() {
        return Err(OptimizeError::EmptyInput);
    }

    let starts = items
        .iter()
        .map(|item| parse_date(&item.element_id, DateField::Start, &item.start_date))
        .collect::<Result<Vec<_>, _>>()?;

    items
        .iter()
        .zip(starts)
        .map(|(item, start)| -> Result<ValidatedItem, OptimizeError> {
            let end = parse_date(&item.element_id, DateField::End, &item.end_date)?;
            if end < start {
                return Err(OptimizeError::InvalidDateRange {
                    element_id: item.element_id.clone(),
                    start,
                    end,
                });
            }
            Ok(ValidatedItem {
                element_id: item.element_id.clone(),
                material: item.material.clone(),
                length: item.length,
                width: item.width,
                quantity: item.quantity,
                start,
                end,
            })
        })
        .collect()
}

/// Earliest start date across the batch, or `None` for an empty batch.
pub fn resolve_epoch(items: &[ValidatedItem]) -> Option<Epoch> {
    items.iter().map(|item| item.start).min().map(Epoch::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DATE_FORMAT;

    fn item(id: &str, start: &str, end: &str) -> ScheduleItem {
        ScheduleItem::new(id, "Steel", 2.4, 1.2, 5, start, end)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_epoch_is_earliest_start() {
        let items = vec![
            item("A", "2026-03-10", "2026-03-12"),
            item("B", "2026-03-01", "2026-03-30"),
            item("C", "2026-04-01", "2026-04-01"),
        ];
        let validated = validate_items(&items).unwrap();
        let epoch = resolve_epoch(&validated).unwrap();

        assert_eq!(epoch.date(), date("2026-03-01"));
        assert_eq!(epoch.day_offset(date("2026-03-10")), 9);
        assert_eq!(epoch.day_offset(date("2026-04-01")), 31);
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(validate_items(&[]), Err(OptimizeError::EmptyInput)));
        assert!(resolve_epoch(&[]).is_none());
    }

    #[test]
    fn test_bad_start_date_names_element() {
        let items = vec![
            item("GOOD", "2026-03-01", "2026-03-02"),
            item("BAD-7", "03/01/2026", "2026-03-02"),
        ];

        match validate_items(&items) {
            Err(OptimizeError::InvalidDate { element_id, field, value }) => {
                assert_eq!(element_id, "BAD-7");
                assert_eq!(field, DateField::Start);
                assert_eq!(value, "03/01/2026");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_end_date_fails_fast() {
        let items = vec![item("E-1", "2026-03-01", "2026-02-30")];
        assert!(matches!(
            validate_items(&items),
            Err(OptimizeError::InvalidDate { field: DateField::End, .. })
        ));
    }

    #[test]
    fn test_start_errors_reported_before_end_errors() {
        let items = vec![
            item("END-BAD", "2026-03-01", "nope"),
            item("START-BAD", "nope", "2026-03-02"),
        ];
        match validate_items(&items) {
            Err(OptimizeError::InvalidDate { element_id, .. }) => assert_eq!(element_id, "START-BAD"),
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_non_canonical_dates_rejected() {
        for bad in ["2026-3-1", " 2026-03-01 ", "+2026-03-01", "2026-03-1"] {
            let items = vec![item("LOOSE", bad, "2026-03-10")];
            assert!(
                matches!(
                    validate_items(&items),
                    Err(OptimizeError::InvalidDate { field: DateField::Start, .. })
                ),
                "accepted start date {:?}",
                bad
            );

            let items = vec![item("LOOSE", "2026-03-01", bad)];
            assert!(
                matches!(
                    validate_items(&items),
                    Err(OptimizeError::InvalidDate { field: DateField::End, .. })
                ),
                "accepted end date {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_reversed_range_rejected() {
        let items = vec![item("R-1", "2026-03-05", "2026-03-01")];
        assert!(matches!(
            validate_items(&items),
            Err(OptimizeError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_single_day_range_accepted() {
        let items = vec![item("S-1", "2026-03-05", "2026-03-05")];
        let validated = validate_items(&items).unwrap();
        assert_eq!(validated[0].start, validated[0].end);
    }
}
