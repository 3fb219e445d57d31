//! Peak concurrent demand via an interval sweep.
//!
//! Each interval contributes `+quantity` on its first day and `-quantity` on
//! the day after its last day (end dates are inclusive). Scanning the deltas
//! in day order and tracking the running total yields the largest number of
//! units active on any single day.

use std::collections::BTreeMap;

/// One demand interval in epoch-relative days, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandInterval {
    /// First day of use.
    pub start_day: i64,
    /// Last day of use.
    pub end_day: i64,
    /// Units in use every day of the interval.
    pub quantity: u32,
}

impl DemandInterval {
    /// Create an interval.
    pub fn new(start_day: i64, end_day: i64, quantity: u32) -> Self {
        Self {
            start_day,
            end_day,
            quantity,
        }
    }
}

/// Sparse day-indexed demand deltas, kept in ascending day order.
#[derive(Debug, Clone, Default)]
pub struct DemandDeltas {
    deltas: BTreeMap<i64, i64>,
}

impl DemandDeltas {
    /// Empty delta map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an interval.
    pub fn add(&mut self, interval: DemandInterval) {
        let quantity = i64::from(interval.quantity);
        *self.deltas.entry(interval.start_day).or_insert(0) += quantity;
        *self.deltas.entry(interval.end_day + 1).or_insert(0) -= quantity;
    }

    /// Days whose net delta is nonzero, ascending.
    pub fn change_days(&self) -> Vec<i64> {
        self.deltas
            .iter()
            .filter(|(_, delta)| **delta != 0)
            .map(|(day, _)| *day)
            .collect()
    }

    /// Maximum running total over a left-to-right scan.
    pub fn peak(&self) -> u64 {
        let mut active: i64 = 0;
        let mut peak: i64 = 0;
        for delta in self.deltas.values().filter(|d| **d != 0) {
            active += delta;
            peak = peak.max(active);
        }
        peak.max(0) as u64
    }
}

/// Peak number of units simultaneously required by a set of intervals.
pub fn peak_concurrent_demand<I>(intervals: I) -> u64
where
    I: IntoIterator<Item = DemandInterval>,
{
    let mut deltas = DemandDeltas::new();
    for interval in intervals {
        deltas.add(interval);
    }
    deltas.peak()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i64, end: i64, qty: u32) -> DemandInterval {
        DemandInterval::new(start, end, qty)
    }

    #[test]
    fn test_disjoint_intervals_take_max() {
        assert_eq!(peak_concurrent_demand([iv(0, 4, 5), iv(10, 14, 8)]), 8);
    }

    #[test]
    fn test_full_overlap_sums() {
        assert_eq!(peak_concurrent_demand([iv(0, 9, 5), iv(0, 9, 5)]), 10);
    }

    #[test]
    fn test_end_day_is_inclusive() {
        // Second interval starts on the first one's last day: they overlap.
        assert_eq!(peak_concurrent_demand([iv(0, 5, 3), iv(5, 8, 4)]), 7);
    }

    #[test]
    fn test_back_to_back_do_not_overlap() {
        assert_eq!(peak_concurrent_demand([iv(0, 5, 3), iv(6, 8, 4)]), 4);
    }

    #[test]
    fn test_nested_intervals() {
        assert_eq!(
            peak_concurrent_demand([iv(0, 20, 2), iv(5, 10, 3), iv(7, 8, 4)]),
            9
        );
    }

    #[test]
    fn test_staggered_chain() {
        // 0..3 and 2..5 overlap on days 2-3; 4..6 overlaps only the second.
        assert_eq!(
            peak_concurrent_demand([iv(0, 3, 1), iv(2, 5, 2), iv(4, 6, 4)]),
            6
        );
    }

    #[test]
    fn test_zero_quantity_and_empty() {
        assert_eq!(peak_concurrent_demand([iv(0, 3, 0)]), 0);
        assert_eq!(peak_concurrent_demand(std::iter::empty()), 0);
    }

    #[test]
    fn test_change_days_skip_cancelled_deltas() {
        let mut deltas = DemandDeltas::new();
        deltas.add(iv(0, 4, 5));
        deltas.add(iv(5, 9, 5));
        // Day 5 has -5 and +5: net zero.
        assert_eq!(deltas.change_days(), vec![0, 10]);
        assert_eq!(deltas.peak(), 5);
    }
}
