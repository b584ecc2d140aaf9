//! Period filtering: scoped subsets of readings with their own aggregates.

use analyzer_core::models::{DailyBreakdown, PeriodFilter, Reading, SummaryStatistics};
use serde::{Deserialize, Serialize};

use crate::aggregator::ConsumptionAggregator;

/// A period-scoped subset of readings plus its recomputed aggregates.
///
/// An empty view is an informational state ("filter selected but nothing
/// matched"), never an error; the caller distinguishes "no filter selected"
/// by not building a view at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredView {
    /// The filter that produced this view.
    pub filter: PeriodFilter,
    /// Readings inside the period, in the original order.
    pub readings: Vec<Reading>,
    /// Summary statistics scoped to the subset.
    pub summary: SummaryStatistics,
    /// Daily totals scoped to the subset.
    pub daily: DailyBreakdown,
}

impl FilteredView {
    /// Whether the filter matched nothing.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Select the readings inside `filter`'s period and compute their aggregates
/// by the same rules as the full set.
pub fn filter_by_period(readings: &[Reading], filter: PeriodFilter) -> FilteredView {
    let subset: Vec<Reading> = readings
        .iter()
        .filter(|r| filter.matches(r.day))
        .cloned()
        .collect();

    let summary = ConsumptionAggregator::summary_statistics(&subset);
    let daily = ConsumptionAggregator::daily_totals(&subset);

    FilteredView {
        filter,
        readings: subset,
        summary,
        daily,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_reading(ts: &str, kwh: f64) -> Reading {
        Reading::new(ts.parse().unwrap(), kwh, 0.5)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample() -> Vec<Reading> {
        vec![
            make_reading("2024-01-15T08:00:00", 5.0),
            make_reading("2024-01-15T20:00:00", 3.0),
            make_reading("2024-01-18T08:00:00", 2.0),
            make_reading("2024-01-25T08:00:00", 7.0),
            make_reading("2024-02-01T08:00:00", 4.0),
            make_reading("2023-01-15T08:00:00", 9.0),
        ]
    }

    #[test]
    fn test_day_filter_returns_exactly_matching_rows() {
        let view = filter_by_period(&sample(), PeriodFilter::Day(date("2024-01-15")));
        assert_eq!(view.readings.len(), 2);
        assert!(view.readings.iter().all(|r| r.day == date("2024-01-15")));
        assert!((view.summary.total_consumption_kwh - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_day_filter_no_match_is_empty_view() {
        let view = filter_by_period(&sample(), PeriodFilter::Day(date("2024-03-01")));
        assert!(view.is_empty());
        assert!((view.summary.total_consumption_kwh - 0.0).abs() < 1e-9);
        assert!(view.daily.totals.is_empty());
    }

    #[test]
    fn test_week_filter_window() {
        let view = filter_by_period(&sample(), PeriodFilter::Week(date("2024-01-15")));
        // Jan 15 and Jan 18 are inside [15, 21]; Jan 25 is not.
        assert_eq!(view.readings.len(), 3);
        assert!((view.summary.total_consumption_kwh - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_week_contains_day_and_stays_within_window() {
        let readings = sample();
        let anchor = date("2024-01-15");
        let day_view = filter_by_period(&readings, PeriodFilter::Day(anchor));
        let week_view = filter_by_period(&readings, PeriodFilter::Week(anchor));

        for r in &day_view.readings {
            assert!(week_view.readings.contains(r));
        }
        for r in &week_view.readings {
            let offset = (r.day - anchor).num_days();
            assert!((0..=6).contains(&offset));
        }
    }

    #[test]
    fn test_month_filter_excludes_other_years() {
        let view = filter_by_period(&sample(), PeriodFilter::Month(date("2024-01-01")));
        // January 2024 rows only; the January 2023 row stays out.
        assert_eq!(view.readings.len(), 4);
        assert!((view.summary.total_consumption_kwh - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_filtered_view_recomputes_daily_average() {
        let view = filter_by_period(&sample(), PeriodFilter::Week(date("2024-01-15")));
        // Two days in the window: 8.0 on the 15th, 2.0 on the 18th.
        assert!((view.summary.average_daily_kwh - 5.0).abs() < 1e-9);
        assert_eq!(view.daily.totals.len(), 2);
        assert_eq!(view.daily.max_day.as_ref().unwrap().day, date("2024-01-15"));
    }
}
