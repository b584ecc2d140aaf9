//! Aggregation of validated readings into the derived chart views.

use std::collections::BTreeMap;

use analyzer_core::models::{
    DailyBreakdown, DailyTotal, HourlyAverage, PeakNightSplit, Reading, SummaryStatistics,
};

/// Stateless helper that groups readings by calendar period.
///
/// Every function is a pure, total computation over its input slice: an
/// empty slice yields empty/zero results, never an error or a NaN.
pub struct ConsumptionAggregator;

impl ConsumptionAggregator {
    /// Sum consumption per day, ascending, and single out the maximum day.
    ///
    /// Ties on the maximum resolve to the first day in ascending order.
    pub fn daily_totals(readings: &[Reading]) -> DailyBreakdown {
        // BTreeMap for automatically sorted days.
        let mut map: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
        for reading in readings {
            *map.entry(reading.day).or_insert(0.0) += reading.consumption_kwh;
        }

        let totals: Vec<DailyTotal> = map
            .into_iter()
            .map(|(day, total_kwh)| DailyTotal { day, total_kwh })
            .collect();

        let mut max_day: Option<DailyTotal> = None;
        for total in &totals {
            let is_new_max = match &max_day {
                None => true,
                Some(current) => total.total_kwh > current.total_kwh,
            };
            if is_new_max {
                max_day = Some(total.clone());
            }
        }

        DailyBreakdown { totals, max_day }
    }

    /// Mean consumption per hour of day, ascending by hour.
    ///
    /// Hours with no readings are omitted rather than synthesized as zero;
    /// consumers must handle sparse hour coverage.
    pub fn hourly_averages(readings: &[Reading]) -> Vec<HourlyAverage> {
        let mut map: BTreeMap<u32, (f64, u32)> = BTreeMap::new();
        for reading in readings {
            let (sum, count) = map.entry(reading.hour).or_insert((0.0, 0));
            *sum += reading.consumption_kwh;
            *count += 1;
        }

        map.into_iter()
            .map(|(hour, (sum, count))| HourlyAverage {
                hour,
                average_kwh: sum / f64::from(count),
            })
            .collect()
    }

    /// Split total consumption between the fixed peak and night windows.
    pub fn peak_night_split(readings: &[Reading]) -> PeakNightSplit {
        let mut split = PeakNightSplit::default();
        for reading in readings {
            if reading.is_peak() {
                split.peak_kwh += reading.consumption_kwh;
            } else {
                split.night_kwh += reading.consumption_kwh;
            }
        }
        split
    }

    /// Headline totals plus the mean of per-day sums.
    ///
    /// The average is computed from the same daily grouping that feeds the
    /// daily chart, so the two can never disagree.
    pub fn summary_statistics(readings: &[Reading]) -> SummaryStatistics {
        let total_consumption_kwh: f64 = readings.iter().map(|r| r.consumption_kwh).sum();
        let total_cost: f64 = readings.iter().map(|r| r.cost).sum();

        let daily = Self::daily_totals(readings);
        let days = daily.totals.len();
        let average_daily_kwh = if days == 0 {
            0.0
        } else {
            daily.totals.iter().map(|t| t.total_kwh).sum::<f64>() / days as f64
        };

        SummaryStatistics {
            total_consumption_kwh,
            total_cost,
            average_daily_kwh,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
