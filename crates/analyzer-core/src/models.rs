use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

// ── Peak-hour policy ──────────────────────────────────────────────────────────

/// First hour of the peak window (inclusive).
pub const PEAK_START_HOUR: u32 = 6;
/// Last hour of the peak window (inclusive), i.e. peak ends at 18:59.
pub const PEAK_END_HOUR: u32 = 18;

/// Whether `hour` (0–23) falls inside the fixed peak window.
///
/// The 06:00–18:59 boundary is a policy constant, not configurable.
pub fn is_peak_hour(hour: u32) -> bool {
    (PEAK_START_HOUR..=PEAK_END_HOUR).contains(&hour)
}

// ── RawReading ────────────────────────────────────────────────────────────────

/// One raw row as assembled by an ingestion path, before validation.
///
/// Both the CSV reader and the manual-entry form produce this shape. All
/// fields are optional strings: a CSV may carry a combined `Date/Time` column
/// or separate `Date` and `Time` columns, and cost may be absent entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReading {
    /// Combined date+time string, when the source has a single column.
    pub timestamp: Option<String>,
    /// Date string, when the source splits date and time.
    pub date: Option<String>,
    /// Time string accompanying `date`; absent means midnight.
    pub time: Option<String>,
    /// Consumption value in kWh as entered.
    pub consumption: Option<String>,
    /// Cost value as entered; absent defaults to 0.
    pub cost: Option<String>,
}

impl RawReading {
    /// Assemble one manual-entry form row into the raw shape.
    ///
    /// The form collects typed values; they are rendered back to strings so
    /// that manual rows flow through exactly the same validation as CSV rows.
    pub fn manual(date: NaiveDate, time: NaiveTime, consumption_kwh: f64, cost: f64) -> Self {
        Self {
            timestamp: None,
            date: Some(date.format("%Y-%m-%d").to_string()),
            time: Some(time.format("%H:%M:%S").to_string()),
            consumption: Some(consumption_kwh.to_string()),
            cost: Some(cost.to_string()),
        }
    }
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// One validated consumption observation with its derived calendar fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Local timestamp of the observation.
    pub timestamp: NaiveDateTime,
    /// Calendar date derived from `timestamp`.
    pub day: NaiveDate,
    /// Hour of day (0–23) derived from `timestamp`.
    pub hour: u32,
    /// Energy consumed, in kWh. Never negative.
    pub consumption_kwh: f64,
    /// Cost of the consumption. Never negative; 0 when the source had none.
    pub cost: f64,
}

impl Reading {
    /// Build a reading, deriving `day` and `hour` from the timestamp.
    pub fn new(timestamp: NaiveDateTime, consumption_kwh: f64, cost: f64) -> Self {
        Self {
            timestamp,
            day: timestamp.date(),
            hour: timestamp.hour(),
            consumption_kwh,
            cost,
        }
    }

    /// Whether this reading falls inside the fixed peak window.
    pub fn is_peak(&self) -> bool {
        is_peak_hour(self.hour)
    }

    /// Project back to the raw-row shape, e.g. for re-editing in a form.
    ///
    /// Normalizing the result yields this reading again, unchanged.
    pub fn to_raw(&self) -> RawReading {
        RawReading {
            timestamp: Some(self.timestamp.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            date: None,
            time: None,
            consumption: Some(self.consumption_kwh.to_string()),
            cost: Some(self.cost.to_string()),
        }
    }
}

// ── Aggregate outputs ─────────────────────────────────────────────────────────

/// Summed consumption for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// The day being summed.
    pub day: NaiveDate,
    /// Total consumption for that day, in kWh.
    pub total_kwh: f64,
}

/// Daily totals in ascending day order, with the highest-consumption day
/// singled out for chart annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    /// One entry per distinct day present in the data, ascending.
    pub totals: Vec<DailyTotal>,
    /// The day with the maximum total. Ties resolve to the earliest day.
    /// `None` when there is no data.
    pub max_day: Option<DailyTotal>,
}

/// Mean consumption for one hour of day, across all days in the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyAverage {
    /// Hour of day, 0–23.
    pub hour: u32,
    /// Arithmetic mean consumption over all readings at this hour, in kWh.
    pub average_kwh: f64,
}

/// Total consumption split between the fixed peak and night windows.
///
/// The two buckets partition the data exhaustively: every reading lands in
/// exactly one, so `peak_kwh + night_kwh` equals the overall total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakNightSplit {
    /// Consumption during peak hours (06:00–18:59), in kWh.
    pub peak_kwh: f64,
    /// Consumption during night hours, in kWh.
    pub night_kwh: f64,
}

impl PeakNightSplit {
    /// Sum of both buckets.
    pub fn total_kwh(&self) -> f64 {
        self.peak_kwh + self.night_kwh
    }
}

/// Headline figures for a reading set or a filtered subset of one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Sum of consumption over all readings, in kWh.
    pub total_consumption_kwh: f64,
    /// Sum of cost over all readings.
    pub total_cost: f64,
    /// Mean of the per-day consumption sums, in kWh.
    ///
    /// This is *not* the mean of per-row values; the two differ whenever
    /// days carry unequal numbers of readings. Zero for an empty set.
    pub average_daily_kwh: f64,
}

// ── PeriodFilter ──────────────────────────────────────────────────────────────

/// Selects a subset of readings by calendar period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "anchor", rename_all = "lowercase")]
pub enum PeriodFilter {
    /// Readings on exactly this day.
    Day(NaiveDate),
    /// Readings within the 7-day window starting at this day, inclusive.
    Week(NaiveDate),
    /// Readings within the calendar month (and year) of this day.
    Month(NaiveDate),
}

impl PeriodFilter {
    /// Whether `day` falls inside the selected period.
    pub fn matches(&self, day: NaiveDate) -> bool {
        use chrono::Datelike;
        match *self {
            PeriodFilter::Day(anchor) => day == anchor,
            PeriodFilter::Week(start) => {
                let end = start
                    .checked_add_days(chrono::Days::new(6))
                    .unwrap_or(NaiveDate::MAX);
                day >= start && day <= end
            }
            PeriodFilter::Month(anchor) => {
                day.year() == anchor.year() && day.month() == anchor.month()
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_peak_hour_boundaries() {
        assert!(!is_peak_hour(5));
        assert!(is_peak_hour(6));
        assert!(is_peak_hour(12));
        assert!(is_peak_hour(18));
        assert!(!is_peak_hour(19));
        assert!(!is_peak_hour(0));
        assert!(!is_peak_hour(23));
    }

    #[test]
    fn test_reading_derives_day_and_hour() {
        let ts = "2024-01-15T08:30:00".parse().unwrap();
        let reading = Reading::new(ts, 5.0, 1.25);
        assert_eq!(reading.day, date("2024-01-15"));
        assert_eq!(reading.hour, 8);
        assert!(reading.is_peak());
    }

    #[test]
    fn test_reading_at_night() {
        let ts = "2024-01-15T20:00:00".parse().unwrap();
        let reading = Reading::new(ts, 3.0, 0.0);
        assert!(!reading.is_peak());
    }

    #[test]
    fn test_manual_row_shape() {
        let raw = RawReading::manual(
            date("2024-03-01"),
            NaiveTime::from_hms_opt(7, 15, 0).unwrap(),
            2.5,
            0.8,
        );
        assert_eq!(raw.date.as_deref(), Some("2024-03-01"));
        assert_eq!(raw.time.as_deref(), Some("07:15:00"));
        assert_eq!(raw.consumption.as_deref(), Some("2.5"));
        assert_eq!(raw.cost.as_deref(), Some("0.8"));
        assert!(raw.timestamp.is_none());
    }

    #[test]
    fn test_day_filter_matches_only_anchor() {
        let filter = PeriodFilter::Day(date("2024-01-15"));
        assert!(filter.matches(date("2024-01-15")));
        assert!(!filter.matches(date("2024-01-16")));
    }

    #[test]
    fn test_week_filter_is_seven_days_inclusive() {
        let filter = PeriodFilter::Week(date("2024-01-15"));
        assert!(filter.matches(date("2024-01-15")));
        assert!(filter.matches(date("2024-01-21")));
        assert!(!filter.matches(date("2024-01-22")));
        assert!(!filter.matches(date("2024-01-14")));
    }

    #[test]
    fn test_month_filter_respects_year() {
        let filter = PeriodFilter::Month(date("2024-01-10"));
        assert!(filter.matches(date("2024-01-01")));
        assert!(filter.matches(date("2024-01-31")));
        assert!(!filter.matches(date("2024-02-01")));
        // Same month of a different year does not match.
        assert!(!filter.matches(date("2023-01-15")));
    }

    #[test]
    fn test_peak_night_split_total() {
        let split = PeakNightSplit {
            peak_kwh: 7.0,
            night_kwh: 3.0,
        };
        assert!((split.total_kwh() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_period_filter_serde_round_trip() {
        let filter = PeriodFilter::Week(date("2024-01-15"));
        let json = serde_json::to_string(&filter).unwrap();
        let back: PeriodFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(filter, back);
    }
}
