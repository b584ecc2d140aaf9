use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;
use tracing::warn;

use crate::models::{RawReading, Reading};

// ── TimestampProcessor ────────────────────────────────────────────────────────

/// Parses timestamps from the variety of string shapes an ingestion path can
/// hand over: one combined date+time field, or separate date and time fields.
pub struct TimestampProcessor;

impl TimestampProcessor {
    /// Parse a combined date+time string into a naive local [`NaiveDateTime`].
    ///
    /// Tries a series of common patterns; a date-only string maps to
    /// midnight. A trailing `Z` is tolerated and stripped — timestamps are
    /// treated as local wall-clock time throughout. Returns `None` for
    /// anything unrecognised, never panics.
    pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let s = s.strip_suffix('Z').unwrap_or(s);

        const FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%d/%m/%Y %H:%M:%S",
            "%m/%d/%Y %H:%M:%S",
            "%d/%m/%Y %H:%M",
            "%m/%d/%Y %H:%M",
        ];

        for fmt in FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }

        // Date-only input: midnight of that day.
        if let Some(date) = Self::parse_date(s) {
            return Some(date.and_time(NaiveTime::MIN));
        }

        warn!("TimestampProcessor: could not parse timestamp string \"{}\"", s);
        None
    }

    /// Parse a date-only string.
    pub fn parse_date(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];
        for fmt in FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Some(date);
            }
        }
        None
    }

    /// Parse a time-of-day string.
    pub fn parse_time(s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        const FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];
        for fmt in FORMATS {
            if let Ok(time) = NaiveTime::parse_from_str(s, fmt) {
                return Some(time);
            }
        }
        None
    }

    /// Combine separate date and time fields into one timestamp.
    ///
    /// A missing time means midnight; a present-but-unparseable time fails
    /// the whole combination rather than silently defaulting.
    pub fn combine(date: &str, time: Option<&str>) -> Option<NaiveDateTime> {
        let date = Self::parse_date(date)?;
        let time = match time {
            Some(t) => Self::parse_time(t)?,
            None => NaiveTime::MIN,
        };
        Some(date.and_time(time))
    }
}

// ── NumberProcessor ───────────────────────────────────────────────────────────

/// Parses numeric fields from raw row strings.
pub struct NumberProcessor;

impl NumberProcessor {
    /// Parse a finite real number. `None` for non-numeric or NaN/inf input,
    /// so a bad value can never poison a downstream sum.
    pub fn parse(s: &str) -> Option<f64> {
        s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

// ── RowValidator ──────────────────────────────────────────────────────────────

/// Why a raw row was rejected during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// Neither a combined timestamp nor a date field was present.
    #[error("row has no timestamp or date field")]
    MissingTimestamp,
    /// The timestamp (or date/time pair) did not parse.
    #[error("unparseable timestamp: {0}")]
    InvalidTimestamp(String),
    /// No consumption value was present.
    #[error("row has no consumption value")]
    MissingConsumption,
    /// The consumption value was not a finite number.
    #[error("unparseable consumption value: {0}")]
    InvalidConsumption(String),
    /// The consumption value was negative.
    #[error("negative consumption value: {0}")]
    NegativeConsumption(String),
    /// The cost value was not a finite number.
    #[error("unparseable cost value: {0}")]
    InvalidCost(String),
    /// The cost value was negative.
    #[error("negative cost value: {0}")]
    NegativeCost(String),
}

/// Validates one [`RawReading`] into a typed [`Reading`] or a typed rejection.
pub struct RowValidator;

impl RowValidator {
    /// Validate a raw row.
    ///
    /// Timestamp resolution prefers the combined field; otherwise the
    /// date/time pair is used, with a missing time meaning midnight. The
    /// consumption value is required and must be a non-negative finite
    /// number; cost is optional and defaults to 0.
    pub fn validate(raw: &RawReading) -> Result<Reading, RejectReason> {
        let timestamp = if let Some(ts) = non_empty(&raw.timestamp) {
            TimestampProcessor::parse_datetime(ts)
                .ok_or_else(|| RejectReason::InvalidTimestamp(ts.to_string()))?
        } else if let Some(date) = non_empty(&raw.date) {
            let time = non_empty(&raw.time);
            TimestampProcessor::combine(date, time).ok_or_else(|| {
                RejectReason::InvalidTimestamp(match time {
                    Some(t) => format!("{date} {t}"),
                    None => date.to_string(),
                })
            })?
        } else {
            return Err(RejectReason::MissingTimestamp);
        };

        let raw_consumption = non_empty(&raw.consumption).ok_or(RejectReason::MissingConsumption)?;
        let consumption_kwh = NumberProcessor::parse(raw_consumption)
            .ok_or_else(|| RejectReason::InvalidConsumption(raw_consumption.to_string()))?;
        if consumption_kwh < 0.0 {
            return Err(RejectReason::NegativeConsumption(raw_consumption.to_string()));
        }

        let cost = match non_empty(&raw.cost) {
            None => 0.0,
            Some(raw_cost) => {
                let cost = NumberProcessor::parse(raw_cost)
                    .ok_or_else(|| RejectReason::InvalidCost(raw_cost.to_string()))?;
                if cost < 0.0 {
                    return Err(RejectReason::NegativeCost(raw_cost.to_string()));
                }
                cost
            }
        };

        Ok(Reading::new(timestamp, consumption_kwh, cost))
    }
}

/// Treat absent and whitespace-only fields identically.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
