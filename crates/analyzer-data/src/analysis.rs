//! Top-level analysis pipeline for the consumption analyzer.
//!
//! Orchestrates normalization, aggregation and optional period filtering,
//! returning a [`ConsumptionReport`] ready for a presentation layer. The
//! pipeline is re-run in full on every data or filter change; it is a pure
//! function of its inputs.

use analyzer_core::error::Result;
use analyzer_core::models::{
    DailyBreakdown, HourlyAverage, PeakNightSplit, PeriodFilter, RawReading, Reading,
    SummaryStatistics,
};
use chrono::Utc;
use tracing::debug;

use crate::aggregator::ConsumptionAggregator;
use crate::filters::{filter_by_period, FilteredView};
use crate::normalize::normalize;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    /// Number of raw rows submitted.
    pub rows_submitted: usize,
    /// Number of rows excluded during normalization.
    pub rows_excluded: usize,
    /// Wall-clock seconds spent normalizing.
    pub normalize_time_seconds: f64,
    /// Wall-clock seconds spent aggregating and filtering.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_consumption`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConsumptionReport {
    /// The validated reading set the aggregates were computed from.
    pub readings: Vec<Reading>,
    /// Daily totals with the max day annotated (bar chart).
    pub daily: DailyBreakdown,
    /// Hourly averages, sparse over hours with no data (line chart).
    pub hourly: Vec<HourlyAverage>,
    /// Peak/night consumption split (pie chart).
    pub split: PeakNightSplit,
    /// Headline statistics for the full set.
    pub summary: SummaryStatistics,
    /// Period-scoped view, present only when a filter was selected.
    pub filtered: Option<FilteredView>,
    /// Metadata about this run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline over freshly submitted rows.
///
/// 1. Normalize the raw rows, dropping and counting invalid ones.
/// 2. Compute daily totals, hourly averages, peak/night split and summary.
/// 3. Apply the period filter, when one is selected.
///
/// `filter` being `None` means "no filter selected"; a selected filter that
/// matches nothing still yields a (possibly empty) [`FilteredView`] so the
/// caller can tell the two states apart.
pub fn analyze_consumption(
    raw_rows: &[RawReading],
    filter: Option<PeriodFilter>,
) -> Result<ConsumptionReport> {
    let normalize_start = std::time::Instant::now();
    let normalized = normalize(raw_rows)?;
    let normalize_time = normalize_start.elapsed().as_secs_f64();

    let aggregate_start = std::time::Instant::now();
    let readings = normalized.readings;
    let daily = ConsumptionAggregator::daily_totals(&readings);
    let hourly = ConsumptionAggregator::hourly_averages(&readings);
    let split = ConsumptionAggregator::peak_night_split(&readings);
    let summary = ConsumptionAggregator::summary_statistics(&readings);
    let filtered = filter.map(|f| filter_by_period(&readings, f));
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    debug!(
        "Analyzed {} readings ({} excluded) across {} days",
        readings.len(),
        normalized.rejected.len(),
        daily.totals.len()
    );

    Ok(ConsumptionReport {
        readings,
        daily,
        hourly,
        split,
        summary,
        filtered,
        metadata: AnalysisMetadata {
            generated_at: Utc::now().to_rfc3339(),
            rows_submitted: raw_rows.len(),
            rows_excluded: normalized.rejected.len(),
            normalize_time_seconds: normalize_time,
            aggregate_time_seconds: aggregate_time,
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
