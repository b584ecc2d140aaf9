//! Normalization of raw rows into validated readings.
//!
//! Every ingestion path funnels through [`normalize`]: rows that validate
//! become [`Reading`]s with derived `day`/`hour` fields, rows that fail are
//! dropped and reported with a typed reason, and a non-empty input that
//! yields nothing at all becomes a hard error.

use analyzer_core::data_processors::{RejectReason, RowValidator};
use analyzer_core::error::{AnalyzerError, Result};
use analyzer_core::models::{RawReading, Reading};
use tracing::{debug, warn};

/// One dropped row with its position in the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// Zero-based index of the row in the submitted input.
    pub index: usize,
    /// Why validation rejected it.
    pub reason: RejectReason,
}

/// Output of [`normalize`]: the retained readings and the rejects.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Validated readings, in input order.
    pub readings: Vec<Reading>,
    /// Rows that were dropped, with reasons.
    pub rejected: Vec<RejectedRow>,
}

impl Normalized {
    /// Number of rows excluded from the reading set.
    pub fn excluded_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Validate `rows` into a reading set.
///
/// Invalid rows are excluded and counted, never silently corrupting
/// aggregates. Returns [`AnalyzerError::NoValidRows`] only when the input was
/// non-empty and not a single row parsed; an empty input is a valid empty
/// result.
pub fn normalize(rows: &[RawReading]) -> Result<Normalized> {
    let mut readings = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();

    for (index, raw) in rows.iter().enumerate() {
        match RowValidator::validate(raw) {
            Ok(reading) => readings.push(reading),
            Err(reason) => {
                warn!("Dropping row {}: {}", index, reason);
                rejected.push(RejectedRow { index, reason });
            }
        }
    }

    if readings.is_empty() && !rows.is_empty() {
        return Err(AnalyzerError::NoValidRows { total: rows.len() });
    }

    debug!(
        "Normalized {} rows, {} excluded",
        readings.len(),
        rejected.len()
    );

    Ok(Normalized { readings, rejected })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
