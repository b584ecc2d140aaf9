//! CSV ingestion for the consumption analyzer.
//!
//! Reads uploaded CSV data into [`RawReading`] rows, resolving columns by
//! header name. The required-column check happens here, before any
//! normalization runs, so a structurally unusable file is reported as one
//! clear error rather than a pile of dropped rows.

use std::fs::File;
use std::io;
use std::path::Path;

use analyzer_core::error::{AnalyzerError, Result};
use analyzer_core::models::RawReading;
use csv::StringRecord;
use tracing::debug;

// ── Column names ──────────────────────────────────────────────────────────────

/// Combined date+time column.
pub const COL_TIMESTAMP: &str = "Date/Time";
/// Date column, used when date and time are split.
pub const COL_DATE: &str = "Date";
/// Time column accompanying [`COL_DATE`]; optional.
pub const COL_TIME: &str = "Time";
/// Consumption column; required.
pub const COL_CONSUMPTION: &str = "Energy Consumption (kWh)";
/// Cost column; optional.
pub const COL_COST: &str = "Total Cost ($)";

// ── Public API ────────────────────────────────────────────────────────────────

/// Read raw rows from a CSV file on disk.
pub fn load_csv_file(path: impl AsRef<Path>) -> Result<Vec<RawReading>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AnalyzerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

/// Read raw rows from any CSV byte stream (e.g. an upload buffer).
///
/// The header row must carry either a combined [`COL_TIMESTAMP`] column or a
/// [`COL_DATE`] column (with [`COL_TIME`] optional), plus the
/// [`COL_CONSUMPTION`] column; otherwise [`AnalyzerError::MissingColumn`] is
/// returned before any rows are materialized. Individual cell values are not
/// validated here — that is normalization's job.
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<RawReading>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let layout = ColumnLayout::resolve(&headers)?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(layout.raw_reading(&record));
    }

    debug!("Read {} raw rows from CSV", rows.len());
    Ok(rows)
}

// ── Internal ──────────────────────────────────────────────────────────────────

/// Resolved header positions for one CSV file.
struct ColumnLayout {
    timestamp: Option<usize>,
    date: Option<usize>,
    time: Option<usize>,
    consumption: Option<usize>,
    cost: Option<usize>,
}

impl ColumnLayout {
    /// Locate the known columns by name, case-insensitively.
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let timestamp = find(COL_TIMESTAMP);
        let date = find(COL_DATE);
        if timestamp.is_none() && date.is_none() {
            return Err(AnalyzerError::MissingColumn(COL_DATE.to_string()));
        }

        let consumption = find(COL_CONSUMPTION)
            .ok_or_else(|| AnalyzerError::MissingColumn(COL_CONSUMPTION.to_string()))?;

        Ok(Self {
            timestamp,
            date,
            time: find(COL_TIME),
            consumption: Some(consumption),
            cost: find(COL_COST),
        })
    }

    /// Extract one raw row. Blank cells become absent fields.
    fn raw_reading(&self, record: &StringRecord) -> RawReading {
        let get = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        RawReading {
            timestamp: get(self.timestamp),
            date: get(self.date),
            time: get(self.time),
            consumption: get(self.consumption),
            cost: get(self.cost),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
