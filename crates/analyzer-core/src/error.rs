use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the consumption analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A required column is absent from the ingested data. Raised by the
    /// reader before any normalization runs.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A non-empty input yielded zero parseable rows.
    #[error("None of the {total} supplied rows could be parsed")]
    NoValidRows { total: usize },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream itself was malformed (not an individual bad row).
    #[error("Failed to read CSV data: {0}")]
    CsvRead(#[from] csv::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
