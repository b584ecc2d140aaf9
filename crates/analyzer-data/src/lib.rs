//! Ingestion and aggregation layer for the energy consumption analyzer.
//!
//! Responsible for reading raw consumption rows from CSV, normalizing them
//! into validated readings, computing the derived views (daily totals, hourly
//! averages, peak/night split, summaries), applying period filters, and
//! running the top-level analysis pipeline a presentation layer consumes.

pub mod aggregator;
pub mod analysis;
pub mod filters;
pub mod normalize;
pub mod reader;

pub use analyzer_core as core;
