//! Core domain layer for the energy consumption analyzer.
//!
//! Defines the reading model shared by every ingestion path, the aggregate
//! output types handed to the presentation layer, the error taxonomy, and the
//! raw-field processors that turn form/CSV strings into typed values.

pub mod data_processors;
pub mod error;
pub mod models;
