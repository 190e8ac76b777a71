//! Error types for choclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the dataset or executing a query
#[derive(Error, Debug)]
pub enum ChocError {
    /// Failed to read a data file
    #[error("failed to read data file '{path}': {source}")]
    DataFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the bars CSV file
    #[error("failed to parse bars csv: {0}")]
    BarsCsv(#[from] csv::Error),

    /// Failed to parse the countries JSON file
    #[error("failed to parse countries json: {0}")]
    CountriesJson(#[from] serde_json::Error),

    /// A cocoa percent cell could not be read as a percentage
    #[error("invalid cocoa percent value '{0}'")]
    InvalidCocoaPercent(String),

    /// A raw filter key did not resolve to any known column
    #[error("no such column: {0}")]
    UnknownColumn(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
