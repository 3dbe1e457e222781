/// Error types for dataset loading
use thiserror::Error;

/// Failure to produce a [`crate::Dataset`] from the source table.
///
/// Every variant is fatal at startup: the dashboard never shows a partial view.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source file is missing or unreadable
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV itself could not be parsed
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// One or more required columns are absent from the header row
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A row has a value that cannot be interpreted
    #[error("Malformed row at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// The same (region, sub-region, year) appears twice
    #[error("Duplicate observation for {region} / {sub_region} / {year}")]
    DuplicateKey {
        region: String,
        sub_region: String,
        year: i32,
    },

    /// The table has a header but no rows
    #[error("Dataset contains no observations")]
    Empty,
}

/// Type alias for Results using LoadError
pub type Result<T> = std::result::Result<T, LoadError>;
