/// Error types for the seasonal metrics tables
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for loading, reshaping and persisting metric tables
#[derive(Error, Debug)]
pub enum EcoError {
    /// Reading or writing a file failed
    #[error("I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or write CSV data
    #[error("Failed to process CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column the pipeline depends on is absent
    #[error("Missing column '{column}' in {table}")]
    MissingColumn { table: String, column: String },

    /// Two columns share a header, so lookups by name would be ambiguous
    #[error("Duplicate column '{column}' in {table}")]
    DuplicateColumn { table: String, column: String },

    /// A row does not have as many cells as the header
    #[error("Row {row} of {table} has {found} cells, expected {expected}")]
    RaggedRow {
        table: String,
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A new column does not line up with the table rows
    #[error("Column '{column}' has {found} values but {table} has {expected} rows")]
    ColumnLength {
        table: String,
        column: String,
        found: usize,
        expected: usize,
    },

    /// Date parsing failed
    #[error("Failed to parse date in row {row}: {message}")]
    DateParse { row: usize, message: String },

    /// Calendar month outside 1..=12
    #[error("Invalid calendar month: {0}")]
    InvalidMonth(u32),

    /// Season label not in the fixed season set
    #[error("Unknown season: {0}")]
    UnknownSeason(String),
}

/// Type alias for Results using EcoError
pub type Result<T> = std::result::Result<T, EcoError>;
