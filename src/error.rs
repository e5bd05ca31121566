//! Error types for the forecast_inventory crate

use thiserror::Error;

/// Custom error types for the forecast_inventory crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough observations to build features or fit a model
    #[error("Insufficient data: need at least {needed} observations, got {actual}")]
    InsufficientData { needed: usize, actual: usize },

    /// Malformed date or numeric field in the input
    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// The underlying regressor could not be fitted
    #[error("Model fit error: {0}")]
    ModelFit(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV reading or writing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
