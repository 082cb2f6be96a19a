//! Error types for the Titanic survival analysis

use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, TitanicError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum TitanicError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Preprocessing error: {0}")]
    PreprocessingError(String),

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Metric error: {0}")]
    MetricError(String),

    #[error("Plot error: {0}")]
    PlotError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },
}

impl From<polars::error::PolarsError> for TitanicError {
    fn from(err: polars::error::PolarsError) -> Self {
        TitanicError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for TitanicError {
    fn from(err: serde_json::Error) -> Self {
        TitanicError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for TitanicError {
    fn from(err: ndarray::ShapeError) -> Self {
        TitanicError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
