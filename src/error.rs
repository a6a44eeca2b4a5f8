//! Error types for the matchcast library.

use thiserror::Error;

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while ingesting records or forecasting.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Series handed to evaluate (or a similar consumer) has no points.
    #[error("empty series")]
    EmptySeries,

    /// Series is shorter than the operation requires.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid fit/forecast parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A source row could not be parsed into a record.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Checkpoint blob could not be restored into a model.
    #[error("corrupt checkpoint: {0}")]
    CorruptCheckpoint(String),

    /// Underlying storage failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O failure at a component boundary.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::EmptySeries;
        assert_eq!(err.to_string(), "empty series");

        let err = ForecastError::InsufficientData {
            needed: 365,
            got: 10,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 365, got 10"
        );

        let err = ForecastError::InvalidParameter("window_size must be positive".into());
        assert_eq!(
            err.to_string(),
            "invalid parameter: window_size must be positive"
        );

        let err = ForecastError::MalformedRecord {
            line: 2,
            reason: "unparseable date".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed record at line 2: unparseable date"
        );

        let err = ForecastError::CorruptCheckpoint("truncated blob".into());
        assert_eq!(err.to_string(), "corrupt checkpoint: truncated blob");
    }
}
