//! Error types
//!
//! Scoring itself never fails per row; these cover structural problems with the
//! input table or the scoring standard, detected before any row is scored.

use thiserror::Error;

/// Scoring error types
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Missing input column: {0}")]
    MissingColumn(String),

    #[error("Invalid scoring rule for {component}: {reason}")]
    InvalidStandard {
        component: &'static str,
        reason: String,
    },

    #[error("Scoring standard parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for scoring operations
pub type ScoreResult<T> = Result<T, ScoreError>;
