//! Dataset Error Types

use thiserror::Error;

/// Errors raised while building or partitioning a dataset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Structural mismatch between rows, columns, type tags or labels
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Column type tag is neither numeric nor categorical
    #[error("Invalid type tag {tag:?} for column {column}")]
    InvalidTypeTag { column: usize, tag: String },

    /// Text value found in a column typed numeric
    #[error("Non-numeric value at row {row}, column {column}")]
    NonNumericValue { row: usize, column: usize },
}

impl DataError {
    pub(crate) fn shape(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        DataError::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}
