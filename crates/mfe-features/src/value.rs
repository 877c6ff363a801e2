//! Feature Results and Errors

use crate::input::Input;
use serde::Serialize;
use thiserror::Error;

/// Result of a single meta-feature
///
/// `Undefined` is the not-a-number sentinel: a ratio with a zero
/// denominator, an empty frequency table, or a failed computation. It
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Single numeric value
    Scalar(f64),
    /// Fixed-order numeric sequence
    Sequence(Vec<f64>),
    /// No defined value
    Undefined,
}

impl FeatureValue {
    /// Ratio of two counts, undefined when the denominator is zero
    pub fn ratio(numerator: usize, denominator: usize) -> Self {
        if denominator == 0 {
            FeatureValue::Undefined
        } else {
            FeatureValue::Scalar(numerator as f64 / denominator as f64)
        }
    }

    /// Count as a scalar
    pub fn count(n: usize) -> Self {
        FeatureValue::Scalar(n as f64)
    }

    /// Whether this is the sentinel
    pub fn is_undefined(&self) -> bool {
        matches!(self, FeatureValue::Undefined)
    }

    /// Scalar content, if any
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FeatureValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Sequence content, if any
    pub fn as_sequence(&self) -> Option<&[f64]> {
        match self {
            FeatureValue::Sequence(values) => Some(values),
            _ => None,
        }
    }

    /// Scalar content with the sentinel rendered as NaN
    pub fn scalar_or_nan(&self) -> f64 {
        self.as_scalar().unwrap_or(f64::NAN)
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Scalar(v)
    }
}

impl From<Vec<f64>> for FeatureValue {
    fn from(values: Vec<f64>) -> Self {
        FeatureValue::Sequence(values)
    }
}

/// Errors raised by a single feature computation or registration
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FeatureError {
    /// Denominator dimension is zero
    #[error("Division by zero: {0} is zero")]
    DivisionByZero(&'static str),

    /// Declared input not supplied
    #[error("Missing input: {0}")]
    MissingInput(Input),

    /// Name already registered
    #[error("Feature already registered: {0}")]
    DuplicateFeature(String),

    /// Feature function panicked
    #[error("Feature panicked: {0}")]
    Panicked(String),

    /// Any other computation failure
    #[error("Computation failed: {0}")]
    Computation(String),
}
