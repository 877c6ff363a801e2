//! Meta-feature Evaluator
//!
//! Selects features from a registry, supplies each one the dataset views it
//! declares, isolates per-feature failures, and summarizes sequence results.

mod config;
mod extractor;
mod report;

pub use config::ExtractorConfig;
pub use extractor::Extractor;
pub use report::{ExtractionReport, FeatureOutcome, SkipReason};

pub use mfe_data::{ColumnType, DataError, Dataset, Value};
pub use mfe_features::{
    ClassOrder, FeatureConfig, FeatureError, FeatureRegistry, FeatureSpec, FeatureValue,
    FreqClassConfig, Input, Summary, UnknownSummary,
};

use thiserror::Error;

/// Errors that abort an extraction before any feature runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("Invalid dataset: {0}")]
    Data(#[from] DataError),
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),
    #[error(transparent)]
    UnknownSummary(#[from] UnknownSummary),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
