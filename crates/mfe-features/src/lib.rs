//! Meta-feature Formulas and Registry
//!
//! Provides the General meta-feature group, the registry that declares each
//! feature's inputs, and summary functions for sequence-valued features.

pub mod general;
mod input;
mod registry;
mod summary;
mod value;

pub use general::{ClassOrder, FreqClassConfig};
pub use input::{FeatureInputs, Input};
pub use registry::{FeatureConfig, FeatureFn, FeatureRegistry, FeatureSpec};
pub use summary::{Moments, Summary, UnknownSummary};
pub use value::{FeatureError, FeatureValue};
