//! Dataset Model and Attribute Partitioning
//!
//! Provides the tabular value model, shape validation, and the split of an
//! attribute matrix into its numeric and categorical views.

mod dataset;
mod error;
mod partition;
mod value;

pub use dataset::Dataset;
pub use error::DataError;
pub use partition::{partition, partition_tagged, AttributeViews, ColumnType};
pub use value::Value;

/// Re-exported so downstream crates name the same matrix types
pub use ndarray::Array2;
