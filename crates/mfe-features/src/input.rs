//! Feature Input Vocabulary

use crate::value::FeatureError;
use mfe_data::{Array2, Dataset, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data views a feature may declare as inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    /// Full attribute matrix
    Attributes,
    /// Numeric attributes only
    Numeric,
    /// Categorical attributes only
    Categorical,
    /// Class labels
    Labels,
}

impl Input {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Input::Attributes => "attributes",
            Input::Numeric => "numeric",
            Input::Categorical => "categorical",
            Input::Labels => "labels",
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed views handed to feature functions
#[derive(Debug, Clone, Copy)]
pub struct FeatureInputs<'a> {
    attributes: &'a Array2<Value>,
    numeric: &'a Array2<f64>,
    categorical: &'a Array2<Value>,
    labels: Option<&'a [Value]>,
}

impl<'a> FeatureInputs<'a> {
    /// Borrow every view of a dataset
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            attributes: dataset.attributes(),
            numeric: dataset.numeric(),
            categorical: dataset.categorical(),
            labels: dataset.labels(),
        }
    }

    /// Whether the given input can be supplied
    pub fn provides(&self, input: Input) -> bool {
        match input {
            Input::Labels => self.labels.is_some(),
            Input::Attributes | Input::Numeric | Input::Categorical => true,
        }
    }

    pub fn attributes(&self) -> &'a Array2<Value> {
        self.attributes
    }

    pub fn numeric(&self) -> &'a Array2<f64> {
        self.numeric
    }

    pub fn categorical(&self) -> &'a Array2<Value> {
        self.categorical
    }

    /// Class labels, or `MissingInput` for unsupervised data
    pub fn labels(&self) -> Result<&'a [Value], FeatureError> {
        self.labels.ok_or(FeatureError::MissingInput(Input::Labels))
    }
}

impl<'a> From<&'a Dataset> for FeatureInputs<'a> {
    fn from(dataset: &'a Dataset) -> Self {
        Self::new(dataset)
    }
}
