//! Extraction Report

use mfe_features::{FeatureError, FeatureValue, Input, Summary};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Why a feature was not evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "input", rename_all = "snake_case")]
pub enum SkipReason {
    /// A declared input is not available for this dataset
    MissingInput(Input),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingInput(input) => write!(f, "missing {}", input),
        }
    }
}

static UNDEFINED: FeatureValue = FeatureValue::Undefined;

/// Outcome of a single feature
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeatureOutcome {
    /// Feature computed
    Computed { value: FeatureValue },
    /// Feature raised an error; its value is the sentinel
    Failed { error: FeatureError },
    /// Feature not evaluated
    Skipped { reason: SkipReason },
}

impl FeatureOutcome {
    /// Value of the feature, with the sentinel substituted for failures
    pub fn value(&self) -> Option<&FeatureValue> {
        match self {
            FeatureOutcome::Computed { value } => Some(value),
            FeatureOutcome::Failed { .. } => Some(&UNDEFINED),
            FeatureOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, FeatureOutcome::Computed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FeatureOutcome::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FeatureOutcome::Skipped { .. })
    }
}

/// Name-addressable outcomes of one extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtractionReport {
    outcomes: BTreeMap<String, FeatureOutcome>,
}

impl ExtractionReport {
    pub(crate) fn from_outcomes(outcomes: impl IntoIterator<Item = (String, FeatureOutcome)>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    /// Outcome of a feature
    pub fn get(&self, name: &str) -> Option<&FeatureOutcome> {
        self.outcomes.get(name)
    }

    /// Value of a feature; `None` when skipped or not selected
    pub fn value(&self, name: &str) -> Option<&FeatureValue> {
        self.outcomes.get(name).and_then(FeatureOutcome::value)
    }

    /// Outcomes in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureOutcome)> {
        self.outcomes.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    /// Skipped features and their reasons
    pub fn skipped(&self) -> impl Iterator<Item = (&str, SkipReason)> {
        self.iter().filter_map(|(name, outcome)| match outcome {
            FeatureOutcome::Skipped { reason } => Some((name, *reason)),
            _ => None,
        })
    }

    /// Failed features and their errors
    pub fn failed(&self) -> impl Iterator<Item = (&str, &FeatureError)> {
        self.iter().filter_map(|(name, outcome)| match outcome {
            FeatureOutcome::Failed { error } => Some((name, error)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Flatten into named values
    ///
    /// Scalars and undefined values keep their feature name; each sequence
    /// expands into one `<name>.<summary>` entry per summary. Skipped
    /// features are left out.
    pub fn summarize(&self, summaries: &[Summary]) -> BTreeMap<String, FeatureValue> {
        let mut flat = BTreeMap::new();
        for (name, outcome) in self.iter() {
            match outcome.value() {
                Some(FeatureValue::Sequence(values)) => {
                    for summary in summaries {
                        flat.insert(format!("{}.{}", name, summary), summary.apply(values));
                    }
                }
                Some(value) => {
                    flat.insert(name.to_string(), value.clone());
                }
                None => {}
            }
        }
        flat
    }
}
