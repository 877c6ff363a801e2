//! Feature Registry

use crate::general::{self, FreqClassConfig};
use crate::input::{FeatureInputs, Input};
use crate::value::{FeatureError, FeatureValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Signature shared by every registered feature
pub type FeatureFn = fn(&FeatureInputs<'_>, &FeatureConfig) -> Result<FeatureValue, FeatureError>;

/// Per-feature options handed to every feature function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Options for `freq_class`
    pub freq_class: FreqClassConfig,
}

/// Declaration of a single feature
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    /// Unique feature name
    pub name: &'static str,
    /// Views the feature reads
    pub inputs: &'static [Input],
    /// One-line description
    pub description: &'static str,
    /// Implementation
    pub compute: FeatureFn,
}

impl FeatureSpec {
    /// First declared input that the given views cannot supply
    pub fn missing_input(&self, inputs: &FeatureInputs<'_>) -> Option<Input> {
        self.inputs.iter().copied().find(|&input| !inputs.provides(input))
    }
}

/// Name-ordered mapping from feature name to its declaration
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    specs: BTreeMap<&'static str, FeatureSpec>,
}

impl FeatureRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the General group
    pub fn general() -> Self {
        let mut registry = Self::empty();
        for spec in general::SPECS {
            registry.specs.insert(spec.name, *spec);
        }
        debug!("General registry built with {} features", registry.len());
        registry
    }

    /// Add a feature, rejecting duplicate names
    pub fn register(&mut self, spec: FeatureSpec) -> Result<(), FeatureError> {
        if self.specs.contains_key(spec.name) {
            return Err(FeatureError::DuplicateFeature(spec.name.to_string()));
        }
        self.specs.insert(spec.name, spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FeatureSpec> {
        self.specs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Registered names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfe_data::{Dataset, Value};

    fn constant(_: &FeatureInputs<'_>, _: &FeatureConfig) -> Result<FeatureValue, FeatureError> {
        Ok(FeatureValue::Scalar(7.0))
    }

    #[test]
    fn test_general_registry() {
        let registry = FeatureRegistry::general();
        assert_eq!(registry.len(), 11);
        assert!(registry.contains("nr_bin"));
        assert_eq!(registry.get("freq_class").unwrap().inputs, &[Input::Labels]);
        assert_eq!(registry.names().next(), Some("attr_to_inst"));
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = FeatureRegistry::general();
        let spec = FeatureSpec {
            name: "nr_inst",
            inputs: &[],
            description: "duplicate",
            compute: constant,
        };
        assert_eq!(
            registry.register(spec),
            Err(FeatureError::DuplicateFeature("nr_inst".to_string()))
        );
    }

    #[test]
    fn test_register_and_call() {
        let mut registry = FeatureRegistry::empty();
        registry
            .register(FeatureSpec {
                name: "seven",
                inputs: &[],
                description: "constant",
                compute: constant,
            })
            .unwrap();

        let ds = Dataset::from_rows(vec![vec![Value::from(1.0)]], &["num"]).unwrap();
        let inputs = FeatureInputs::new(&ds);
        let spec = registry.get("seven").unwrap();
        assert_eq!(
            (spec.compute)(&inputs, &FeatureConfig::default()),
            Ok(FeatureValue::Scalar(7.0))
        );
    }

    #[test]
    fn test_missing_labels() {
        let registry = FeatureRegistry::general();
        let ds = Dataset::from_rows(vec![vec![Value::from(1.0)]], &["num"]).unwrap();
        let inputs = FeatureInputs::new(&ds);
        assert_eq!(
            registry.get("nr_class").unwrap().missing_input(&inputs),
            Some(Input::Labels)
        );
        assert_eq!(registry.get("nr_attr").unwrap().missing_input(&inputs), None);
    }
}
