//! Extractor Configuration

use crate::ExtractError;
use mfe_features::{FeatureConfig, FeatureRegistry, Summary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Feature selection and evaluation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Features to compute; empty or `["all"]` selects every registered feature
    pub features: Vec<String>,
    /// Summaries applied to sequence-valued features
    pub summaries: Vec<Summary>,
    /// Evaluate features on the rayon pool
    pub parallel: bool,
    /// Per-feature options
    pub options: FeatureConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            summaries: vec![Summary::Mean, Summary::Sd],
            parallel: true,
            options: FeatureConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Select only the named features
    pub fn with_features<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the summary functions
    pub fn with_summaries(mut self, summaries: Vec<Summary>) -> Self {
        self.summaries = summaries;
        self
    }

    /// Replace the summary functions by name
    pub fn with_summary_names<I, S>(mut self, names: I) -> Result<Self, ExtractError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.summaries = names
            .into_iter()
            .map(|name| name.as_ref().parse::<Summary>())
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Evaluate sequentially
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Whether every registered feature is selected
    pub fn selects_all(&self) -> bool {
        self.features.is_empty()
            || self
                .features
                .iter()
                .any(|name| name.trim().eq_ignore_ascii_case("all"))
    }

    /// Resolve the selection against a registry
    ///
    /// Returns registered names in ascending order with duplicates removed.
    pub fn resolve(&self, registry: &FeatureRegistry) -> Result<Vec<&'static str>, ExtractError> {
        if self.selects_all() {
            return Ok(registry.names().collect());
        }

        let mut selected = BTreeSet::new();
        for name in &self.features {
            let name = name.trim();
            if name.is_empty() {
                return Err(ExtractError::InvalidConfig("empty feature name".to_string()));
            }
            let spec = registry
                .get(name)
                .ok_or_else(|| ExtractError::UnknownFeature(name.to_string()))?;
            selected.insert(spec.name);
        }
        Ok(selected.into_iter().collect())
    }

    /// Summaries with duplicates removed, first occurrence kept
    pub fn distinct_summaries(&self) -> Vec<Summary> {
        let mut seen = BTreeSet::new();
        self.summaries
            .iter()
            .copied()
            .filter(|summary| seen.insert(*summary))
            .collect()
    }
}
