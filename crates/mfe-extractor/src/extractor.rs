//! Extractor Implementation

use crate::config::ExtractorConfig;
use crate::report::{ExtractionReport, FeatureOutcome, SkipReason};
use crate::ExtractError;
use mfe_data::{Dataset, Value};
use mfe_features::{FeatureError, FeatureInputs, FeatureRegistry, FeatureSpec, FeatureValue, Summary};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Meta-feature extractor bound to a registry and a validated configuration
#[derive(Debug, Clone)]
pub struct Extractor {
    registry: FeatureRegistry,
    selected: Vec<&'static str>,
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor over the General feature group
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractError> {
        Self::with_registry(FeatureRegistry::general(), config)
    }

    /// Create an extractor over a custom registry
    pub fn with_registry(
        registry: FeatureRegistry,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractError> {
        let selected = config.resolve(&registry)?;
        info!(
            "Creating extractor: {} of {} features selected",
            selected.len(),
            registry.len()
        );

        #[cfg(not(feature = "parallel"))]
        if config.parallel {
            debug!("Built without the parallel feature, evaluating sequentially");
        }

        Ok(Self {
            registry,
            selected,
            config,
        })
    }

    /// Selected feature names in ascending order
    pub fn selected(&self) -> &[&'static str] {
        &self.selected
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    /// Evaluate every selected feature on a dataset
    pub fn extract(&self, dataset: &Dataset) -> ExtractionReport {
        let start = std::time::Instant::now();
        let inputs = FeatureInputs::new(dataset);
        let specs: Vec<&FeatureSpec> = self
            .selected
            .iter()
            .filter_map(|name| self.registry.get(name))
            .collect();

        let outcomes = self.evaluate_all(&specs, &inputs);
        let report = ExtractionReport::from_outcomes(outcomes);

        debug!(
            "Extraction completed in {}us: {} features, {} failed, {} skipped",
            start.elapsed().as_micros(),
            report.len(),
            report.failed().count(),
            report.skipped().count()
        );
        report
    }

    /// Build a dataset from rows and tags, then evaluate it
    ///
    /// Shape and tag errors abort before any feature runs.
    pub fn extract_rows<S: AsRef<str>>(
        &self,
        rows: Vec<Vec<Value>>,
        tags: &[S],
        labels: Option<Vec<Value>>,
    ) -> Result<ExtractionReport, ExtractError> {
        let mut dataset = Dataset::from_rows(rows, tags)?;
        if let Some(labels) = labels {
            dataset = dataset.with_labels(labels)?;
        }
        Ok(self.extract(&dataset))
    }

    /// Evaluate and flatten with the configured summaries
    pub fn extract_summarized(&self, dataset: &Dataset) -> BTreeMap<String, FeatureValue> {
        self.extract(dataset).summarize(&self.summaries())
    }

    /// Configured summaries, duplicates removed
    pub fn summaries(&self) -> Vec<Summary> {
        self.config.distinct_summaries()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all(
        &self,
        specs: &[&FeatureSpec],
        inputs: &FeatureInputs<'_>,
    ) -> Vec<(String, FeatureOutcome)> {
        if self.config.parallel {
            specs
                .par_iter()
                .map(|spec| (spec.name.to_string(), self.evaluate(spec, inputs)))
                .collect()
        } else {
            self.evaluate_sequential(specs, inputs)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all(
        &self,
        specs: &[&FeatureSpec],
        inputs: &FeatureInputs<'_>,
    ) -> Vec<(String, FeatureOutcome)> {
        self.evaluate_sequential(specs, inputs)
    }

    fn evaluate_sequential(
        &self,
        specs: &[&FeatureSpec],
        inputs: &FeatureInputs<'_>,
    ) -> Vec<(String, FeatureOutcome)> {
        specs
            .iter()
            .map(|spec| (spec.name.to_string(), self.evaluate(spec, inputs)))
            .collect()
    }

    /// Evaluate one feature; errors and panics stay inside its outcome
    fn evaluate(&self, spec: &FeatureSpec, inputs: &FeatureInputs<'_>) -> FeatureOutcome {
        if let Some(input) = spec.missing_input(inputs) {
            warn!("Skipping {}: missing {}", spec.name, input);
            return FeatureOutcome::Skipped {
                reason: SkipReason::MissingInput(input),
            };
        }

        let options = &self.config.options;
        let result = panic::catch_unwind(AssertUnwindSafe(|| (spec.compute)(inputs, options)))
            .unwrap_or_else(|payload| Err(FeatureError::Panicked(panic_message(payload.as_ref()))));

        match result {
            Ok(value) => FeatureOutcome::Computed { value },
            Err(error) => {
                warn!("Feature {} failed: {}", spec.name, error);
                FeatureOutcome::Failed { error }
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
