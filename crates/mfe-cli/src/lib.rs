//! Meta-feature Extraction CLI Support
//!
//! Dataset file loading, layered configuration, logging setup and output
//! rendering for the `mfe` binary.

use anyhow::{Context, Result};
use mfe_extractor::{Dataset, ExtractionReport, ExtractorConfig, FeatureRegistry, FeatureValue, Value};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "MFE";

/// JSON dataset file
///
/// `types` is optional; when absent each column is typed from its cells.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetFile {
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub labels: Option<Vec<Value>>,
}

impl DatasetFile {
    /// Validate into a dataset
    pub fn into_dataset(self) -> Result<Dataset> {
        let dataset = match self.types {
            Some(tags) => Dataset::from_rows(self.rows, &tags)?,
            None => Dataset::from_rows_inferred(self.rows)?,
        };
        let dataset = match self.labels {
            Some(labels) => dataset.with_labels(labels)?,
            None => dataset,
        };
        Ok(dataset)
    }
}

/// Initialize logging on stderr
pub fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Load extractor configuration: defaults, optional file, then `MFE_*` environment
pub fn load_config(path: Option<&Path>) -> Result<ExtractorConfig> {
    load_config_with_prefix(path, ENV_PREFIX)
}

/// Load extractor configuration reading environment overrides under `prefix`
///
/// Nested keys use `__`, lists use `,`: `MFE_OPTIONS__FREQ_CLASS__ORDER`,
/// `MFE_FEATURES=nr_inst,nr_attr`.
pub fn load_config_with_prefix(path: Option<&Path>, prefix: &str) -> Result<ExtractorConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        info!("Loading configuration from {}", path.display());
        builder = builder.add_source(config::File::from(path));
    }
    builder = builder.add_source(
        config::Environment::with_prefix(prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("features")
            .with_list_parse_key("summaries"),
    );

    builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")
}

/// Parse a dataset from JSON text
pub fn parse_dataset(json: &str) -> Result<Dataset> {
    let file: DatasetFile = serde_json::from_str(json).context("Malformed dataset JSON")?;
    let dataset = file.into_dataset()?;
    debug!(
        "Loaded dataset: {} instances, {} attributes, labels: {}",
        dataset.nr_inst(),
        dataset.nr_attr(),
        dataset.labels().is_some()
    );
    Ok(dataset)
}

/// Read and parse a dataset file
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    parse_dataset(&json).with_context(|| format!("Failed to load dataset {}", path.display()))
}

/// Render summarized values as JSON
pub fn render_summarized(values: &BTreeMap<String, FeatureValue>, pretty: bool) -> Result<String> {
    to_json(values, pretty)
}

/// Render raw outcomes as JSON
pub fn render_report(report: &ExtractionReport, pretty: bool) -> Result<String> {
    to_json(report, pretty)
}

/// One line per registered feature: name, inputs, description
pub fn describe_registry(registry: &FeatureRegistry) -> String {
    registry
        .iter()
        .map(|spec| {
            let inputs: Vec<&str> = spec.inputs.iter().map(|input| input.as_str()).collect();
            format!("{:<14}{:<24}{}", spec.name, inputs.join(","), spec.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfe_extractor::{ClassOrder, ColumnType, Extractor, Summary};

    const IRIS_LIKE: &str = r#"{
        "rows": [[5.1, 3.5, "setosa-ish"], [4.9, 3.0, "other"], [6.2, 2.9, "other"]],
        "types": ["num", "num", "cat"],
        "labels": ["a", "b", "a"]
    }"#;

    #[test]
    fn test_parse_dataset() {
        let ds = parse_dataset(IRIS_LIKE).unwrap();
        assert_eq!(ds.nr_inst(), 3);
        assert_eq!(ds.numeric().ncols(), 2);
        assert_eq!(ds.labels().map(<[Value]>::len), Some(3));
    }

    #[test]
    fn test_parse_dataset_inferred_types() {
        let ds = parse_dataset(r#"{ "rows": [[1, "x"], [2, "y"]] }"#).unwrap();
        assert_eq!(ds.types(), &[ColumnType::Numeric, ColumnType::Categorical]);
        assert!(ds.labels().is_none());
    }

    #[test]
    fn test_parse_dataset_shape_error() {
        let err = parse_dataset(r#"{ "rows": [[1, 2], [3]], "types": ["num", "num"] }"#)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Shape mismatch"));
    }

    #[test]
    fn test_load_config_file() {
        let path = std::env::temp_dir().join(format!("mfe-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "features": ["freq_class"], "summaries": ["max"], "options": { "freq_class": { "order": "first_seen" } } }"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.features, vec!["freq_class".to_string()]);
        assert_eq!(config.summaries, vec![Summary::Max]);
        assert_eq!(config.options.freq_class.order, ClassOrder::FirstSeen);
    }

    #[test]
    fn test_load_config_environment() {
        std::env::set_var("MFETEST_PARALLEL", "false");
        std::env::set_var("MFETEST_FEATURES", "nr_inst,nr_attr");
        std::env::set_var("MFETEST_SUMMARIES", "min,max");
        std::env::set_var("MFETEST_OPTIONS__FREQ_CLASS__ORDER", "first_seen");

        let config = load_config_with_prefix(None, "MFETEST").unwrap();

        assert!(!config.parallel);
        assert_eq!(config.features, vec!["nr_inst".to_string(), "nr_attr".to_string()]);
        assert_eq!(config.summaries, vec![Summary::Min, Summary::Max]);
        assert_eq!(config.options.freq_class.order, ClassOrder::FirstSeen);
    }

    #[test]
    fn test_render_summarized() {
        let ds = parse_dataset(IRIS_LIKE).unwrap();
        let config = ExtractorConfig::default()
            .with_features(["freq_class", "cat_to_num"])
            .with_summaries(vec![Summary::Max]);
        let extractor = Extractor::new(config).unwrap();
        let json = render_summarized(&extractor.extract_summarized(&ds), false).unwrap();
        assert_eq!(json, r#"{"cat_to_num":0.5,"freq_class.max":0.6666666666666666}"#);
    }

    #[test]
    fn test_describe_registry() {
        let listing = describe_registry(&FeatureRegistry::general());
        assert_eq!(listing.lines().count(), 11);
        assert!(listing.lines().any(|line| line.starts_with("freq_class") && line.contains("labels")));
    }
}
