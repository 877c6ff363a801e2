//! Validated Tabular Dataset

use crate::error::DataError;
use crate::partition::{partition, AttributeViews, ColumnType};
use crate::value::Value;
use ndarray::Array2;
use tracing::debug;

/// Attribute matrix with column types, derived views and optional labels
///
/// Construction validates shape and computes the numeric/categorical views
/// once; the views are read-only for the lifetime of the dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    attributes: Array2<Value>,
    types: Vec<ColumnType>,
    views: AttributeViews,
    labels: Option<Vec<Value>>,
}

impl Dataset {
    /// Create a dataset from an attribute matrix and its column types
    pub fn new(attributes: Array2<Value>, types: Vec<ColumnType>) -> Result<Self, DataError> {
        let views = partition(&attributes, &types)?;
        debug!(
            "Dataset: {} instances, {} numeric + {} categorical attributes",
            attributes.nrows(),
            views.numeric.ncols(),
            views.categorical.ncols()
        );
        Ok(Self {
            attributes,
            types,
            views,
            labels: None,
        })
    }

    /// Create a dataset from rows and textual type tags
    pub fn from_rows<S: AsRef<str>>(rows: Vec<Vec<Value>>, tags: &[S]) -> Result<Self, DataError> {
        let types = tags
            .iter()
            .enumerate()
            .map(|(col, tag)| ColumnType::from_tag(col, tag.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_typed_rows(rows, types)
    }

    /// Create a dataset from rows and column types
    pub fn from_typed_rows(rows: Vec<Vec<Value>>, types: Vec<ColumnType>) -> Result<Self, DataError> {
        let attributes = to_matrix(rows, types.len())?;
        Self::new(attributes, types)
    }

    /// Create a dataset from rows, typing each column from its contents
    pub fn from_rows_inferred(rows: Vec<Vec<Value>>) -> Result<Self, DataError> {
        let width = rows.first().map_or(0, Vec::len);
        let attributes = to_matrix(rows, width)?;
        let types = attributes
            .columns()
            .into_iter()
            .map(|column| ColumnType::infer(column.iter()))
            .collect();
        Self::new(attributes, types)
    }

    /// Attach class labels, one per instance
    pub fn with_labels(mut self, labels: Vec<Value>) -> Result<Self, DataError> {
        if labels.len() != self.nr_inst() {
            return Err(DataError::shape("labels", self.nr_inst(), labels.len()));
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Full attribute matrix
    pub fn attributes(&self) -> &Array2<Value> {
        &self.attributes
    }

    /// Numeric-only view
    pub fn numeric(&self) -> &Array2<f64> {
        &self.views.numeric
    }

    /// Categorical-only view
    pub fn categorical(&self) -> &Array2<Value> {
        &self.views.categorical
    }

    /// Class labels, absent for unsupervised data
    pub fn labels(&self) -> Option<&[Value]> {
        self.labels.as_deref()
    }

    /// Per-column types
    pub fn types(&self) -> &[ColumnType] {
        &self.types
    }

    /// Number of instances (rows)
    pub fn nr_inst(&self) -> usize {
        self.attributes.nrows()
    }

    /// Number of attributes (columns)
    pub fn nr_attr(&self) -> usize {
        self.attributes.ncols()
    }
}

fn to_matrix(rows: Vec<Vec<Value>>, width: usize) -> Result<Array2<Value>, DataError> {
    let height = rows.len();
    let mut cells = Vec::with_capacity(height * width);
    for (idx, row) in rows.into_iter().enumerate() {
        if row.len() != width {
            return Err(DataError::shape(format!("row {}", idx), width, row.len()));
        }
        cells.extend(row);
    }
    Array2::from_shape_vec((height, width), cells)
        .map_err(|_| DataError::shape("attribute matrix", height * width, 0))
}
