//! Numeric/Categorical Attribute Partitioning

use crate::error::DataError;
use crate::value::Value;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute type assigned to a column at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Column of numbers
    Numeric,
    /// Column of category tokens
    Categorical,
}

impl ColumnType {
    /// Parse a type tag for the given column
    ///
    /// Accepts `numeric`/`num` and `categorical`/`cat`, case-insensitive.
    pub fn from_tag(column: usize, tag: &str) -> Result<Self, DataError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "numeric" | "num" => Ok(ColumnType::Numeric),
            "categorical" | "cat" => Ok(ColumnType::Categorical),
            _ => Err(DataError::InvalidTypeTag {
                column,
                tag: tag.to_string(),
            }),
        }
    }

    /// Numeric when every cell is a number, categorical otherwise
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Value>) -> Self {
        if cells.into_iter().all(Value::is_number) {
            ColumnType::Numeric
        } else {
            ColumnType::Categorical
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric and categorical sub-matrices of an attribute matrix
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeViews {
    /// Numeric columns, source order preserved
    pub numeric: Array2<f64>,
    /// Categorical columns, source order preserved
    pub categorical: Array2<Value>,
}

/// Split an attribute matrix by column type
pub fn partition(
    attributes: &Array2<Value>,
    types: &[ColumnType],
) -> Result<AttributeViews, DataError> {
    if types.len() != attributes.ncols() {
        return Err(DataError::shape(
            "column types",
            attributes.ncols(),
            types.len(),
        ));
    }

    let (numeric_idx, categorical_idx): (Vec<usize>, Vec<usize>) =
        (0..types.len()).partition(|&col| types[col] == ColumnType::Numeric);

    let rows = attributes.nrows();
    let mut numeric = Array2::<f64>::zeros((rows, numeric_idx.len()));
    for (dst, &col) in numeric_idx.iter().enumerate() {
        for (row, cell) in attributes.column(col).iter().enumerate() {
            numeric[[row, dst]] = cell
                .as_f64()
                .ok_or(DataError::NonNumericValue { row, column: col })?;
        }
    }

    let categorical = attributes.select(Axis(1), &categorical_idx);

    Ok(AttributeViews {
        numeric,
        categorical,
    })
}

/// Split an attribute matrix using textual type tags
pub fn partition_tagged<S: AsRef<str>>(
    attributes: &Array2<Value>,
    tags: &[S],
) -> Result<AttributeViews, DataError> {
    let types = tags
        .iter()
        .enumerate()
        .map(|(col, tag)| ColumnType::from_tag(col, tag.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    partition(attributes, &types)
}
