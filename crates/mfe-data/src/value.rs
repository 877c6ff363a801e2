//! Attribute and Label Values

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single attribute cell or class label
///
/// Values are totally ordered so that distinct-value counting and sorted
/// class order never depend on hashing or insertion order: numbers sort
/// before text, numbers compare by IEEE total order after `-0.0` is folded
/// into `0.0` and every NaN into a single NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric cell
    Number(f64),
    /// Text token (categorical cell or label)
    Text(String),
}

impl Value {
    /// Numeric content, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    /// Whether this value is a number
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    fn canonical(v: f64) -> f64 {
        if v.is_nan() {
            f64::NAN
        } else if v == 0.0 {
            0.0
        } else {
            v
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                Value::canonical(*a).total_cmp(&Value::canonical(*b))
            }
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_signed_zero_is_one_value() {
        assert_eq!(Value::from(0.0), Value::from(-0.0));
    }

    #[test]
    fn test_nan_is_one_value() {
        let set: BTreeSet<Value> = [f64::NAN, -f64::NAN, f64::NAN]
            .into_iter()
            .map(Value::from)
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_numbers_sort_before_text() {
        let mut values = vec![Value::from("a"), Value::from(3.0), Value::from(-1.0)];
        values.sort();
        assert_eq!(values, vec![Value::from(-1.0), Value::from(3.0), Value::from("a")]);
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<Value> = serde_json::from_str(r#"[1.5, "red", 2]"#).unwrap();
        assert_eq!(values, vec![Value::from(1.5), Value::from("red"), Value::from(2.0)]);
    }
}
