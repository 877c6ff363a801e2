//! General Meta-features
//!
//! Counts and ratios over the shape of the attribute matrix, its numeric
//! and categorical views, and the class labels.

use crate::input::{FeatureInputs, Input};
use crate::registry::{FeatureConfig, FeatureSpec};
use crate::value::{FeatureError, FeatureValue};
use mfe_data::{Array2, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Order of the per-class frequencies in `freq_class`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassOrder {
    /// Ascending class value
    #[default]
    Sorted,
    /// Order of first occurrence in the label vector
    FirstSeen,
}

/// Options for `freq_class`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FreqClassConfig {
    /// Class order of the output sequence
    pub order: ClassOrder,
}

/// Ratio between number of attributes and instances
///
/// Inverse of [`inst_to_attr`].
pub fn attr_to_inst<T>(x: &Array2<T>) -> Result<f64, FeatureError> {
    if x.nrows() == 0 {
        return Err(FeatureError::DivisionByZero("number of instances"));
    }
    Ok(x.ncols() as f64 / x.nrows() as f64)
}

/// Ratio between number of instances and attributes
///
/// Inverse of [`attr_to_inst`].
pub fn inst_to_attr<T>(x: &Array2<T>) -> Result<f64, FeatureError> {
    if x.ncols() == 0 {
        return Err(FeatureError::DivisionByZero("number of attributes"));
    }
    Ok(x.nrows() as f64 / x.ncols() as f64)
}

/// Ratio between number of categorical and numeric attributes
///
/// Undefined when there are no numeric attributes. Inverse of [`num_to_cat`].
pub fn cat_to_num(c: &Array2<Value>, n: &Array2<f64>) -> FeatureValue {
    FeatureValue::ratio(c.ncols(), n.ncols())
}

/// Ratio between number of numeric and categorical attributes
///
/// Undefined when there are no categorical attributes. Inverse of [`cat_to_num`].
pub fn num_to_cat(c: &Array2<Value>, n: &Array2<f64>) -> FeatureValue {
    FeatureValue::ratio(n.ncols(), c.ncols())
}

/// Distinct classes paired with their relative frequency
pub fn class_frequencies(y: &[Value], order: ClassOrder) -> Vec<(Value, f64)> {
    let total = y.len() as f64;
    let counts: Vec<(&Value, usize)> = match order {
        ClassOrder::Sorted => {
            let mut counts = BTreeMap::new();
            for label in y {
                *counts.entry(label).or_insert(0usize) += 1;
            }
            counts.into_iter().collect()
        }
        ClassOrder::FirstSeen => {
            let mut position = BTreeMap::new();
            let mut counts: Vec<(&Value, usize)> = Vec::new();
            for label in y {
                let idx = *position.entry(label).or_insert_with(|| {
                    counts.push((label, 0));
                    counts.len() - 1
                });
                counts[idx].1 += 1;
            }
            counts
        }
    };

    counts
        .into_iter()
        .map(|(class, count)| (class.clone(), count as f64 / total))
        .collect()
}

/// Relative frequency of each distinct class
///
/// Undefined for an empty label vector.
pub fn freq_class(y: &[Value], config: &FreqClassConfig) -> FeatureValue {
    if y.is_empty() {
        return FeatureValue::Undefined;
    }
    class_frequencies(y, config.order)
        .into_iter()
        .map(|(_, freq)| freq)
        .collect::<Vec<_>>()
        .into()
}

/// Number of attributes
pub fn nr_attr<T>(x: &Array2<T>) -> usize {
    x.ncols()
}

/// Number of attributes with exactly two distinct values
pub fn nr_bin(x: &Array2<Value>) -> usize {
    x.columns()
        .into_iter()
        .filter(|column| column.iter().collect::<BTreeSet<_>>().len() == 2)
        .count()
}

/// Number of categorical attributes
pub fn nr_cat(c: &Array2<Value>) -> usize {
    c.ncols()
}

/// Number of distinct classes
pub fn nr_class(y: &[Value]) -> usize {
    y.iter().collect::<BTreeSet<_>>().len()
}

/// Number of instances
pub fn nr_inst<T>(x: &Array2<T>) -> usize {
    x.nrows()
}

/// Number of numeric attributes
pub fn nr_num(n: &Array2<f64>) -> usize {
    n.ncols()
}

const X: &[Input] = &[Input::Attributes];
const CN: &[Input] = &[Input::Categorical, Input::Numeric];

/// Registry entries for the General group
pub(crate) const SPECS: &[FeatureSpec] = &[
    FeatureSpec {
        name: "attr_to_inst",
        inputs: X,
        description: "Ratio between number of attributes and instances",
        compute: eval_attr_to_inst,
    },
    FeatureSpec {
        name: "cat_to_num",
        inputs: CN,
        description: "Ratio between number of categorical and numeric attributes",
        compute: eval_cat_to_num,
    },
    FeatureSpec {
        name: "freq_class",
        inputs: &[Input::Labels],
        description: "Relative frequency of each distinct class",
        compute: eval_freq_class,
    },
    FeatureSpec {
        name: "inst_to_attr",
        inputs: X,
        description: "Ratio between number of instances and attributes",
        compute: eval_inst_to_attr,
    },
    FeatureSpec {
        name: "nr_attr",
        inputs: X,
        description: "Number of attributes",
        compute: eval_nr_attr,
    },
    FeatureSpec {
        name: "nr_bin",
        inputs: X,
        description: "Number of binary attributes",
        compute: eval_nr_bin,
    },
    FeatureSpec {
        name: "nr_cat",
        inputs: &[Input::Categorical],
        description: "Number of categorical attributes",
        compute: eval_nr_cat,
    },
    FeatureSpec {
        name: "nr_class",
        inputs: &[Input::Labels],
        description: "Number of distinct classes",
        compute: eval_nr_class,
    },
    FeatureSpec {
        name: "nr_inst",
        inputs: X,
        description: "Number of instances",
        compute: eval_nr_inst,
    },
    FeatureSpec {
        name: "nr_num",
        inputs: &[Input::Numeric],
        description: "Number of numeric attributes",
        compute: eval_nr_num,
    },
    FeatureSpec {
        name: "num_to_cat",
        inputs: CN,
        description: "Ratio between number of numeric and categorical attributes",
        compute: eval_num_to_cat,
    },
];

type Eval = Result<FeatureValue, FeatureError>;

fn eval_attr_to_inst(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    attr_to_inst(inputs.attributes()).map(FeatureValue::from)
}

fn eval_inst_to_attr(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    inst_to_attr(inputs.attributes()).map(FeatureValue::from)
}

fn eval_cat_to_num(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    Ok(cat_to_num(inputs.categorical(), inputs.numeric()))
}

fn eval_num_to_cat(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    Ok(num_to_cat(inputs.categorical(), inputs.numeric()))
}

fn eval_freq_class(inputs: &FeatureInputs<'_>, config: &FeatureConfig) -> Eval {
    Ok(freq_class(inputs.labels()?, &config.freq_class))
}

fn eval_nr_attr(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    Ok(FeatureValue::count(nr_attr(inputs.attributes())))
}

fn eval_nr_bin(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    Ok(FeatureValue::count(nr_bin(inputs.attributes())))
}

fn eval_nr_cat(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    Ok(FeatureValue::count(nr_cat(inputs.categorical())))
}

fn eval_nr_class(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    Ok(FeatureValue::count(nr_class(inputs.labels()?)))
}

fn eval_nr_inst(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    Ok(FeatureValue::count(nr_inst(inputs.attributes())))
}

fn eval_nr_num(inputs: &FeatureInputs<'_>, _: &FeatureConfig) -> Eval {
    Ok(FeatureValue::count(nr_num(inputs.numeric())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfe_data::{ColumnType, Dataset};
    use ndarray::array;
    use proptest::prelude::*;

    fn labels(tokens: &[&str]) -> Vec<Value> {
        tokens.iter().map(|&t| Value::from(t)).collect()
    }

    fn numbers(rows: usize, cols: usize) -> Array2<Value> {
        Array2::from_elem((rows, cols), Value::from(1.0))
    }

    /// 10 instances, 3 numeric + 1 categorical attribute
    fn example_dataset() -> Dataset {
        let rows = (0..10)
            .map(|i| {
                vec![
                    Value::from(i as f64),
                    Value::from(2.0 * i as f64),
                    Value::from(0.5),
                    Value::from(if i % 2 == 0 { "even" } else { "odd" }),
                ]
            })
            .collect();
        Dataset::from_rows(rows, &["num", "num", "num", "cat"]).unwrap()
    }

    #[test]
    fn test_example_counts() {
        let ds = example_dataset();
        assert_eq!(nr_inst(ds.attributes()), 10);
        assert_eq!(nr_attr(ds.attributes()), 4);
        assert_eq!(nr_num(ds.numeric()), 3);
        assert_eq!(nr_cat(ds.categorical()), 1);
        assert_eq!(
            cat_to_num(ds.categorical(), ds.numeric()),
            FeatureValue::Scalar(1.0 / 3.0)
        );
        assert_eq!(
            num_to_cat(ds.categorical(), ds.numeric()),
            FeatureValue::Scalar(3.0)
        );
    }

    #[test]
    fn test_example_binary_columns() {
        // only the categorical column has exactly two values
        assert_eq!(nr_bin(example_dataset().attributes()), 1);
    }

    #[test]
    fn test_nr_bin() {
        let x = array![
            [Value::from(0.0), Value::from(5.0), Value::from(1.0)],
            [Value::from(1.0), Value::from(5.0), Value::from(0.0)],
            [Value::from(0.0), Value::from(5.0), Value::from(1.0)],
        ];
        assert_eq!(nr_bin(&x), 2);
    }

    #[test]
    fn test_nr_bin_text_columns() {
        let x = array![
            [Value::from("yes"), Value::from("a")],
            [Value::from("no"), Value::from("b")],
            [Value::from("yes"), Value::from("c")],
        ];
        assert_eq!(nr_bin(&x), 1);
    }

    #[test]
    fn test_cat_to_num_without_numeric() {
        let c = array![[Value::from("a")]];
        let n = Array2::<f64>::zeros((1, 0));
        assert!(cat_to_num(&c, &n).is_undefined());
        assert_eq!(num_to_cat(&c, &n), FeatureValue::Scalar(0.0));
    }

    #[test]
    fn test_attr_to_inst_without_instances() {
        let x = numbers(0, 3);
        assert_eq!(
            attr_to_inst(&x),
            Err(FeatureError::DivisionByZero("number of instances"))
        );
        assert_eq!(inst_to_attr(&x), Ok(0.0));
    }

    #[test]
    fn test_freq_class_sorted() {
        let y = labels(&["a", "a", "b", "c", "c", "c"]);
        assert_eq!(nr_class(&y), 3);
        assert_eq!(
            freq_class(&y, &FreqClassConfig::default()),
            FeatureValue::Sequence(vec![2.0 / 6.0, 1.0 / 6.0, 3.0 / 6.0])
        );
    }

    #[test]
    fn test_freq_class_first_seen() {
        let y = labels(&["b", "a", "b"]);
        let config = FreqClassConfig {
            order: ClassOrder::FirstSeen,
        };
        assert_eq!(
            freq_class(&y, &config),
            FeatureValue::Sequence(vec![2.0 / 3.0, 1.0 / 3.0])
        );
        let named = class_frequencies(&y, ClassOrder::FirstSeen);
        assert_eq!(named[0].0, Value::from("b"));
        assert_eq!(named[1].0, Value::from("a"));
    }

    #[test]
    fn test_freq_class_empty() {
        assert!(freq_class(&[], &FreqClassConfig::default()).is_undefined());
        assert_eq!(nr_class(&[]), 0);
    }

    #[test]
    fn test_specs_are_unique_and_sorted() {
        let names: Vec<_> = SPECS.iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_numeric_partition_example() {
        let ds = Dataset::new(
            numbers(2, 3),
            vec![ColumnType::Numeric, ColumnType::Categorical, ColumnType::Numeric],
        )
        .unwrap();
        assert_eq!(nr_num(ds.numeric()) + nr_cat(ds.categorical()), nr_attr(ds.attributes()));
    }

    proptest! {
        #[test]
        fn prop_attr_inst_reciprocal(rows in 1usize..50, cols in 1usize..50) {
            let x = Array2::<f64>::zeros((rows, cols));
            let a = attr_to_inst(&x).unwrap();
            let b = inst_to_attr(&x).unwrap();
            prop_assert!((a - 1.0 / b).abs() < 1e-12);
        }

        #[test]
        fn prop_cat_num_reciprocal(cats in 0usize..20, nums in 0usize..20) {
            let c = Array2::from_elem((2, cats), Value::from("k"));
            let n = Array2::<f64>::zeros((2, nums));
            let c2n = cat_to_num(&c, &n);
            let n2c = num_to_cat(&c, &n);
            prop_assert_eq!(c2n.is_undefined(), nums == 0);
            if cats > 0 && nums > 0 {
                prop_assert!((c2n.scalar_or_nan() - 1.0 / n2c.scalar_or_nan()).abs() < 1e-12);
            }
        }

        #[test]
        fn prop_freq_class_sums_to_one(y in proptest::collection::vec(0u8..6, 1..200)) {
            let y: Vec<Value> = y.into_iter().map(|v| Value::from(f64::from(v))).collect();
            let freq = freq_class(&y, &FreqClassConfig::default());
            let values = freq.as_sequence().unwrap();
            prop_assert_eq!(values.len(), nr_class(&y));
            prop_assert!((values.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }
}
