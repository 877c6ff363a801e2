//! Summary Functions for Sequence-valued Features

use crate::value::FeatureValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Summary name that matches no summary function
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown summary function: {0}")]
pub struct UnknownSummary(pub String);

/// Central moments of a sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Moments {
    /// Number of values
    pub n: usize,
    /// Mean value
    pub mean: f64,
    /// Second central moment (population variance)
    pub m2: f64,
    /// Third central moment
    pub m3: f64,
    /// Fourth central moment
    pub m4: f64,
}

impl Moments {
    /// Compute central moments from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        // an inexact mean leaves rounding residue in every deviation
        if values.iter().all(|&v| v == values[0]) {
            return Self {
                n: values.len(),
                mean,
                ..Self::default()
            };
        }

        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;

        for &v in values {
            let d = v - mean;
            m2 += d * d;
            m3 += d * d * d;
            m4 += d * d * d * d;
        }

        Self {
            n: values.len(),
            mean,
            m2: m2 / n,
            m3: m3 / n,
            m4: m4 / n,
        }
    }

    /// Skewness: E[(X-μ)³] / σ³, undefined for constant input
    pub fn skewness(&self) -> Option<f64> {
        (self.n > 0 && self.m2 > 0.0).then(|| self.m3 / self.m2.powf(1.5))
    }

    /// Excess kurtosis: E[(X-μ)⁴] / σ⁴ - 3, undefined for constant input
    pub fn kurtosis(&self) -> Option<f64> {
        (self.n > 0 && self.m2 > 0.0).then(|| self.m4 / (self.m2 * self.m2) - 3.0)
    }

    /// Sample variance (n - 1 denominator)
    pub fn sample_variance(&self) -> Option<f64> {
        (self.n >= 2).then(|| self.m2 * self.n as f64 / (self.n - 1) as f64)
    }
}

/// Reduction applied to a sequence-valued feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Summary {
    Mean,
    /// Sample standard deviation
    Sd,
    /// Sample variance
    Var,
    Min,
    Max,
    Median,
    Range,
    Sum,
    Skewness,
    Kurtosis,
}

impl Summary {
    /// Every summary, in declaration order
    pub const ALL: [Summary; 10] = [
        Summary::Mean,
        Summary::Sd,
        Summary::Var,
        Summary::Min,
        Summary::Max,
        Summary::Median,
        Summary::Range,
        Summary::Sum,
        Summary::Skewness,
        Summary::Kurtosis,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Summary::Mean => "mean",
            Summary::Sd => "sd",
            Summary::Var => "var",
            Summary::Min => "min",
            Summary::Max => "max",
            Summary::Median => "median",
            Summary::Range => "range",
            Summary::Sum => "sum",
            Summary::Skewness => "skewness",
            Summary::Kurtosis => "kurtosis",
        }
    }

    /// Reduce a sequence, `Undefined` when the summary has no value
    pub fn apply(&self, values: &[f64]) -> FeatureValue {
        if values.is_empty() {
            return FeatureValue::Undefined;
        }

        let result = match self {
            Summary::Sum => Some(values.iter().sum()),
            Summary::Min => Some(values.iter().copied().fold(f64::INFINITY, f64::min)),
            Summary::Max => Some(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            Summary::Range => {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                Some(max - min)
            }
            Summary::Median => Some(median(values)),
            Summary::Mean => Some(Moments::compute(values).mean),
            Summary::Var => Moments::compute(values).sample_variance(),
            Summary::Sd => Moments::compute(values).sample_variance().map(f64::sqrt),
            Summary::Skewness => Moments::compute(values).skewness(),
            Summary::Kurtosis => Moments::compute(values).kurtosis(),
        };

        result.map_or(FeatureValue::Undefined, FeatureValue::Scalar)
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Summary {
    type Err = UnknownSummary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Summary::ALL
            .into_iter()
            .find(|summary| summary.as_str() == s)
            .ok_or(UnknownSummary(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(v: FeatureValue) -> f64 {
        v.as_scalar().expect("defined summary")
    }

    #[test]
    fn test_mean_computation() {
        let values = vec![1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0];
        assert!((scalar(Summary::Mean.apply(&values)) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_sd() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // population sd is 2.0, sample sd is sqrt(32 / 7)
        assert!((scalar(Summary::Sd.apply(&values)) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!((scalar(Summary::Var.apply(&values)) - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_sd_undefined() {
        assert!(Summary::Sd.apply(&[0.4]).is_undefined());
        assert_eq!(Summary::Mean.apply(&[0.4]), FeatureValue::Scalar(0.4));
    }

    #[test]
    fn test_order_statistics() {
        let values = [3.0, 1.0, 4.0, 1.5];
        assert_eq!(Summary::Min.apply(&values), FeatureValue::Scalar(1.0));
        assert_eq!(Summary::Max.apply(&values), FeatureValue::Scalar(4.0));
        assert_eq!(Summary::Range.apply(&values), FeatureValue::Scalar(3.0));
        assert_eq!(Summary::Median.apply(&values), FeatureValue::Scalar(2.25));
        assert_eq!(Summary::Sum.apply(&values), FeatureValue::Scalar(9.5));
    }

    #[test]
    fn test_shape_moments() {
        // symmetric input has no skew
        let skew = scalar(Summary::Skewness.apply(&[1.0, 2.0, 3.0]));
        assert!(skew.abs() < 1e-12);
        // two-point distribution has excess kurtosis of -2
        let kurt = scalar(Summary::Kurtosis.apply(&[0.0, 1.0, 0.0, 1.0]));
        assert!((kurt + 2.0).abs() < 1e-12);
        assert!(Summary::Skewness.apply(&[0.5, 0.5]).is_undefined());
    }

    #[test]
    fn test_constant_with_inexact_mean() {
        let values = vec![0.1; 10];
        assert!(Summary::Skewness.apply(&values).is_undefined());
        assert!(Summary::Kurtosis.apply(&values).is_undefined());
        assert_eq!(Summary::Sd.apply(&values), FeatureValue::Scalar(0.0));
        assert_eq!(Summary::Var.apply(&values), FeatureValue::Scalar(0.0));
    }

    #[test]
    fn test_empty_values() {
        for summary in Summary::ALL {
            assert!(summary.apply(&[]).is_undefined());
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("SD".parse::<Summary>(), Ok(Summary::Sd));
        assert_eq!(" kurtosis ".parse::<Summary>(), Ok(Summary::Kurtosis));
        assert_eq!(
            "quantiles".parse::<Summary>(),
            Err(UnknownSummary("quantiles".to_string()))
        );
    }
}
