//! Newtype wrappers for validated hyperparameters.
//!
//! Every constructor rejects out-of-range values instead of clamping them,
//! so a misconfigured agent fails at construction time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Index of a discrete action.
pub type Action = usize;

fn check_range(
    name: &'static str,
    value: f64,
    expected: &'static str,
    in_range: bool,
) -> Result<f64> {
    if in_range && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidHyperparameter {
            name,
            value,
            expected,
        })
    }
}

/// Step size α, in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LearningRate(f64);

impl LearningRate {
    /// Create a learning rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] unless `0 < value <= 1`.
    pub fn new(value: f64) -> Result<Self> {
        check_range(
            "learning_rate",
            value,
            "a value in (0, 1]",
            value > 0.0 && value <= 1.0,
        )
        .map(LearningRate)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Discount factor γ, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Discount(f64);

impl Discount {
    /// Create a discount factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] unless `0 <= value <= 1`.
    pub fn new(value: f64) -> Result<Self> {
        check_range(
            "gamma",
            value,
            "a value in [0, 1]",
            (0.0..=1.0).contains(&value),
        )
        .map(Discount)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Exploration rate ε, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Epsilon(f64);

impl Epsilon {
    /// Create an exploration rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] unless `0 <= value <= 1`.
    pub fn new(value: f64) -> Result<Self> {
        check_range(
            "epsilon",
            value,
            "a value in [0, 1]",
            (0.0..=1.0).contains(&value),
        )
        .map(Epsilon)
    }

    /// Pure exploitation.
    pub const fn greedy() -> Self {
        Epsilon(0.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

macro_rules! impl_f64_conversions {
    ($($ty:ident),*) => {
        $(
            impl TryFrom<f64> for $ty {
                type Error = Error;

                fn try_from(value: f64) -> Result<Self> {
                    $ty::new(value)
                }
            }

            impl From<$ty> for f64 {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

impl_f64_conversions!(LearningRate, Discount, Epsilon);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learning_rate_bounds() {
        assert!(LearningRate::new(1.0).is_ok());
        assert!(LearningRate::new(0.5).is_ok());
        assert!(matches!(
            LearningRate::new(0.0),
            Err(Error::InvalidHyperparameter {
                name: "learning_rate",
                ..
            })
        ));
        assert!(LearningRate::new(1.01).is_err());
        assert!(LearningRate::new(f64::NAN).is_err());
    }

    #[test]
    fn test_discount_and_epsilon_bounds() {
        assert!(Discount::new(0.0).is_ok());
        assert!(Discount::new(1.0).is_ok());
        assert!(Discount::new(-0.1).is_err());
        assert!(Epsilon::new(0.0).is_ok());
        assert!(Epsilon::new(1.0).is_ok());
        assert!(Epsilon::new(1.5).is_err());
    }

    #[test]
    fn test_values_are_not_clamped() {
        let err = Epsilon::new(2.0).unwrap_err();
        match err {
            Error::InvalidHyperparameter { value, .. } => assert_eq!(value, 2.0),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let ok: LearningRate = serde_json::from_str("0.25").unwrap();
        assert_eq!(ok.value(), 0.25);
        assert!(serde_json::from_str::<LearningRate>("0").is_err());
    }
}
