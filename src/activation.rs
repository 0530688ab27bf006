//! Activation functions.
//!
//! A block computes a pre-activation vector `z = W x + b` and then applies an activation
//! element-wise: `y = activation(z)`. Every variant goes through the same
//! [`Activation::apply`] entry point, so blocks and networks never match on the variant.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Element-wise activation function.
pub enum Activation {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "relu"))]
    ReLU,
    #[cfg_attr(feature = "serde", serde(rename = "leaky_relu"))]
    LeakyReLU {
        alpha: f64,
    },
    Tanh,
    Sigmoid,
    Identity,
}

impl Activation {
    /// Validate activation parameters.
    pub fn validate(self) -> Result<()> {
        match self {
            Activation::LeakyReLU { alpha } => {
                if !(alpha.is_finite() && alpha >= 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "leaky ReLU alpha must be finite and >= 0, got {alpha}"
                    )));
                }
            }
            Activation::ReLU | Activation::Tanh | Activation::Sigmoid | Activation::Identity => {}
        }

        Ok(())
    }

    /// Apply the activation to every element of `v`.
    ///
    /// Returns a new vector of the same length; `v` is left untouched. Fails on an empty
    /// input or invalid parameters.
    pub fn apply(self, v: &[f64]) -> Result<Vec<f64>> {
        if v.is_empty() {
            return Err(Error::ShapeMismatch(format!(
                "{} input must not be empty",
                self.name()
            )));
        }
        self.validate()?;

        Ok(v.iter().map(|&x| self.forward(x)).collect())
    }

    /// Short lowercase name, used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            Activation::ReLU => "relu",
            Activation::LeakyReLU { .. } => "leaky_relu",
            Activation::Tanh => "tanh",
            Activation::Sigmoid => "sigmoid",
            Activation::Identity => "identity",
        }
    }

    #[inline]
    fn forward(self, x: f64) -> f64 {
        match self {
            Activation::ReLU => x.max(0.0),
            Activation::LeakyReLU { alpha } => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => sigmoid(x),
            Activation::Identity => x,
        }
    }
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
