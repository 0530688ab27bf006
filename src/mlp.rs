//! The network: one hidden block feeding an output layer that emits logits.
//!
//! Probabilities come from [`Mlp::predict_proba`], which runs the logits through softmax.

use tracing::trace;

use crate::linalg::argmax;
use crate::softmax::{SoftmaxStats, softmax_with_stats};
use crate::{Block, Error, LinearLayer, Result, ResultExt};

/// One hidden [`Block`] followed by an output [`LinearLayer`] producing logits.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    pub hidden: Block,
    pub out: LinearLayer,
}

impl Mlp {
    /// Build a network, validating the parts and the width between them.
    pub fn new(hidden: Block, out: LinearLayer) -> Result<Self> {
        let mlp = Self { hidden, out };
        mlp.validate()?;
        Ok(mlp)
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.hidden.in_dim()
    }

    #[inline]
    pub fn output_dim(&self) -> usize {
        self.out.out_dim
    }

    pub fn validate(&self) -> Result<()> {
        self.hidden
            .validate()
            .context("mlp hidden block failed validation")?;
        self.out
            .validate()
            .context("mlp output layer failed validation")?;

        if self.hidden.out_dim() != self.out.in_dim {
            return Err(Error::ShapeMismatch(format!(
                "hidden block out_dim {} does not match output layer in_dim {}",
                self.hidden.out_dim(),
                self.out.in_dim
            )));
        }
        Ok(())
    }

    /// Forward pass for a single sample; returns the output logits.
    ///
    /// Shape contract: `x.len() == self.input_dim()`. The output has length
    /// `self.output_dim()`.
    pub fn forward(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.validate()?;

        trace!(
            input_dim = self.input_dim(),
            hidden_dim = self.hidden.out_dim(),
            output_dim = self.output_dim(),
            "mlp forward"
        );

        let a = self
            .hidden
            .forward(x)
            .context("mlp hidden block forward failed")?;
        self.out
            .forward(&a)
            .context("mlp output layer forward failed")
    }

    /// Index of the largest logit.
    pub fn predict(&self, x: &[f64]) -> Result<usize> {
        let logits = self.forward(x)?;
        argmax(&logits)
    }

    /// Softmax probabilities of the logits, with diagnostics.
    pub fn predict_proba(&self, x: &[f64]) -> Result<(Vec<f64>, SoftmaxStats)> {
        let logits = self.forward(x)?;
        softmax_with_stats(&logits).context("mlp softmax over logits failed")
    }
}
