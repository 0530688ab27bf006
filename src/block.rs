//! A linear layer followed by an activation.

use tracing::trace;

use crate::{Activation, LinearLayer, Result, ResultExt};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub layer: LinearLayer,
    pub activation: Activation,
}

impl Block {
    /// Build a block, validating both parts up front.
    pub fn new(layer: LinearLayer, activation: Activation) -> Result<Self> {
        let block = Self { layer, activation };
        block.validate()?;
        Ok(block)
    }

    #[inline]
    pub fn in_dim(&self) -> usize {
        self.layer.in_dim
    }

    #[inline]
    pub fn out_dim(&self) -> usize {
        self.layer.out_dim
    }

    pub fn validate(&self) -> Result<()> {
        self.layer
            .validate()
            .context("block linear layer failed validation")?;
        self.activation
            .validate()
            .context("block activation failed validation")?;
        Ok(())
    }

    /// `activation(layer(x))`.
    pub fn forward(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.validate()?;

        trace!(
            in_dim = self.in_dim(),
            out_dim = self.out_dim(),
            activation = self.activation.name(),
            "block forward"
        );

        let y = self
            .layer
            .forward(x)
            .context("block linear stage failed")?;
        self.activation
            .apply(&y)
            .with_context(|| format!("block {} stage failed", self.activation.name()))
    }
}
