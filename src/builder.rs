//! Model builder.
//!
//! `MlpBuilder` checks every dimension while the model is described, so a built [`Mlp`]
//! always passes [`Mlp::validate`]. It also picks a weight initializer per activation:
//!
//! - `tanh` / `sigmoid` / `identity`: Xavier/Glorot
//! - `relu` / `leaky relu`: He/Kaiming
//!
//! The output layer always uses Xavier since it produces raw logits.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Activation, Block, Error, Init, LinearLayer, Mlp, Result};

#[derive(Debug, Clone, Copy)]
struct HiddenSpec {
    width: usize,
    activation: Activation,
}

#[derive(Debug, Clone)]
/// Builder for an `Mlp`.
///
/// Example:
///
/// ```rust
/// use tiny_mlp::{Activation, MlpBuilder};
///
/// # fn main() -> tiny_mlp::Result<()> {
/// let mlp = MlpBuilder::new(2)?
///     .hidden(8, Activation::ReLU)?
///     .output(3)?
///     .build_with_seed(0)?;
/// assert_eq!(mlp.forward(&[0.5, -0.5])?.len(), 3);
/// # Ok(())
/// # }
/// ```
pub struct MlpBuilder {
    input_dim: usize,
    hidden: Option<HiddenSpec>,
    output_dim: Option<usize>,
}

impl MlpBuilder {
    /// Start building an MLP that accepts inputs of length `input_dim`.
    pub fn new(input_dim: usize) -> Result<Self> {
        if input_dim == 0 {
            return Err(Error::InvalidConfig("input_dim must be > 0".to_owned()));
        }
        Ok(Self {
            input_dim,
            hidden: None,
            output_dim: None,
        })
    }

    /// Set the hidden block width and activation.
    pub fn hidden(mut self, width: usize, activation: Activation) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidConfig("hidden width must be > 0".to_owned()));
        }
        activation.validate()?;

        self.hidden = Some(HiddenSpec { width, activation });
        Ok(self)
    }

    /// Set the number of output logits.
    pub fn output(mut self, output_dim: usize) -> Result<Self> {
        if output_dim == 0 {
            return Err(Error::InvalidConfig("output_dim must be > 0".to_owned()));
        }
        self.output_dim = Some(output_dim);
        Ok(self)
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, seed: u64) -> Result<Mlp> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build_with_rng(&mut rng)
    }

    /// Build using the provided RNG.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Mlp> {
        let Some(spec) = self.hidden else {
            return Err(Error::InvalidConfig(
                "mlp needs a hidden block".to_owned(),
            ));
        };
        let Some(output_dim) = self.output_dim else {
            return Err(Error::InvalidConfig(
                "mlp needs an output width".to_owned(),
            ));
        };

        let init = default_init_for_activation(spec.activation);
        let hidden = LinearLayer::new_with_rng(self.input_dim, spec.width, init, rng)?;
        let out = LinearLayer::new_with_rng(spec.width, output_dim, Init::Xavier, rng)?;

        Mlp::new(Block::new(hidden, spec.activation)?, out)
    }
}

#[inline]
fn default_init_for_activation(act: Activation) -> Init {
    match act {
        Activation::Tanh | Activation::Sigmoid | Activation::Identity => Init::Xavier,
        Activation::ReLU | Activation::LeakyReLU { .. } => Init::He,
    }
}
