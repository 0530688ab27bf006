//! Shape-checked forward inference for small feed-forward networks.
//!
//! `tiny-mlp` evaluates a one-hidden-block MLP on single `f64` vectors and turns the
//! resulting logits into probabilities and losses. It is meant for teaching and for test
//! harnesses that check numeric invariants, not for training.
//!
//! # Pipeline
//!
//! ```text
//! x -> LinearLayer -> Activation -> LinearLayer -> logits -> softmax / cross-entropy
//!      \________ Block ________/
//!      \______________ Mlp _______________/
//! ```
//!
//! # Validation
//!
//! Layers, blocks and networks are plain data with public fields. Every `forward` call
//! re-validates shapes before touching any number, and the validating constructors
//! ([`LinearLayer::new`], [`Block::new`], [`Mlp::new`], [`MlpBuilder`]) reject bad models
//! up front. Failures are [`Error`] values; wrapped stage errors keep their cause, and
//! [`Error::kind`] reports the root failure category.
//!
//! # Data layout and shapes
//!
//! - Scalars are `f64`.
//! - Vectors are `&[f64]`; outputs are freshly allocated `Vec<f64>`.
//! - Layer weights are rows of length `in_dim`, one row per output (`out_dim` rows).
//! - An empty bias vector means the layer has no bias.
//!
//! # Quick start
//!
//! ```rust
//! use tiny_mlp::{Activation, MlpBuilder, cross_entropy, softmax_with_stats};
//!
//! # fn main() -> tiny_mlp::Result<()> {
//! let mlp = MlpBuilder::new(2)?
//!     .hidden(8, Activation::ReLU)?
//!     .output(3)?
//!     .build_with_seed(0)?;
//!
//! let logits = mlp.forward(&[0.25, -1.0])?;
//! let (p, stats) = softmax_with_stats(&logits)?;
//! assert!((stats.sum_prob - 1.0).abs() < 1e-12);
//!
//! let loss = cross_entropy(&[0.0, 1.0, 0.0], &p)?;
//! assert!(loss.is_finite() && loss > 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Forward passes emit `tracing` events at `trace` level and saturated softmax outputs at
//! `debug` level. Nothing is printed unless the caller installs a subscriber.

pub mod activation;
pub mod block;
pub mod builder;
pub mod error;
pub mod layer;
pub mod linalg;
pub mod loss;
pub mod mlp;
pub mod softmax;
pub mod vocab;

pub use activation::Activation;
pub use block::Block;
pub use builder::MlpBuilder;
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use layer::{Init, LinearLayer};
pub use linalg::{add_vec, argmax, dot, is_rectangular, mat_vec_mul, shift};
pub use loss::{
    CrossEntropyConfig, binary_cross_entropy, binary_cross_entropy_with, cross_entropy,
    cross_entropy_with,
};
pub use mlp::Mlp;
pub use softmax::{SATURATION_THRESHOLD, SoftmaxStats, softmax, softmax_with_stats};
pub use vocab::Vocab;
