//! Numerically stable softmax.
//!
//! Logits are shifted by their maximum before exponentiation, so the largest weight is
//! exactly `exp(0) = 1` and no weight can overflow however large the logits are. The
//! shift also makes the result invariant to adding a constant to every logit.

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A distribution whose largest probability reaches this value is flagged as saturated.
pub const SATURATION_THRESHOLD: f64 = 1.0 - 1e-5;

/// Diagnostics gathered while computing a softmax.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SoftmaxStats {
    /// Sum of the shifted exponentials before normalization.
    pub sum: f64,
    /// Sum of the output probabilities; `1` up to rounding.
    pub sum_prob: f64,
    /// Largest raw (unshifted) logit.
    pub max_logit: f64,
    pub max_prob: f64,
    pub min_prob: f64,
    /// `max_prob >= SATURATION_THRESHOLD`.
    pub saturated: bool,
}

/// Softmax probabilities of `z`.
pub fn softmax(z: &[f64]) -> Result<Vec<f64>> {
    softmax_with_stats(z).map(|(p, _)| p)
}

/// Softmax probabilities of `z` together with [`SoftmaxStats`].
///
/// Fails if `z` is empty, if any element is NaN or infinite (reported with its index,
/// before any arithmetic), or if the normalization sum is zero or non-finite.
pub fn softmax_with_stats(z: &[f64]) -> Result<(Vec<f64>, SoftmaxStats)> {
    if z.is_empty() {
        return Err(Error::ShapeMismatch(
            "softmax input must not be empty".to_owned(),
        ));
    }

    let mut max_logit = z[0];
    for (i, &x) in z.iter().enumerate() {
        if !x.is_finite() {
            return Err(Error::NumericDomain(format!(
                "softmax input element {x} at position {i} is not finite"
            )));
        }
        if x > max_logit {
            max_logit = x;
        }
    }

    let mut weights = Vec::with_capacity(z.len());
    let mut sum = 0.0_f64;
    for &x in z {
        let w = (x - max_logit).exp();
        sum += w;
        weights.push(w);
    }

    if sum == 0.0 || !sum.is_finite() {
        return Err(Error::NumericDomain(format!(
            "softmax normalization sum is degenerate: {sum}"
        )));
    }

    let mut stats = SoftmaxStats {
        sum,
        sum_prob: 0.0,
        max_logit,
        max_prob: f64::NEG_INFINITY,
        min_prob: f64::INFINITY,
        saturated: false,
    };

    for w in weights.iter_mut() {
        let p = *w / sum;
        *w = p;
        stats.sum_prob += p;
        stats.min_prob = stats.min_prob.min(p);
        stats.max_prob = stats.max_prob.max(p);
    }
    stats.saturated = stats.max_prob >= SATURATION_THRESHOLD;

    if stats.saturated {
        debug!(
            max_logit = stats.max_logit,
            max_prob = stats.max_prob,
            "softmax output is saturated"
        );
    }

    Ok((weights, stats))
}
