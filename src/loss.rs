//! Cross-entropy losses.
//!
//! Predictions are probabilities (e.g. the output of [`crate::softmax()`]), not logits.
//! They are clamped into `[eps, 1 - eps]` before taking logarithms so a confident wrong
//! prediction yields a large finite loss instead of infinity.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tolerances used by the cross-entropy functions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossEntropyConfig {
    /// Predictions are clamped into `[eps, 1 - eps]`.
    pub eps: f64,
    /// Allowed deviation of the label sum from 1.
    pub label_sum_tol: f64,
    /// Allowed deviation of the prediction sum from 1. Looser than `label_sum_tol`
    /// since predictions usually carry rounding error from an upstream softmax.
    pub pred_sum_tol: f64,
}

impl Default for CrossEntropyConfig {
    fn default() -> Self {
        Self {
            eps: 1e-15,
            label_sum_tol: 1e-9,
            pred_sum_tol: 1e-6,
        }
    }
}

impl CrossEntropyConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.eps.is_finite() && self.eps > 0.0 && self.eps < 0.5) {
            return Err(Error::InvalidConfig(format!(
                "eps must be finite and in (0, 0.5), got {}",
                self.eps
            )));
        }
        for (name, tol) in [
            ("label_sum_tol", self.label_sum_tol),
            ("pred_sum_tol", self.pred_sum_tol),
        ] {
            if !(tol.is_finite() && tol >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {tol}"
                )));
            }
        }
        Ok(())
    }

    #[inline]
    fn clamp(&self, p: f64) -> f64 {
        p.clamp(self.eps, 1.0 - self.eps)
    }
}

/// Binary cross-entropy with default tolerances.
///
/// Returns `-(y ln(y_hat) + (1 - y) ln(1 - y_hat))`.
pub fn binary_cross_entropy(y: f64, y_hat: f64) -> Result<f64> {
    binary_cross_entropy_with(y, y_hat, &CrossEntropyConfig::default())
}

/// Binary cross-entropy for a hard label `y` (exactly 0 or 1) and predicted
/// probability `y_hat`.
pub fn binary_cross_entropy_with(y: f64, y_hat: f64, cfg: &CrossEntropyConfig) -> Result<f64> {
    cfg.validate()?;

    if !y.is_finite() {
        return Err(Error::NumericDomain(format!("y is not finite: {y}")));
    }
    if !y_hat.is_finite() {
        return Err(Error::NumericDomain(format!("y_hat is not finite: {y_hat}")));
    }
    if y != 0.0 && y != 1.0 {
        return Err(Error::DistributionConstraint(format!(
            "y must be 0 or 1, got {y}"
        )));
    }

    let p = cfg.clamp(y_hat);
    Ok(-(y * p.ln() + (1.0 - y) * (1.0 - p).ln()))
}

/// Multi-class cross-entropy with default tolerances.
pub fn cross_entropy(y: &[f64], y_hat: &[f64]) -> Result<f64> {
    cross_entropy_with(y, y_hat, &CrossEntropyConfig::default())
}

/// Multi-class cross-entropy of a one-hot label `y` against predicted
/// probabilities `y_hat`.
///
/// Returns `-Σ y[i] ln(clamp(y_hat[i]))`, which for a one-hot `y` is
/// `-ln(clamp(y_hat[k]))` for the true class `k`.
///
/// Shape contract: `y.len() == y_hat.len() > 0`.
pub fn cross_entropy_with(y: &[f64], y_hat: &[f64], cfg: &CrossEntropyConfig) -> Result<f64> {
    cfg.validate()?;

    if y.is_empty() {
        return Err(Error::ShapeMismatch("y must not be empty".to_owned()));
    }
    if y_hat.is_empty() {
        return Err(Error::ShapeMismatch("y_hat must not be empty".to_owned()));
    }
    if y.len() != y_hat.len() {
        return Err(Error::ShapeMismatch(format!(
            "y len {} does not match y_hat len {}",
            y.len(),
            y_hat.len()
        )));
    }

    let mut sum_y = 0.0_f64;
    let mut sum_p = 0.0_f64;
    let mut loss = 0.0_f64;
    for (i, (&t, &p)) in y.iter().zip(y_hat).enumerate() {
        if t != 0.0 && t != 1.0 {
            return Err(Error::DistributionConstraint(format!(
                "y must be one-hot, got y[{i}]={t}"
            )));
        }
        if !p.is_finite() {
            return Err(Error::NumericDomain(format!("y_hat[{i}] is not finite: {p}")));
        }

        sum_y += t;
        sum_p += p;
        // Zero labels contribute nothing.
        if t == 1.0 {
            loss -= cfg.clamp(p).ln();
        }
    }

    if (sum_y - 1.0).abs() > cfg.label_sum_tol {
        return Err(Error::DistributionConstraint(format!(
            "y must sum to 1, got {sum_y}"
        )));
    }
    if (sum_p - 1.0).abs() > cfg.pred_sum_tol {
        return Err(Error::DistributionConstraint(format!(
            "y_hat must sum to 1, got {sum_p}"
        )));
    }

    Ok(loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn bce_positive_label_uses_log_prediction() {
        let loss = binary_cross_entropy(1.0, 0.9).unwrap();
        assert!((loss - (-(0.9_f64).ln())).abs() < 1e-12);
    }

    #[test]
    fn bce_negative_label_uses_log_complement() {
        let loss = binary_cross_entropy(0.0, 0.9).unwrap();
        assert!((loss - (-(1.0_f64 - 0.9).ln())).abs() < 1e-12);
    }

    #[test]
    fn bce_punishes_confident_wrong_more_than_timid() {
        let confident_wrong = binary_cross_entropy(1.0, 0.01).unwrap();
        let timid = binary_cross_entropy(1.0, 0.51).unwrap();
        assert!(confident_wrong > timid);
    }

    #[test]
    fn bce_decreases_as_prediction_approaches_label() {
        let ps = [0.1, 0.3, 0.5, 0.7, 0.9, 0.99, 0.999999];
        let losses: Vec<f64> = ps
            .iter()
            .map(|&p| binary_cross_entropy(1.0, p).unwrap())
            .collect();
        assert!(losses.windows(2).all(|w| w[0] > w[1]), "{losses:?}");
    }

    #[test]
    fn bce_clamps_extreme_predictions() {
        let at_zero = binary_cross_entropy(1.0, 0.0).unwrap();
        assert!(at_zero.is_finite());
        assert!((at_zero - (-(1e-15_f64).ln())).abs() < 1e-9);

        let at_one = binary_cross_entropy(0.0, 1.0).unwrap();
        assert!(at_one.is_finite() && at_one > 30.0);
    }

    #[test]
    fn bce_rejects_soft_and_non_finite_inputs() {
        let err = binary_cross_entropy(0.2, 0.8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DistributionConstraint);

        for (y, y_hat) in [(f64::NAN, 0.8), (1.0, f64::NAN), (f64::INFINITY, 0.5), (0.0, f64::NEG_INFINITY)] {
            let err = binary_cross_entropy(y, y_hat).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NumericDomain);
        }
    }

    #[test]
    fn ce_is_negative_log_of_true_class() {
        let y = [0.0, 1.0, 0.0];
        let y_hat = [0.2, 0.7, 0.1];
        let loss = cross_entropy(&y, &y_hat).unwrap();
        assert!((loss - (-(0.7_f64).ln())).abs() < 1e-12);
    }

    #[test]
    fn ce_ignores_how_the_rest_is_distributed() {
        let y = [0.0, 0.0, 1.0, 0.0];
        let a = cross_entropy(&y, &[0.1, 0.2, 0.4, 0.3]).unwrap();
        let b = cross_entropy(&y, &[0.3, 0.1, 0.4, 0.2]).unwrap();
        let c = cross_entropy(&y, &[0.6, 0.0, 0.4, 0.0]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn ce_perfect_prediction_is_near_zero() {
        let loss = cross_entropy(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
        assert!((0.0..1e-12).contains(&loss));
    }

    #[test]
    fn ce_rejects_shape_problems() {
        assert_eq!(
            cross_entropy(&[], &[1.0]).unwrap_err().kind(),
            ErrorKind::ShapeMismatch
        );
        assert_eq!(
            cross_entropy(&[1.0], &[]).unwrap_err().kind(),
            ErrorKind::ShapeMismatch
        );
        assert_eq!(
            cross_entropy(&[1.0, 0.0], &[1.0]).unwrap_err().kind(),
            ErrorKind::ShapeMismatch
        );
    }

    #[test]
    fn ce_rejects_soft_or_multi_hot_labels() {
        let err = cross_entropy(&[0.5, 0.5], &[0.5, 0.5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DistributionConstraint);

        let err = cross_entropy(&[1.0, 1.0], &[0.5, 0.5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DistributionConstraint);

        let err = cross_entropy(&[0.0, 0.0], &[0.5, 0.5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DistributionConstraint);
    }

    #[test]
    fn ce_rejects_unnormalized_or_non_finite_predictions() {
        let err = cross_entropy(&[1.0, 0.0], &[0.6, 0.6]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DistributionConstraint);

        let err = cross_entropy(&[1.0, 0.0], &[f64::NAN, 0.5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericDomain);
        assert!(err.to_string().contains("y_hat[0]"));

        // Within the prediction tolerance.
        assert!(cross_entropy(&[1.0, 0.0], &[0.7 + 5e-7, 0.3]).is_ok());
    }

    #[test]
    fn ce_tolerances_are_configurable() {
        let strict = CrossEntropyConfig {
            pred_sum_tol: 1e-12,
            ..CrossEntropyConfig::default()
        };
        let y = [1.0, 0.0];
        let y_hat = [0.7 + 5e-7, 0.3];
        assert!(cross_entropy_with(&y, &y_hat, &strict).is_err());

        let bad = CrossEntropyConfig {
            eps: 0.7,
            ..CrossEntropyConfig::default()
        };
        assert_eq!(
            cross_entropy_with(&y, &[0.7, 0.3], &bad).unwrap_err().kind(),
            ErrorKind::InvalidConfig
        );
        assert!(binary_cross_entropy_with(1.0, 0.5, &bad).is_err());
    }

    #[test]
    fn zero_eps_is_rejected_instead_of_returning_infinity() {
        let no_clamp = CrossEntropyConfig {
            eps: 0.0,
            ..CrossEntropyConfig::default()
        };
        assert_eq!(
            binary_cross_entropy_with(1.0, 0.0, &no_clamp).unwrap_err().kind(),
            ErrorKind::InvalidConfig
        );
        assert_eq!(
            cross_entropy_with(&[1.0, 0.0], &[0.0, 1.0], &no_clamp)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidConfig
        );
    }
}
