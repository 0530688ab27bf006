use rand::Rng;
use tracing::trace;

use crate::linalg::{add_vec, is_rectangular, mat_vec_mul};
use crate::{Error, Result, ResultExt};

/// Weight initialization scheme for [`LinearLayer::new_with_rng`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Init {
    /// Xavier/Glorot uniform: `U(-sqrt(6 / (in + out)), sqrt(6 / (in + out)))`.
    Xavier,
    /// He/Kaiming uniform: `U(-sqrt(6 / in), sqrt(6 / in))`.
    He,
}

/// Affine transform `y = W x + b`.
///
/// The fields are plain data and may be changed between calls, so [`LinearLayer::forward`]
/// re-validates every time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearLayer {
    pub in_dim: usize,
    pub out_dim: usize,
    /// Shape `(out_dim, in_dim)`, one row per output.
    pub weights: Vec<Vec<f64>>,
    /// Empty means "no bias"; otherwise exactly `out_dim` entries.
    pub biases: Vec<f64>,
}

impl LinearLayer {
    /// Build a layer from explicit parameters, validating them up front.
    ///
    /// Dimensions are taken from `weights`: `out_dim` is the row count and `in_dim` the
    /// width of the first row.
    pub fn new(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Result<Self> {
        let out_dim = weights.len();
        let in_dim = weights.first().map_or(0, Vec::len);
        let layer = Self {
            in_dim,
            out_dim,
            weights,
            biases,
        };
        layer.validate_all()?;
        Ok(layer)
    }

    /// Build a randomly initialized layer with a zero bias.
    pub fn new_with_rng<R: Rng + ?Sized>(
        in_dim: usize,
        out_dim: usize,
        init: Init,
        rng: &mut R,
    ) -> Result<Self> {
        if in_dim == 0 || out_dim == 0 {
            return Err(Error::InvalidConfig(format!(
                "layer dims must be > 0, got in_dim={in_dim} out_dim={out_dim}"
            )));
        }

        let limit = match init {
            Init::Xavier => (6.0 / (in_dim + out_dim) as f64).sqrt(),
            Init::He => (6.0 / in_dim as f64).sqrt(),
        };

        let weights = (0..out_dim)
            .map(|_| (0..in_dim).map(|_| rng.gen_range(-limit..limit)).collect())
            .collect();

        Ok(Self {
            in_dim,
            out_dim,
            weights,
            biases: vec![0.0; out_dim],
        })
    }

    #[inline]
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    #[inline]
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }

    #[inline]
    pub fn has_bias(&self) -> bool {
        !self.biases.is_empty()
    }

    /// Check declared dimensions against the weight matrix.
    ///
    /// Fails if either dimension is zero or if the weight row count differs from
    /// `out_dim`. Row widths are checked by [`LinearLayer::forward`].
    pub fn validate(&self) -> Result<()> {
        if self.in_dim == 0 || self.out_dim == 0 {
            return Err(Error::InvalidConfig(format!(
                "invalid layer dims: in_dim={} out_dim={}",
                self.in_dim, self.out_dim
            )));
        }
        if self.weights.len() != self.out_dim {
            return Err(Error::ShapeMismatch(format!(
                "weights have {} rows, expected out_dim {}",
                self.weights.len(),
                self.out_dim
            )));
        }
        Ok(())
    }

    /// Forward pass for a single sample.
    ///
    /// Computes `W * x`, plus the bias when one is present.
    ///
    /// Shape contract:
    /// - `x.len() == self.in_dim`
    /// - `biases` is empty or has `out_dim` entries
    ///
    /// The output has length `out_dim`.
    pub fn forward(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.validate().context("linear layer failed validation")?;

        if x.len() != self.in_dim {
            return Err(Error::ShapeMismatch(format!(
                "x has length {}, expected in_dim {}",
                x.len(),
                self.in_dim
            )));
        }
        self.check_bias()?;

        trace!(
            in_dim = self.in_dim,
            out_dim = self.out_dim,
            bias = self.has_bias(),
            "linear forward"
        );

        let y = mat_vec_mul(&self.weights, x).context("linear layer matrix multiply failed")?;
        if self.has_bias() {
            add_vec(&y, &self.biases)
        } else {
            Ok(y)
        }
    }

    fn check_bias(&self) -> Result<()> {
        if self.has_bias() && self.biases.len() != self.out_dim {
            return Err(Error::InvalidConfig(format!(
                "bias has length {}, expected out_dim {}",
                self.biases.len(),
                self.out_dim
            )));
        }
        Ok(())
    }

    // Construction-time check: everything `forward` would reject regardless of input.
    fn validate_all(&self) -> Result<()> {
        self.validate()?;
        self.check_bias()?;
        is_rectangular(&self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layer(in_dim: usize, out_dim: usize, weights: Vec<Vec<f64>>, biases: Vec<f64>) -> LinearLayer {
        LinearLayer {
            in_dim,
            out_dim,
            weights,
            biases,
        }
    }

    fn assert_close(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len());
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-9, "got={got:?} want={want:?}");
        }
    }

    #[test]
    fn forward_without_bias() {
        let l = layer(2, 2, vec![vec![0.5, 1.0], vec![2.0, 3.0]], vec![]);
        let y = l.forward(&[1.8, 3.0]).unwrap();
        assert_close(&y, &[3.9, 12.6]);
    }

    #[test]
    fn forward_with_zero_weights_returns_bias() {
        let l = layer(2, 2, vec![vec![0.0, 0.0], vec![0.0, 0.0]], vec![4.2, 3.0]);
        let y = l.forward(&[7.1, -2.4]).unwrap();
        assert_close(&y, &[4.2, 3.0]);
    }

    #[test]
    fn forward_with_zero_input_returns_bias() {
        let l = layer(
            2,
            3,
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![4.2, 3.0, 1.3],
        );
        let y = l.forward(&[0.0, 0.0]).unwrap();
        assert_close(&y, &[4.2, 3.0, 1.3]);
    }

    #[test]
    fn forward_rejects_wrong_bias_length() {
        let l = layer(2, 2, vec![vec![1.0, 2.0], vec![3.0, 4.0]], vec![1.0, 2.0, 3.0]);
        let err = l.forward(&[1.0, 1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn forward_rejects_input_length_mismatch() {
        let l = layer(2, 2, vec![vec![1.0, 2.0], vec![3.0, 4.0]], vec![]);
        let err = l.forward(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn forward_rejects_row_count_mismatch() {
        let l = layer(2, 3, vec![vec![1.0, 2.0], vec![3.0, 4.0]], vec![]);
        let err = l.forward(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::Context { .. }));
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn forward_rejects_ragged_row() {
        let l = layer(2, 2, vec![vec![1.0, 2.0], vec![3.0]], vec![]);
        let err = l.forward(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn zero_dims_are_invalid() {
        let err = LinearLayer::default().forward(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert!(layer(0, 1, vec![vec![]], vec![]).validate().is_err());
    }

    #[test]
    fn identical_rows_give_identical_outputs() {
        let l = layer(3, 2, vec![vec![0.3, -1.2, 2.0]; 2], vec![]);
        let y = l.forward(&[1.0, 2.0, 3.0]).unwrap();
        assert!((y[0] - y[1]).abs() < 1e-9);
    }

    #[test]
    fn new_validates_up_front() {
        let ok = LinearLayer::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], vec![0.5, 0.5]).unwrap();
        assert_eq!((ok.in_dim(), ok.out_dim()), (2, 2));

        assert!(LinearLayer::new(vec![], vec![]).is_err());
        assert!(LinearLayer::new(vec![vec![1.0, 2.0], vec![3.0]], vec![]).is_err());
        assert!(LinearLayer::new(vec![vec![1.0]], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn seeded_init_is_deterministic_and_bounded() {
        let a = LinearLayer::new_with_rng(4, 3, Init::He, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = LinearLayer::new_with_rng(4, 3, Init::He, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);

        let limit = (6.0_f64 / 4.0).sqrt();
        assert!(a.weights.iter().flatten().all(|w| w.abs() <= limit));
        assert_eq!(a.biases, vec![0.0; 3]);
        assert!(a.validate().is_ok());

        assert!(LinearLayer::new_with_rng(0, 3, Init::Xavier, &mut StdRng::seed_from_u64(0)).is_err());
    }
}
