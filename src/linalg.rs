//! Vector and matrix primitives.
//!
//! Vectors are `&[f64]` and matrices are slices of rows (`&[Vec<f64>]`). Every function
//! checks shapes before touching the data and returns a freshly allocated result; inputs
//! are never mutated.

use crate::{Error, Result, ResultExt};

/// Dot product of two equal-length vectors. Two empty vectors give `0.0`.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::ShapeMismatch(format!(
            "dot operands must have the same length, got {} and {}",
            a.len(),
            b.len()
        )));
    }

    Ok(a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y))
}

/// Element-wise `v + b`.
pub fn add_vec(v: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    if v.len() != b.len() {
        return Err(Error::ShapeMismatch(format!(
            "addend length {} is not equal to input vector length {}",
            b.len(),
            v.len()
        )));
    }
    Ok(v.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Adds `x` to every element of `v`.
pub fn shift(v: &[f64], x: f64) -> Result<Vec<f64>> {
    if v.is_empty() {
        return Err(Error::ShapeMismatch(
            "cannot shift an empty vector".to_owned(),
        ));
    }
    Ok(v.iter().map(|el| el + x).collect())
}

/// Index of the largest element. Ties resolve to the earliest index.
pub fn argmax(v: &[f64]) -> Result<usize> {
    if v.is_empty() {
        return Err(Error::ShapeMismatch(
            "argmax of an empty vector is undefined".to_owned(),
        ));
    }

    let mut best = 0;
    let mut best_val = v[0];
    for (i, &x) in v.iter().enumerate().skip(1) {
        if x > best_val {
            best_val = x;
            best = i;
        }
    }
    Ok(best)
}

/// Checks that `m` has at least one row and that every row has the width of row 0.
pub fn is_rectangular(m: &[Vec<f64>]) -> Result<()> {
    let Some(first) = m.first() else {
        return Err(Error::ShapeMismatch(
            "matrix must have at least one row".to_owned(),
        ));
    };

    let width = first.len();
    for (i, row) in m.iter().enumerate() {
        if row.len() != width {
            return Err(Error::ShapeMismatch(format!(
                "matrix is not rectangular: row {i} has length {}, expected {width}",
                row.len()
            )));
        }
    }
    Ok(())
}

/// Matrix-vector product `W x`.
///
/// Shape contract:
/// - `w` is rectangular with at least one row
/// - every row of `w` has length `x.len()`
///
/// The output has one entry per row of `w`.
pub fn mat_vec_mul(w: &[Vec<f64>], x: &[f64]) -> Result<Vec<f64>> {
    is_rectangular(w).context("mat_vec_mul rejected the weight matrix")?;

    let mut out = Vec::with_capacity(w.len());
    for (i, row) in w.iter().enumerate() {
        if row.len() != x.len() {
            return Err(Error::ShapeMismatch(format!(
                "row {i} has length {}, x has length {} (row={row:?}, x={x:?})",
                row.len(),
                x.len()
            )));
        }
        let y = dot(row, x).with_context(|| format!("mat_vec_mul failed on row {i}"))?;
        out.push(y);
    }
    Ok(out)
}
