//! spectral::lss — linear spectral statistics of coherence estimates.
//!
//! Purpose
//! -------
//! Reduce each per-frequency coherence matrix to the linear spectral
//! statistic `(1/p)·Σ_i f(λ_i)`, the average of a test function over the
//! matrix eigenvalues.
//!
//! Key behaviors
//! -------------
//! - Full Hermitian matrices: eigenvalues from `nalgebra`'s Hermitian
//!   eigen-solver.
//! - Half factors `H`: squared singular values of `H`, which are the
//!   non-trivial eigenvalues of `H·Hᴴ`; their count is `min(rows, cols)`.
//! - [`linear_spectral_statistics`] evaluates every frequency in parallel
//!   with `rayon`, keeping the frequency order.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ndarray` inputs are copied into a `nalgebra::DMatrix` column by
//!   column before decomposition; no symmetrisation is applied.
//! - Full matrices must be square; a non-square input fails with
//!   [`SpectralError::ShapeMismatch`].
//! - When `B ≥ M`, full and half estimates give the same statistic; when
//!   `B < M` the full matrix adds `M − B` zero eigenvalues.
//!
//! Testing notes
//! -------------
//! - Unit tests check diagonal and rank-one matrices with known spectra,
//!   full/half agreement, and order preservation of the parallel map.

use crate::spectral::{
    coherence::{CoherenceEstimate, CoherenceVariant},
    errors::{SpectralError, SpectralResult},
};
use nalgebra::DMatrix;
use ndarray::Array2;
use num_complex::Complex64;
use rayon::prelude::*;

/// LSS of every matrix of `estimate`, in frequency order.
///
/// Parameters
/// ----------
/// - `estimate`: `&CoherenceEstimate`
///   Full or half coherence matrices.
/// - `f`: `&F` where `F: Fn(f64) -> f64 + Sync`
///   Test function applied to each eigenvalue.
///
/// Returns
/// -------
/// `SpectralResult<Vec<f64>>`
///   One statistic per frequency; same length as `estimate.frequencies()`.
pub fn linear_spectral_statistics<F>(
    estimate: &CoherenceEstimate, f: &F,
) -> SpectralResult<Vec<f64>>
where
    F: Fn(f64) -> f64 + Sync,
{
    let variant = estimate.variant();
    estimate
        .matrices()
        .par_iter()
        .map(|matrix| match variant {
            CoherenceVariant::Full => lss_full(matrix, f),
            CoherenceVariant::Half => lss_half(matrix, f),
        })
        .collect()
}

/// LSS of a Hermitian matrix: mean of `f` over its eigenvalues.
pub fn lss_full<F: Fn(f64) -> f64>(matrix: &Array2<Complex64>, f: &F) -> SpectralResult<f64> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(SpectralError::ShapeMismatch { expected: rows, found: cols });
    }
    let mut nalg = DMatrix::<Complex64>::zeros(rows, cols);
    fill_dmatrix(matrix, &mut nalg);
    let eigenvalues = nalg.symmetric_eigenvalues();
    Ok(mean_of(eigenvalues.iter().copied(), f))
}

/// LSS of `H·Hᴴ` from a rectangular factor `H`: mean of `f(σ²)`.
pub fn lss_half<F: Fn(f64) -> f64>(matrix: &Array2<Complex64>, f: &F) -> SpectralResult<f64> {
    let (rows, cols) = matrix.dim();
    let mut nalg = DMatrix::<Complex64>::zeros(rows, cols);
    fill_dmatrix(matrix, &mut nalg);
    let singular_values = nalg.singular_values();
    Ok(mean_of(singular_values.iter().map(|s| s * s), f))
}

// ---- Helper methods ----

/// Copy an `ndarray` matrix into a preallocated `DMatrix` of the same shape.
///
/// Writes proceed column by column, matching the column-major storage of
/// `DMatrix`.
fn fill_dmatrix(src: &Array2<Complex64>, dst: &mut DMatrix<Complex64>) {
    let (rows, cols) = src.dim();
    for j in 0..cols {
        for i in 0..rows {
            dst[(i, j)] = src[[i, j]];
        }
    }
}

fn mean_of<I, F>(values: I, f: &F) -> f64
where
    I: Iterator<Item = f64>,
    F: Fn(f64) -> f64,
{
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), x| (sum + f(x), count + 1));
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Known spectra (diagonal, rank-one) for full and half inputs.
    // - Order preservation of the parallel per-frequency map.
    // - Rejection of non-square full matrices.
    //
    // They intentionally DO NOT cover:
    // - How coherence matrices are estimated; see `spectral::coherence`.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    // Purpose
    // -------
    // Verify the full LSS on a Hermitian matrix with known eigenvalues.
    //
    // Given
    // -----
    // - C = [[1, i/2], [−i/2, 1]] with eigenvalues 1/2 and 3/2, f(x) = x².
    //
    // Expect
    // ------
    // - LSS = (1/4 + 9/4)/2 = 5/4.
    fn lss_full_matches_known_eigenvalues() {
        // Arrange
        let matrix = array![[c(1.0, 0.0), c(0.0, 0.5)], [c(0.0, -0.5), c(1.0, 0.0)]];

        // Act
        let value = lss_full(&matrix, &|x: f64| x * x).unwrap();

        // Assert
        assert_relative_eq!(value, 1.25, epsilon = TOL);
    }

    #[test]
    // Purpose
    // -------
    // Check the half LSS uses squared singular values over min(rows, cols).
    //
    // Given
    // -----
    // - H = [[1, 1], [1, 1], [0, 0]] (3×2), so H·Hᴴ has non-zero eigenvalue 4
    //   and the second singular value of H is 0; f(x) = x.
    //
    // Expect
    // ------
    // - LSS = (4 + 0)/2 = 2.
    fn lss_half_averages_squared_singular_values() {
        // Arrange
        let matrix = array![
            [c(1.0, 0.0), c(1.0, 0.0)],
            [c(1.0, 0.0), c(1.0, 0.0)],
            [c(0.0, 0.0), c(0.0, 0.0)]
        ];

        // Act
        let value = lss_half(&matrix, &|x: f64| x).unwrap();

        // Assert
        assert_relative_eq!(value, 2.0, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the parallel map keeps frequency order.
    //
    // Given
    // -----
    // - Three diagonal matrices diag(k, k), k = 1, 2, 3, and f(x) = x.
    //
    // Expect
    // ------
    // - [1, 2, 3].
    fn linear_spectral_statistics_preserves_frequency_order() {
        // Arrange
        let matrices: Vec<Array2<Complex64>> = (1..=3)
            .map(|k| {
                let k = k as f64;
                array![[c(k, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(k, 0.0)]]
            })
            .collect();
        let estimate =
            CoherenceEstimate::new(CoherenceVariant::Full, vec![-0.1, 0.0, 0.1], matrices)
                .unwrap();

        // Act
        let values = linear_spectral_statistics(&estimate, &|x: f64| x).unwrap();

        // Assert
        assert_eq!(values.len(), 3);
        for (k, value) in values.iter().enumerate() {
            assert_relative_eq!(*value, (k + 1) as f64, epsilon = TOL);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify non-square full matrices are rejected.
    //
    // Given
    // -----
    // - A 2×3 matrix passed as a full coherence matrix.
    //
    // Expect
    // ------
    // - `ShapeMismatch { expected: 2, found: 3 }`.
    fn lss_full_rejects_non_square_matrix() {
        // Arrange
        let matrix = Array2::<Complex64>::zeros((2, 3));

        // Act
        let result = lss_full(&matrix, &|x: f64| x);

        // Assert
        assert_eq!(result, Err(SpectralError::ShapeMismatch { expected: 2, found: 3 }));
    }
}
