//! spectral::coherence — smoothed-periodogram coherence estimates.
//!
//! Purpose
//! -------
//! Turn an `N×M` series into per-frequency coherence matrices (or their
//! rectangular "half" factors) on a grid of Fourier frequencies. The
//! [`CoherenceEstimator`] trait fixes the contract consumed by the LRV
//! pipeline; [`SmoothedPeriodogram`] is the shipped implementation.
//!
//! Key behaviors
//! -------------
//! - DFT of each feature with `rustfft`:
//!   `d_m(k) = Σ_t x_{t,m}·exp(−2πi·k·t/N)` (no centring, no taper).
//! - Fourier grid in ascending order `ν_j = j/N`,
//!   `j = −⌊N/2⌋, …, ⌈N/2⌉ − 1`, selected via [`FrequencyGrid`].
//! - Smoothed spectral matrix over the `B` neighbouring bins
//!   `k + b`, `b ∈ [−⌊B/2⌋, ⌊(B − 1)/2⌋]` (indices modulo `N`):
//!   `S(ν) = (1/B)·Σ_b d(k + b)·d(k + b)ᴴ`.
//! - Full coherence `C = D^{−½}·S·D^{−½}` with `D = diag S`, or half factor
//!   `H = D^{−½}·X/√B` with `X` the `M×B` matrix of windowed DFT vectors,
//!   so that `H·Hᴴ = C`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `1 ≤ B < N` is validated before any transform is computed.
//! - `len(matrices) == len(frequencies)` for every [`CoherenceEstimate`].
//! - A feature with zero smoothed power at a frequency fails with
//!   [`SpectralError::ZeroPower`] instead of producing NaN.
//! - Per-frequency work runs in parallel with `rayon`; results keep the
//!   order of the frequency grid.
//!
//! Conventions
//! -----------
//! - Frequencies are in cycles per observation, within `[−½, ½)`.
//! - `FrequencyGrid::Count(n)` picks grid indices `⌊i·(N − 1)/(n − 1)⌋`,
//!   `i = 0, …, n − 1` (index 0 alone when `n = 1`).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the Fourier grid, `Count` and `Explicit` selection,
//!   unit diagonals and Hermitian symmetry of full coherence, the
//!   `H·Hᴴ = C` identity, bandwidth validation, and zero-power detection.

use crate::spectral::{
    errors::{SpectralError, SpectralResult},
    series::TimeSeries,
    validation::{validate_bandwidth, validate_frequency_count},
};
use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use rayon::prelude::*;
use rustfft::FftPlanner;

/// Tolerance (in units of `1/N`) when matching explicit frequencies to bins.
const FREQUENCY_MATCH_TOL: f64 = 1e-9;

/// FrequencyGrid — which Fourier frequencies to evaluate.
///
/// Variants
/// --------
/// - `All`
///   Every Fourier frequency `j/N`, in ascending order.
/// - `Count(n)`
///   `n` evenly spread grid indices, `1 ≤ n ≤ N`.
/// - `Explicit(freqs)`
///   Caller-chosen Fourier frequencies in `[−½, ½)`, kept in caller order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FrequencyGrid {
    #[default]
    All,
    Count(usize),
    Explicit(Vec<f64>),
}

impl FrequencyGrid {
    /// Validate the grid against `n_obs` and return indices into the
    /// ascending Fourier grid.
    ///
    /// Errors
    /// ------
    /// - `SpectralError::InvalidFrequencyCount` for `Count(n)` outside `1..=N`
    ///   or an empty explicit list.
    /// - `SpectralError::InvalidFrequency` for explicit frequencies that are
    ///   not Fourier frequencies in `[−½, ½)`.
    pub fn indices(&self, n_obs: usize) -> SpectralResult<Vec<usize>> {
        match self {
            FrequencyGrid::All => Ok((0..n_obs).collect()),
            FrequencyGrid::Count(count) => {
                validate_frequency_count(*count, n_obs)?;
                if *count == 1 {
                    return Ok(vec![0]);
                }
                Ok((0..*count).map(|i| i * (n_obs - 1) / (count - 1)).collect())
            }
            FrequencyGrid::Explicit(freqs) => {
                if freqs.is_empty() {
                    return Err(SpectralError::InvalidFrequencyCount {
                        requested: 0,
                        available: n_obs,
                    });
                }
                let offset = (n_obs / 2) as f64;
                freqs
                    .iter()
                    .map(|&freq| {
                        if !freq.is_finite() || !(-0.5..0.5).contains(&freq) {
                            return Err(SpectralError::InvalidFrequency(freq));
                        }
                        let scaled = freq * n_obs as f64;
                        let bin = scaled.round();
                        if (scaled - bin).abs() > FREQUENCY_MATCH_TOL * n_obs as f64 {
                            return Err(SpectralError::InvalidFrequency(freq));
                        }
                        let index = bin + offset;
                        if index < 0.0 || index >= n_obs as f64 {
                            return Err(SpectralError::InvalidFrequency(freq));
                        }
                        Ok(index as usize)
                    })
                    .collect()
            }
        }
    }
}

/// Ascending Fourier frequencies `j/N`, `j = −⌊N/2⌋, …, ⌈N/2⌉ − 1`.
pub fn fourier_frequencies(n_obs: usize) -> Vec<f64> {
    let half = (n_obs / 2) as i64;
    (0..n_obs as i64).map(|i| (i - half) as f64 / n_obs as f64).collect()
}

/// Shape of the per-frequency matrices of a [`CoherenceEstimate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoherenceVariant {
    /// Hermitian `M×M` coherence matrices.
    #[default]
    Full,
    /// Rectangular `M×B` factors `H` with `H·Hᴴ = C`.
    Half,
}

/// Per-frequency coherence matrices together with their frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct CoherenceEstimate {
    variant: CoherenceVariant,
    frequencies: Vec<f64>,
    matrices: Vec<Array2<Complex64>>,
}

impl CoherenceEstimate {
    /// Bundle matrices with their frequencies.
    ///
    /// Errors
    /// ------
    /// - `SpectralError::ShapeMismatch` unless both vectors have equal length.
    pub fn new(
        variant: CoherenceVariant, frequencies: Vec<f64>, matrices: Vec<Array2<Complex64>>,
    ) -> SpectralResult<Self> {
        if frequencies.len() != matrices.len() {
            return Err(SpectralError::ShapeMismatch {
                expected: frequencies.len(),
                found: matrices.len(),
            });
        }
        Ok(CoherenceEstimate { variant, frequencies, matrices })
    }

    pub fn variant(&self) -> CoherenceVariant {
        self.variant
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn matrices(&self) -> &[Array2<Complex64>] {
        &self.matrices
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// CoherenceEstimator — source of per-frequency coherence matrices.
///
/// Implementors map `(series, B, grid)` to a [`CoherenceEstimate`] with one
/// matrix per selected frequency.
pub trait CoherenceEstimator: Send + Sync {
    fn estimate(
        &self, series: &TimeSeries, bandwidth: usize, grid: &FrequencyGrid,
    ) -> SpectralResult<CoherenceEstimate>;
}

/// SmoothedPeriodogram — Daniell-smoothed periodogram coherence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmoothedPeriodogram {
    pub variant: CoherenceVariant,
}

impl SmoothedPeriodogram {
    pub fn new(variant: CoherenceVariant) -> Self {
        SmoothedPeriodogram { variant }
    }
}

impl CoherenceEstimator for SmoothedPeriodogram {
    fn estimate(
        &self, series: &TimeSeries, bandwidth: usize, grid: &FrequencyGrid,
    ) -> SpectralResult<CoherenceEstimate> {
        let n_obs = series.n_obs();
        validate_bandwidth(bandwidth, n_obs)?;
        let indices = grid.indices(n_obs)?;

        let dft = column_dft(series.data());
        let all_freqs = fourier_frequencies(n_obs);
        let half = n_obs / 2;

        let matrices = indices
            .par_iter()
            .map(|&index| {
                let bin = (index + n_obs - half) % n_obs;
                let window = windowed_dft(&dft, bin, bandwidth);
                match self.variant {
                    CoherenceVariant::Full => full_coherence(&window, all_freqs[index]),
                    CoherenceVariant::Half => half_coherence(&window, all_freqs[index]),
                }
            })
            .collect::<SpectralResult<Vec<_>>>()?;
        let frequencies = indices.iter().map(|&index| all_freqs[index]).collect();

        CoherenceEstimate::new(self.variant, frequencies, matrices)
    }
}

// ---- Helper methods ----

/// Unnormalised forward DFT of every column; row `k` holds bin `k`.
fn column_dft(data: ArrayView2<'_, Complex64>) -> Array2<Complex64> {
    let (n_obs, n_features) = data.dim();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n_obs);

    let mut out = Array2::<Complex64>::zeros((n_obs, n_features));
    let mut buffer = vec![Complex64::new(0.0, 0.0); n_obs];
    for (j, column) in data.columns().into_iter().enumerate() {
        buffer.iter_mut().zip(column.iter()).for_each(|(b, x)| *b = *x);
        fft.process(&mut buffer);
        out.column_mut(j).iter_mut().zip(buffer.iter()).for_each(|(o, b)| *o = *b);
    }
    out
}

/// `M×B` matrix whose columns are `d(bin + b)`, `b ∈ [−⌊B/2⌋, ⌊(B − 1)/2⌋]`.
fn windowed_dft(dft: &Array2<Complex64>, bin: usize, bandwidth: usize) -> Array2<Complex64> {
    let n_obs = dft.nrows();
    let start = bin + n_obs - bandwidth / 2;
    Array2::from_shape_fn((dft.ncols(), bandwidth), |(m, b)| dft[[(start + b) % n_obs, m]])
}

/// `1/√(S_mm)` for every feature, failing on zero power.
fn inverse_root_power(window: &Array2<Complex64>, frequency: f64) -> SpectralResult<Vec<f64>> {
    let bandwidth = window.ncols() as f64;
    window
        .rows()
        .into_iter()
        .enumerate()
        .map(|(feature, row)| {
            let power = row.iter().map(|d| d.norm_sqr()).sum::<f64>() / bandwidth;
            if !(power > 0.0) {
                return Err(SpectralError::ZeroPower { frequency, feature });
            }
            Ok(power.sqrt().recip())
        })
        .collect()
}

fn half_coherence(window: &Array2<Complex64>, frequency: f64) -> SpectralResult<Array2<Complex64>> {
    let scale = inverse_root_power(window, frequency)?;
    let root_b = (window.ncols() as f64).sqrt();
    Ok(Array2::from_shape_fn(window.dim(), |(m, b)| window[[m, b]] * (scale[m] / root_b)))
}

fn full_coherence(window: &Array2<Complex64>, frequency: f64) -> SpectralResult<Array2<Complex64>> {
    let half = half_coherence(window, frequency)?;
    let adjoint = half.t().mapv(|x| x.conj());
    Ok(half.dot(&adjoint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The ascending Fourier grid and `Count`/`Explicit` selection.
    // - Unit diagonal and Hermitian symmetry of full coherence matrices.
    // - Agreement of the half factor with the full matrix (H·Hᴴ = C).
    // - Bandwidth validation and zero-power detection.
    //
    // They intentionally DO NOT cover:
    // - Linear spectral statistics; see `spectral::lss`.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-10;

    fn ramp_series() -> TimeSeries {
        let raw = Array2::from_shape_fn((10, 2), |(i, j)| (2 * i + j) as f64);
        TimeSeries::from_real(&raw).unwrap()
    }

    fn mixed_series() -> TimeSeries {
        let raw = Array2::from_shape_fn((12, 3), |(i, j)| {
            ((i * (j + 1)) as f64 * 0.7).sin() + 0.1 * (i as f64) - 0.3 * (j as f64)
        });
        TimeSeries::from_real(&raw).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify the ascending Fourier grid and the evenly spread `Count` rule.
    //
    // Given
    // -----
    // - N = 10 and `Count(3)`.
    //
    // Expect
    // ------
    // - Grid −0.5, −0.4, …, 0.4; indices [0, 4, 9] → [−0.5, −0.1, 0.4].
    fn frequency_grid_count_spreads_over_ascending_grid() {
        // Act
        let grid = fourier_frequencies(10);
        let indices = FrequencyGrid::Count(3).indices(10).unwrap();

        // Assert
        assert_eq!(grid.len(), 10);
        assert_relative_eq!(grid[0], -0.5, epsilon = TOL);
        assert_relative_eq!(grid[9], 0.4, epsilon = TOL);
        assert_eq!(indices, vec![0, 4, 9]);
    }

    #[test]
    // Purpose
    // -------
    // Check explicit frequency matching and its rejections.
    //
    // Given
    // -----
    // - N = 10 with explicit [0.2, −0.5], then 0.25 (not a Fourier
    //   frequency), 0.5 (outside [−½, ½)), and an empty list.
    //
    // Expect
    // ------
    // - Indices [7, 0]; `InvalidFrequency` for the next two;
    //   `InvalidFrequencyCount` for the empty list.
    fn frequency_grid_explicit_matches_fourier_bins() {
        // Act / Assert
        assert_eq!(FrequencyGrid::Explicit(vec![0.2, -0.5]).indices(10).unwrap(), vec![7, 0]);
        assert_eq!(
            FrequencyGrid::Explicit(vec![0.25]).indices(10),
            Err(SpectralError::InvalidFrequency(0.25))
        );
        assert_eq!(
            FrequencyGrid::Explicit(vec![0.5]).indices(10),
            Err(SpectralError::InvalidFrequency(0.5))
        );
        assert_eq!(
            FrequencyGrid::Explicit(Vec::new()).indices(10),
            Err(SpectralError::InvalidFrequencyCount { requested: 0, available: 10 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that full coherence matrices are Hermitian with unit diagonal.
    //
    // Given
    // -----
    // - A 12×3 series, B = 4, all frequencies.
    //
    // Expect
    // ------
    // - 12 matrices of shape 3×3 with C_mm = 1 and C = Cᴴ.
    fn smoothed_periodogram_full_is_hermitian_with_unit_diagonal() {
        // Act
        let estimate = SmoothedPeriodogram::default()
            .estimate(&mixed_series(), 4, &FrequencyGrid::All)
            .unwrap();

        // Assert
        assert_eq!(estimate.len(), 12);
        for matrix in estimate.matrices() {
            assert_eq!(matrix.dim(), (3, 3));
            for i in 0..3 {
                assert_relative_eq!(matrix[[i, i]].re, 1.0, epsilon = TOL);
                assert_relative_eq!(matrix[[i, i]].im, 0.0, epsilon = TOL);
                for j in 0..3 {
                    assert!((matrix[[i, j]] - matrix[[j, i]].conj()).norm() < TOL);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that the half factor reproduces the full matrix.
    //
    // Given
    // -----
    // - A 12×3 series, B = 2, `Count(4)`.
    //
    // Expect
    // ------
    // - Half factors are 3×2 and H·Hᴴ equals the full coherence.
    fn smoothed_periodogram_half_factor_reproduces_full_matrix() {
        // Arrange
        let series = mixed_series();
        let grid = FrequencyGrid::Count(4);

        // Act
        let full = SmoothedPeriodogram::new(CoherenceVariant::Full)
            .estimate(&series, 2, &grid)
            .unwrap();
        let half = SmoothedPeriodogram::new(CoherenceVariant::Half)
            .estimate(&series, 2, &grid)
            .unwrap();

        // Assert
        assert_eq!(full.frequencies(), half.frequencies());
        for (c, h) in full.matrices().iter().zip(half.matrices()) {
            assert_eq!(h.dim(), (3, 2));
            let gram = h.dot(&h.t().mapv(|x| x.conj()));
            for (a, b) in gram.iter().zip(c.iter()) {
                assert!((a - b).norm() < TOL);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the bandwidth is validated before any transform.
    //
    // Given
    // -----
    // - N = 10 and B = 10.
    //
    // Expect
    // ------
    // - `InvalidBandwidth { 10, 10 }`.
    fn smoothed_periodogram_rejects_bandwidth_at_sample_size() {
        // Act
        let result = SmoothedPeriodogram::default().estimate(&ramp_series(), 10, &FrequencyGrid::All);

        // Assert
        assert_eq!(result, Err(SpectralError::InvalidBandwidth { bandwidth: 10, observations: 10 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify that a silent feature is reported instead of producing NaN.
    //
    // Given
    // -----
    // - A 6×2 series whose second column is identically zero.
    //
    // Expect
    // ------
    // - `ZeroPower` for feature 1.
    fn smoothed_periodogram_zero_feature_reports_zero_power() {
        // Arrange
        let raw = Array2::from_shape_fn((6, 2), |(i, j)| if j == 0 { i as f64 + 1.0 } else { 0.0 });
        let series = TimeSeries::from_real(&raw).unwrap();

        // Act
        let result = SmoothedPeriodogram::default().estimate(&series, 2, &FrequencyGrid::Count(1));

        // Assert
        assert!(matches!(result, Err(SpectralError::ZeroPower { feature: 1, .. })));
    }
}
