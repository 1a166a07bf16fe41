//! spectral::lag_window — truncated lag-window spectral density estimation.
//!
//! Purpose
//! -------
//! Estimate the per-feature spectral density of a multivariate series from
//! its sample autocovariances up to a truncation lag `L`, and expose it
//! (together with its frequency derivative) through the [`SpectralDensity`]
//! trait consumed by the LRV boundary correction.
//!
//! Key behaviors
//! -------------
//! - [`LagWindowEstimator::autocovariances`] returns the `(2L + 1)×M` array
//!   of `r_ℓ`, ordered from lag `−L` to `+L`, with
//!   `r_ℓ = (1/(N − ℓ))·Σ_t x[t + ℓ]·conj(x[t])` and `r_{−ℓ} = conj(r_ℓ)`.
//! - [`LagWindowDensity`] evaluates `sd(ν) = Re Σ_ℓ r_ℓ·exp(−2πiℓν)`.
//! - [`SpectralDensity::derivative`] defaults to the centred difference of
//!   [`crate::numerics::differentiation`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < L < N` is validated before any autocovariance is formed.
//! - Lags use the unbiased `1/(N − ℓ)` denominator; `r_0 = mean |x|²`.
//! - The series is not demeaned.
//!
//! Conventions
//! -----------
//! - Frequencies are in cycles per observation, `ν ∈ [−½, ½)`.
//!
//! Testing notes
//! -------------
//! - Unit tests check the autocovariance layout and Hermitian symmetry, the
//!   closed-form density of a short real series, derivative accuracy, and
//!   lag validation.

use crate::numerics::differentiation::central_difference_vec;
use crate::spectral::{
    errors::SpectralResult, series::TimeSeries, validation::validate_lags,
};
use ndarray::{Array1, Array2, s};
use num_complex::Complex64;
use std::f64::consts::PI;

/// SpectralDensity — per-feature spectral density as a function of frequency.
///
/// Purpose
/// -------
/// Abstract over where a spectral density comes from (the lag-window
/// estimate, or a caller-supplied model) so that the boundary correction
/// can evaluate `sd(ν)` and `sd'(ν)` without knowing the source.
///
/// Notes
/// -----
/// - Implementors must return vectors of length `M` (number of features).
/// - The default `derivative` is the centred difference with step 1e-6;
///   implementors with an analytic derivative may override it.
pub trait SpectralDensity: Send + Sync {
    fn density(&self, frequency: f64) -> SpectralResult<Array1<f64>>;

    fn derivative(&self, frequency: f64) -> SpectralResult<Array1<f64>> {
        central_difference_vec(&|nu: f64| self.density(nu), frequency)
    }
}

/// Wrap a closure `ν ↦ sd(ν)` as a [`SpectralDensity`].
#[derive(Debug, Clone, Copy)]
pub struct DensityFn<F>(pub F);

impl<F> SpectralDensity for DensityFn<F>
where
    F: Fn(f64) -> Array1<f64> + Send + Sync,
{
    fn density(&self, frequency: f64) -> SpectralResult<Array1<f64>> {
        Ok((self.0)(frequency))
    }
}

/// LagWindowEstimator — truncated (rectangular) lag-window estimator.
///
/// Fields
/// ------
/// - `lags`: `usize`
///   Truncation lag `L`; validated against `N` when the estimator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LagWindowEstimator {
    pub lags: usize,
}

impl LagWindowEstimator {
    pub fn new(lags: usize) -> Self {
        LagWindowEstimator { lags }
    }

    /// Sample autocovariances `r_{−L}, …, r_L` for every feature.
    ///
    /// Returns
    /// -------
    /// `SpectralResult<Array2<Complex64>>`
    ///   `(2L + 1)×M` array; row `L + ℓ` holds lag `ℓ`.
    ///
    /// Errors
    /// ------
    /// - `SpectralError::InvalidLagCount` unless `0 < L < N`.
    pub fn autocovariances(&self, series: &TimeSeries) -> SpectralResult<Array2<Complex64>> {
        let n = series.n_obs();
        let lags = self.lags;
        validate_lags(lags, n)?;

        let data = series.data();
        let mut acov = Array2::<Complex64>::zeros((2 * lags + 1, series.n_features()));
        for lag in 0..=lags {
            let leading = data.slice(s![lag.., ..]);
            let lagged = data.slice(s![..n - lag, ..]);
            let count = (n - lag) as f64;
            for (j, (lead_col, lag_col)) in
                leading.columns().into_iter().zip(lagged.columns()).enumerate()
            {
                let r: Complex64 =
                    lead_col.iter().zip(lag_col.iter()).map(|(a, b)| a * b.conj()).sum::<Complex64>()
                        / count;
                acov[[lags + lag, j]] = r;
                acov[[lags - lag, j]] = r.conj();
            }
        }
        Ok(acov)
    }

    /// Estimate the spectral density of `series`.
    pub fn estimate(&self, series: &TimeSeries) -> SpectralResult<LagWindowDensity> {
        let autocovariances = self.autocovariances(series)?;
        Ok(LagWindowDensity { lags: self.lags, autocovariances })
    }
}

/// Lag-window spectral density built by [`LagWindowEstimator::estimate`].
#[derive(Debug, Clone, PartialEq)]
pub struct LagWindowDensity {
    lags: usize,
    autocovariances: Array2<Complex64>,
}

impl LagWindowDensity {
    pub fn autocovariances(&self) -> &Array2<Complex64> {
        &self.autocovariances
    }
}

impl SpectralDensity for LagWindowDensity {
    fn density(&self, frequency: f64) -> SpectralResult<Array1<f64>> {
        let lags = self.lags as f64;
        let phases: Array1<Complex64> = (0..self.autocovariances.nrows())
            .map(|row| Complex64::new(0.0, -2.0 * PI * (row as f64 - lags) * frequency).exp())
            .collect();
        Ok(self
            .autocovariances
            .columns()
            .into_iter()
            .map(|col| col.iter().zip(phases.iter()).map(|(r, e)| r * e).sum::<Complex64>().re)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::errors::SpectralError;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Layout and Hermitian symmetry of the autocovariance array.
    // - The density of y = reshape(0..20, (10, 2)) with L = 2 at ν = −½.
    // - The default finite-difference derivative.
    // - Lag validation.
    //
    // They intentionally DO NOT cover:
    // - How densities enter the LRV correction; see `lrv::corrections`.
    // -------------------------------------------------------------------------

    fn ramp_series() -> TimeSeries {
        let raw = Array2::from_shape_fn((10, 2), |(i, j)| (2 * i + j) as f64);
        TimeSeries::from_real(&raw).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify the unbiased autocovariances of an even ramp.
    //
    // Given
    // -----
    // - Column 0 of the ramp series, x_t = 2t, t = 0..9, L = 2.
    //
    // Expect
    // ------
    // - r_0 = 114, r_1 = r_{−1} = 320/3, r_2 = r_{−2} = 98.
    fn autocovariances_match_hand_computed_values() {
        // Act
        let acov = LagWindowEstimator::new(2).autocovariances(&ramp_series()).unwrap();

        // Assert
        assert_eq!(acov.dim(), (5, 2));
        assert_relative_eq!(acov[[2, 0]].re, 114.0, max_relative = 1e-12);
        assert_relative_eq!(acov[[3, 0]].re, 320.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(acov[[1, 0]].re, 320.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(acov[[4, 0]].re, 98.0, max_relative = 1e-12);
        assert_relative_eq!(acov[[0, 0]].re, 98.0, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check Hermitian symmetry for a complex series.
    //
    // Given
    // -----
    // - A 4×1 complex series and L = 1.
    //
    // Expect
    // ------
    // - r_{−1} = conj(r_1) and r_0 is real.
    fn autocovariances_are_hermitian_for_complex_series() {
        // Arrange
        let raw = array![
            [Complex64::new(1.0, 2.0)],
            [Complex64::new(-0.5, 1.0)],
            [Complex64::new(0.3, -0.7)],
            [Complex64::new(2.0, 0.1)]
        ];
        let series = TimeSeries::from_complex(raw).unwrap();

        // Act
        let acov = LagWindowEstimator::new(1).autocovariances(&series).unwrap();

        // Assert
        assert_eq!(acov[[0, 0]], acov[[2, 0]].conj());
        assert_eq!(acov[[1, 0]].im, 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the density at the Nyquist frequency.
    //
    // Given
    // -----
    // - The ramp series, L = 2, ν = −½.
    //
    // Expect
    // ------
    // - sd(−½) = r_0 − 2r_1 + 2r_2, i.e. [290/3, 347/3].
    fn density_at_nyquist_matches_closed_form() {
        // Arrange
        let density = LagWindowEstimator::new(2).estimate(&ramp_series()).unwrap();

        // Act
        let sd = density.density(-0.5).unwrap();

        // Assert
        assert_relative_eq!(sd[0], 290.0 / 3.0, max_relative = 1e-10);
        assert_relative_eq!(sd[1], 347.0 / 3.0, max_relative = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Check the default derivative against the analytic derivative of the
    // trigonometric polynomial.
    //
    // Given
    // -----
    // - The ramp series, L = 2, ν = 0.1.
    //
    // Expect
    // ------
    // - sd'(ν) = −Σ_{ℓ≥1} 4πℓ·r_ℓ·sin(2πℓν) for real symmetric r.
    fn derivative_default_matches_analytic_derivative() {
        // Arrange
        let density = LagWindowEstimator::new(2).estimate(&ramp_series()).unwrap();
        let acov = density.autocovariances().clone();
        let nu = 0.1;

        // Act
        let derivative = density.derivative(nu).unwrap();

        // Assert
        for j in 0..2 {
            let expected: f64 = -(1..=2usize)
                .map(|l| {
                    let l_f = l as f64;
                    4.0 * PI * l_f * acov[[2 + l, j]].re * (2.0 * PI * l_f * nu).sin()
                })
                .sum::<f64>();
            assert_relative_eq!(derivative[j], expected, max_relative = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid truncation lags fail before any computation.
    //
    // Given
    // -----
    // - N = 10 with L = 0 and L = 10.
    //
    // Expect
    // ------
    // - `InvalidLagCount` in both cases.
    fn estimate_rejects_invalid_lag_counts() {
        // Act / Assert
        assert_eq!(
            LagWindowEstimator::new(0).estimate(&ramp_series()),
            Err(SpectralError::InvalidLagCount { lags: 0, observations: 10 })
        );
        assert_eq!(
            LagWindowEstimator::new(10).estimate(&ramp_series()),
            Err(SpectralError::InvalidLagCount { lags: 10, observations: 10 })
        );
    }
}
