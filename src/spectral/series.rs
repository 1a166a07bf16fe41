//! spectral::series — validated multivariate time series.
//!
//! Purpose
//! -------
//! Hold an `N×M` complex-valued series (rows = time, columns = features)
//! that has passed the checks in [`crate::spectral::validation`]. Real
//! inputs are lifted to the complex plane once at construction, so every
//! downstream estimator works on a single representation.
//!
//! Invariants & assumptions
//! ------------------------
//! - `N ≥ 2`, `M ≥ 1`, every entry finite.
//! - The series is read-only after construction.

use crate::spectral::{errors::SpectralResult, validation::validate_series};
use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;

/// Read-only `N×M` series of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    data: Array2<Complex64>,
}

impl TimeSeries {
    /// Build a series from complex observations.
    ///
    /// Errors
    /// ------
    /// - Any error of [`validate_series`].
    pub fn from_complex(data: Array2<Complex64>) -> SpectralResult<Self> {
        validate_series(&data)?;
        Ok(TimeSeries { data })
    }

    /// Build a series from real observations by lifting them to `x + 0i`.
    pub fn from_real(data: &Array2<f64>) -> SpectralResult<Self> {
        TimeSeries::from_complex(data.mapv(|x| Complex64::new(x, 0.0)))
    }

    /// Number of observations `N`.
    pub fn n_obs(&self) -> usize {
        self.data.nrows()
    }

    /// Number of features `M`.
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    pub fn data(&self) -> ArrayView2<'_, Complex64> {
        self.data.view()
    }
}
