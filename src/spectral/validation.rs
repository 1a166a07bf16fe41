//! spectral::validation — shared input guards for the spectral layer.
//!
//! Purpose
//! -------
//! Centralize the preconditions on series shape, finiteness, lag-window
//! truncation, smoothing bandwidth, and frequency counts, so that every
//! estimator fails fast with the same [`SpectralError`] before doing any
//! heavy work.
//!
//! Invariants & assumptions
//! ------------------------
//! - A series has at least 2 observations and at least 1 feature, and every
//!   entry is finite.
//! - Lag counts satisfy `0 < L < N`; bandwidths satisfy `1 ≤ B < N`;
//!   frequency counts satisfy `1 ≤ n ≤ N`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and one success path per guard.

use crate::spectral::errors::{SpectralError, SpectralResult};
use ndarray::Array2;
use num_complex::Complex64;

/// Validate the shape and finiteness of an `N×M` series.
///
/// Errors
/// ------
/// - `SpectralError::InsufficientData` if `N < 2`.
/// - `SpectralError::EmptyFeatureSet` if `M == 0`.
/// - `SpectralError::NonFiniteData { row, column }` for the first
///   non-finite entry in row-major order.
pub fn validate_series(data: &Array2<Complex64>) -> SpectralResult<()> {
    let (observations, features) = data.dim();
    if observations < 2 {
        return Err(SpectralError::InsufficientData { observations });
    }
    if features == 0 {
        return Err(SpectralError::EmptyFeatureSet);
    }
    if let Some(((row, column), _)) =
        data.indexed_iter().find(|(_, v)| !(v.re.is_finite() && v.im.is_finite()))
    {
        return Err(SpectralError::NonFiniteData { row, column });
    }
    Ok(())
}

/// Validate a lag-window truncation `0 < L < N`.
pub fn validate_lags(lags: usize, observations: usize) -> SpectralResult<()> {
    if lags == 0 || lags >= observations {
        return Err(SpectralError::InvalidLagCount { lags, observations });
    }
    Ok(())
}

/// Validate a smoothing bandwidth `1 ≤ B < N`.
pub fn validate_bandwidth(bandwidth: usize, observations: usize) -> SpectralResult<()> {
    if bandwidth == 0 || bandwidth >= observations {
        return Err(SpectralError::InvalidBandwidth { bandwidth, observations });
    }
    Ok(())
}

/// Validate a frequency count `1 ≤ n ≤ N`.
pub fn validate_frequency_count(requested: usize, available: usize) -> SpectralResult<()> {
    if requested == 0 || requested > available {
        return Err(SpectralError::InvalidFrequencyCount { requested, available });
    }
    Ok(())
}
