//! spectral::errors — error types for series, coherence, and spectral densities.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for everything that touches the
//! raw multivariate series: construction of a [`crate::spectral::TimeSeries`],
//! lag-window spectral densities, smoothed-periodogram coherence estimates,
//! and linear spectral statistics.
//!
//! Key behaviors
//! -------------
//! - Define [`SpectralError`] and [`SpectralResult`] as the canonical error
//!   and result types of the `spectral` subtree.
//! - Wrap [`NumericsError`] so that numerical failures bubble through the
//!   spectral layer without losing their payload.
//!
//! Conventions
//! -----------
//! - Messages state the violated constraint (e.g. "0 < L < N") together
//!   with the offending value.
//!
//! Testing notes
//! -------------
//! - Unit tests check that payloads appear in messages and that the
//!   `From<NumericsError>` conversion preserves the inner error.

use crate::numerics::errors::NumericsError;

pub type SpectralResult<T> = Result<T, SpectralError>;

/// SpectralError — validation and computation failures of the spectral layer.
///
/// Variants
/// --------
/// - `InsufficientData { observations }`
///   Fewer than two observations (rows) were supplied.
/// - `EmptyFeatureSet`
///   The series has no feature columns.
/// - `NonFiniteData { row, column }`
///   A series entry is NaN or ±∞.
/// - `InvalidLagCount { lags, observations }`
///   The lag-window truncation violates `0 < L < N`.
/// - `InvalidBandwidth { bandwidth, observations }`
///   The smoothing bandwidth violates `1 ≤ B < N`.
/// - `InvalidFrequencyCount { requested, available }`
///   A frequency count outside `1..=N` was requested.
/// - `InvalidFrequency(f64)`
///   An explicit frequency is not a Fourier frequency in `[−½, ½)`.
/// - `ZeroPower { frequency, feature }`
///   A feature has zero smoothed power at a frequency, so its coherence
///   normalisation is undefined.
/// - `ZeroDensity { frequency, feature }`
///   A spectral density component is zero where its log-derivative is
///   required.
/// - `ShapeMismatch { expected, found }`
///   An array has the wrong length (e.g. a supplied density returning a
///   vector whose length differs from the number of features).
/// - `Numerics(NumericsError)`
///   A wrapped numerical failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectralError {
    // ---- Input validation ----
    InsufficientData { observations: usize },
    EmptyFeatureSet,
    NonFiniteData { row: usize, column: usize },
    InvalidLagCount { lags: usize, observations: usize },
    InvalidBandwidth { bandwidth: usize, observations: usize },
    InvalidFrequencyCount { requested: usize, available: usize },
    InvalidFrequency(f64),

    // ---- Degenerate estimates ----
    ZeroPower { frequency: f64, feature: usize },
    ZeroDensity { frequency: f64, feature: usize },
    ShapeMismatch { expected: usize, found: usize },

    // ---- Wrapped ----
    Numerics(NumericsError),
}

impl std::error::Error for SpectralError {}

impl std::fmt::Display for SpectralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input validation ----
            SpectralError::InsufficientData { observations } => write!(
                f,
                "Spectral Error: at least 2 observations are required, got {observations}"
            ),
            SpectralError::EmptyFeatureSet => {
                write!(f, "Spectral Error: series must contain at least one feature")
            }
            SpectralError::NonFiniteData { row, column } => {
                write!(f, "Spectral Error: non-finite value at row {row}, column {column}")
            }
            SpectralError::InvalidLagCount { lags, observations } => write!(
                f,
                "Spectral Error: lag count must satisfy 0 < L < N (L = {lags}, N = {observations})"
            ),
            SpectralError::InvalidBandwidth { bandwidth, observations } => write!(
                f,
                "Spectral Error: bandwidth must satisfy 1 <= B < N (B = {bandwidth}, N = \
                 {observations})"
            ),
            SpectralError::InvalidFrequencyCount { requested, available } => write!(
                f,
                "Spectral Error: frequency count must lie in 1..={available}, got {requested}"
            ),
            SpectralError::InvalidFrequency(freq) => write!(
                f,
                "Spectral Error: {freq} is not a Fourier frequency in [-0.5, 0.5)"
            ),

            // ---- Degenerate estimates ----
            SpectralError::ZeroPower { frequency, feature } => write!(
                f,
                "Spectral Error: feature {feature} has zero smoothed power at frequency {frequency}"
            ),
            SpectralError::ZeroDensity { frequency, feature } => write!(
                f,
                "Spectral Error: spectral density of feature {feature} vanishes at frequency \
                 {frequency}"
            ),
            SpectralError::ShapeMismatch { expected, found } => {
                write!(f, "Spectral Error: expected length {expected}, found {found}")
            }

            // ---- Wrapped ----
            SpectralError::Numerics(err) => write!(f, "{err}"),
        }
    }
}

impl From<NumericsError> for SpectralError {
    fn from(err: NumericsError) -> Self {
        SpectralError::Numerics(err)
    }
}
