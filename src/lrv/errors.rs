//! lrv::errors — error types for the LRV test pipeline.
//!
//! Purpose
//! -------
//! Provide the top-level error enum of the crate. Every failure of the LRV
//! pipeline (option resolution, spectral estimation, numerical integration,
//! variance estimation, decisions) is reported as an [`LRVError`].
//!
//! Key behaviors
//! -------------
//! - Wrap [`SpectralError`] and [`NumericsError`] via `From` so that `?`
//!   lifts lower-level failures without losing their payload.
//! - Add the configuration and decision errors owned by this layer.
//!
//! Conventions
//! -----------
//! - [`LRVTestResult<T>`] is the result alias; the name `LRVResult` is the
//!   immutable result record in [`crate::lrv::result`].
//!
//! Testing notes
//! -------------
//! - Unit tests check messages and the upward conversions.

use crate::{numerics::errors::NumericsError, spectral::errors::SpectralError};

pub type LRVTestResult<T> = Result<T, LRVError>;

/// LRVError — failures of option resolution, computation, and decisions.
///
/// Variants
/// --------
/// - `Spectral(SpectralError)` / `Numerics(NumericsError)`
///   Wrapped lower-level failures.
/// - `MissingSpectralDensity`
///   No density source was configured and the missing-density policy is
///   `Fail`.
/// - `InvalidTolerance(f64)`
///   Tolerance is not finite and strictly positive.
/// - `InvalidSuppliedConstant { name, value }`
///   A caller-supplied `f_against_mp`, `f_against_D`, or σ is not finite,
///   or σ is not strictly positive.
/// - `InvalidAspectRatio(f64)`
///   The resolved `c` is not finite and strictly positive.
/// - `NegativeVariance(f64)` / `ZeroVariance`
///   The variance series produced `Re σ² < 0`, or `σ = 0` so that the
///   statistics are undefined.
/// - `InvalidDistribution(String)` / `InvalidAlternative(String)`
///   Unknown distribution or alternative tag.
/// - `MissingDegreesOfFreedom` / `InvalidDegreesOfFreedom(usize)`
///   Chi-squared decisions need `df ≥ 1`.
/// - `InvalidLevel(f64)`
///   Significance level outside `(0, 1)`.
/// - `InvalidStatisticIndex(usize)`
///   Statistic index outside `0..=4`.
#[derive(Debug, Clone, PartialEq)]
pub enum LRVError {
    // ---- Wrapped ----
    Spectral(SpectralError),
    Numerics(NumericsError),

    // ---- Option resolution ----
    MissingSpectralDensity,
    InvalidTolerance(f64),
    InvalidSuppliedConstant { name: &'static str, value: f64 },
    InvalidAspectRatio(f64),

    // ---- Variance ----
    NegativeVariance(f64),
    ZeroVariance,

    // ---- Decisions ----
    InvalidDistribution(String),
    InvalidAlternative(String),
    MissingDegreesOfFreedom,
    InvalidDegreesOfFreedom(usize),
    InvalidLevel(f64),
    InvalidStatisticIndex(usize),
}

impl std::error::Error for LRVError {}

impl std::fmt::Display for LRVError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Wrapped ----
            LRVError::Spectral(err) => write!(f, "{err}"),
            LRVError::Numerics(err) => write!(f, "{err}"),

            // ---- Option resolution ----
            LRVError::MissingSpectralDensity => write!(
                f,
                "LRV Error: no spectral density source configured and the missing-density \
                 policy is Fail"
            ),
            LRVError::InvalidTolerance(tol) => {
                write!(f, "LRV Error: tolerance must be finite and positive, got {tol}")
            }
            LRVError::InvalidSuppliedConstant { name, value } => {
                write!(f, "LRV Error: supplied {name} is invalid ({value})")
            }
            LRVError::InvalidAspectRatio(c) => {
                write!(f, "LRV Error: aspect ratio c must be finite and positive, got {c}")
            }

            // ---- Variance ----
            LRVError::NegativeVariance(value) => {
                write!(f, "LRV Error: variance series produced a negative sigma^2 ({value})")
            }
            LRVError::ZeroVariance => {
                write!(f, "LRV Error: sigma is zero; the test statistics are undefined")
            }

            // ---- Decisions ----
            LRVError::InvalidDistribution(tag) => write!(
                f,
                "LRV Error: unknown distribution '{tag}' (expected normal, chi2, or gumbel)"
            ),
            LRVError::InvalidAlternative(tag) => write!(
                f,
                "LRV Error: unknown alternative '{tag}' (expected left, right, or double)"
            ),
            LRVError::MissingDegreesOfFreedom => {
                write!(f, "LRV Error: chi-squared decisions require degrees of freedom")
            }
            LRVError::InvalidDegreesOfFreedom(df) => {
                write!(f, "LRV Error: degrees of freedom must be at least 1, got {df}")
            }
            LRVError::InvalidLevel(level) => {
                write!(f, "LRV Error: level must lie in (0, 1), got {level}")
            }
            LRVError::InvalidStatisticIndex(index) => {
                write!(f, "LRV Error: statistic index must be 0..=4, got {index}")
            }
        }
    }
}

impl From<SpectralError> for LRVError {
    fn from(err: SpectralError) -> Self {
        LRVError::Spectral(err)
    }
}

impl From<NumericsError> for LRVError {
    fn from(err: NumericsError) -> Self {
        LRVError::Numerics(err)
    }
}
