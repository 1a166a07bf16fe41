//! spectral — series, spectral densities, coherence, and spectral statistics.
//!
//! Purpose
//! -------
//! Provide everything that operates directly on the observed `N×M` series:
//! validated storage, lag-window spectral density estimates, smoothed
//! periodogram coherence matrices, and the linear spectral statistics (LSS)
//! that summarise each coherence matrix.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeries`] validates and stores the series (real inputs are lifted
//!   to complex).
//! - [`LagWindowEstimator`] produces a [`LagWindowDensity`] implementing the
//!   [`SpectralDensity`] trait; caller densities plug in through the same
//!   trait (e.g. via [`DensityFn`]).
//! - [`SmoothedPeriodogram`] implements [`CoherenceEstimator`] and yields a
//!   [`CoherenceEstimate`] on a [`FrequencyGrid`].
//! - [`linear_spectral_statistics`] maps each coherence matrix to
//!   `mean f(λ)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated once, at the entry of each estimator, by the
//!   guards in [`validation`]; failures surface as [`SpectralError`].
//! - Per-frequency work runs on `rayon` and preserves frequency order.
//!
//! Downstream usage
//! ----------------
//! - The `lrv` orchestrator consumes a coherence estimate and a spectral
//!   density through the traits exported here.

pub mod coherence;
pub mod errors;
pub mod lag_window;
pub mod lss;
pub mod series;
pub mod validation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::coherence::{
    CoherenceEstimate, CoherenceEstimator, CoherenceVariant, FrequencyGrid, SmoothedPeriodogram,
    fourier_frequencies,
};
pub use self::errors::{SpectralError, SpectralResult};
pub use self::lag_window::{DensityFn, LagWindowDensity, LagWindowEstimator, SpectralDensity};
pub use self::lss::{linear_spectral_statistics, lss_full, lss_half};
pub use self::series::TimeSeries;

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::coherence::{
        CoherenceEstimate, CoherenceEstimator, CoherenceVariant, FrequencyGrid, SmoothedPeriodogram,
    };
    pub use super::errors::{SpectralError, SpectralResult};
    pub use super::lag_window::{DensityFn, LagWindowEstimator, SpectralDensity};
    pub use super::series::TimeSeries;
}
