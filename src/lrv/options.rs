//! lrv::options — configuration of an LRV run and its one-shot resolution.
//!
//! Purpose
//! -------
//! Describe every knob of an LRV run as an explicit, typed value and turn it
//! into an immutable, fully validated [`ResolvedOptions`] in a single pass,
//! before any expensive computation starts.
//!
//! Key behaviors
//! -------------
//! - [`Supplied<T>`] distinguishes caller-provided constants from constants
//!   the pipeline must derive (`f_against_mp`, `f_against_D`, σ).
//! - [`DensitySource`] selects the lag-window estimate, a caller density,
//!   or none; [`MissingDensityPolicy`] decides what "none" means.
//! - [`AspectRatio`] selects `c = M/B` (default) or `c = M/(B + 1)`.
//! - [`LRVOptions::resolve`] validates bandwidth, lag count, frequency grid,
//!   tolerance, quadrature options, supplied constants, and `c`.
//!
//! Invariants & assumptions
//! ------------------------
//! - After `resolve` succeeds no further defaulting or validation of options
//!   happens downstream.
//! - A `Fail` missing-density policy without a density source fails during
//!   resolution with [`LRVError::MissingSpectralDensity`].
//!
//! Conventions
//! -----------
//! - `Default` reproduces the reference configuration: all frequencies, full
//!   coherence, no density source with policy `Skip`, `c = M/B`,
//!   tolerance 1e-6, and default quadrature options.
//!
//! Testing notes
//! -------------
//! - Unit tests cover defaults, the aspect-ratio conventions, the missing
//!   density policies, and rejection of invalid supplied constants.

use crate::lrv::errors::{LRVError, LRVTestResult};
use crate::numerics::{constants::DEFAULT_TOLERANCE, quadrature::QuadratureOptions};
use crate::spectral::{
    coherence::{CoherenceVariant, FrequencyGrid},
    lag_window::{LagWindowEstimator, SpectralDensity},
    validation::{validate_bandwidth, validate_lags},
};
use std::sync::Arc;

/// Caller-supplied value or a request to derive it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Supplied<T> {
    Given(T),
    #[default]
    Derive,
}

/// Where the spectral density used by `r_n` comes from.
#[derive(Clone, Default)]
pub enum DensitySource {
    /// Lag-window estimate with truncation `lags`.
    LagWindow { lags: usize },
    /// Caller-supplied density.
    Given(Arc<dyn SpectralDensity>),
    /// No density; see [`MissingDensityPolicy`].
    #[default]
    None,
}

impl std::fmt::Debug for DensitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DensitySource::LagWindow { lags } => write!(f, "LagWindow {{ lags: {lags} }}"),
            DensitySource::Given(_) => write!(f, "Given(<spectral density>)"),
            DensitySource::None => write!(f, "None"),
        }
    }
}

/// Behaviour when no density source is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingDensityPolicy {
    /// Skip the density correction (`r_n = 0`).
    #[default]
    Skip,
    /// Fail with [`LRVError::MissingSpectralDensity`].
    Fail,
}

/// Convention for the aspect ratio `c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// `c = M/B`.
    #[default]
    Bandwidth,
    /// `c = M/(B + 1)`.
    BandwidthPlusOne,
}

impl AspectRatio {
    pub fn value(&self, n_features: usize, bandwidth: usize) -> f64 {
        let m = n_features as f64;
        match self {
            AspectRatio::Bandwidth => m / bandwidth as f64,
            AspectRatio::BandwidthPlusOne => m / (bandwidth + 1) as f64,
        }
    }
}

/// LRVOptions — every configurable aspect of an LRV run.
///
/// Fields
/// ------
/// - `frequencies`: `FrequencyGrid`
///   Fourier frequencies at which coherence is estimated.
/// - `variant`: `CoherenceVariant`
///   Full or half coherence of the
///   [`SmoothedPeriodogram`](crate::spectral::coherence::SmoothedPeriodogram)
///   built by [`LRVResult::compute`](crate::lrv::result::LRVResult::compute).
///   [`lrv`](crate::lrv::orchestrator::lrv) takes its estimator as an
///   argument and does not read this field.
/// - `density`: `DensitySource`
///   Source of the spectral density used by `r_n`.
/// - `missing_density`: `MissingDensityPolicy`
///   Behaviour when `density` is `None`.
/// - `aspect_ratio`: `AspectRatio`
///   Convention for `c`.
/// - `f_against_mp`, `f_against_d`, `sigma`: `Supplied<f64>`
///   Caller constants or `Derive`.
/// - `tolerance`: `f64`
///   Asserted bound on quadrature errors and imaginary residues.
/// - `quadrature`: `QuadratureOptions`
///   Targets and budgets of every contour integral.
#[derive(Debug, Clone)]
pub struct LRVOptions {
    pub frequencies: FrequencyGrid,
    /// Read only by `LRVResult::compute`.
    pub variant: CoherenceVariant,
    pub density: DensitySource,
    pub missing_density: MissingDensityPolicy,
    pub aspect_ratio: AspectRatio,
    pub f_against_mp: Supplied<f64>,
    pub f_against_d: Supplied<f64>,
    pub sigma: Supplied<f64>,
    pub tolerance: f64,
    pub quadrature: QuadratureOptions,
}

impl Default for LRVOptions {
    fn default() -> Self {
        LRVOptions {
            frequencies: FrequencyGrid::All,
            variant: CoherenceVariant::Full,
            density: DensitySource::None,
            missing_density: MissingDensityPolicy::Skip,
            aspect_ratio: AspectRatio::Bandwidth,
            f_against_mp: Supplied::Derive,
            f_against_d: Supplied::Derive,
            sigma: Supplied::Derive,
            tolerance: DEFAULT_TOLERANCE,
            quadrature: QuadratureOptions::default(),
        }
    }
}

/// Density handling after resolution.
#[derive(Clone)]
pub enum ResolvedDensity {
    Estimate(LagWindowEstimator),
    Given(Arc<dyn SpectralDensity>),
    Skip,
}

impl std::fmt::Debug for ResolvedDensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedDensity::Estimate(est) => write!(f, "Estimate({est:?})"),
            ResolvedDensity::Given(_) => write!(f, "Given(<spectral density>)"),
            ResolvedDensity::Skip => write!(f, "Skip"),
        }
    }
}

/// Immutable, validated configuration consumed by the orchestrator.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub c: f64,
    pub frequencies: FrequencyGrid,
    pub density: ResolvedDensity,
    pub f_against_mp: Supplied<f64>,
    pub f_against_d: Supplied<f64>,
    pub sigma: Supplied<f64>,
    pub tolerance: f64,
    pub quadrature: QuadratureOptions,
}

impl LRVOptions {
    /// Validate every field against the data dimensions and resolve defaults.
    ///
    /// Parameters
    /// ----------
    /// - `n_obs`, `n_features`: `usize`
    ///   Series dimensions `N` and `M`.
    /// - `bandwidth`: `usize`
    ///   Smoothing bandwidth `B`.
    ///
    /// Returns
    /// -------
    /// `LRVTestResult<ResolvedOptions>`
    ///
    /// Errors
    /// ------
    /// - `SpectralError::InvalidBandwidth`, `InvalidLagCount`,
    ///   `InvalidFrequencyCount`, `InvalidFrequency` (wrapped).
    /// - `NumericsError::InvalidQuadratureOptions` (wrapped).
    /// - `LRVError::InvalidTolerance`, `InvalidSuppliedConstant`,
    ///   `InvalidAspectRatio`, `MissingSpectralDensity`.
    pub fn resolve(
        &self, n_obs: usize, n_features: usize, bandwidth: usize,
    ) -> LRVTestResult<ResolvedOptions> {
        validate_bandwidth(bandwidth, n_obs)?;
        self.frequencies.indices(n_obs)?;
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(LRVError::InvalidTolerance(self.tolerance));
        }
        self.quadrature.validate()?;

        check_supplied("f_against_mp", self.f_against_mp, false)?;
        check_supplied("f_against_D", self.f_against_d, false)?;
        check_supplied("sigma", self.sigma, true)?;

        let c = self.aspect_ratio.value(n_features, bandwidth);
        if !(c.is_finite() && c > 0.0) {
            return Err(LRVError::InvalidAspectRatio(c));
        }

        let density = match (&self.density, self.missing_density) {
            (DensitySource::LagWindow { lags }, _) => {
                validate_lags(*lags, n_obs)?;
                ResolvedDensity::Estimate(LagWindowEstimator::new(*lags))
            }
            (DensitySource::Given(density), _) => ResolvedDensity::Given(Arc::clone(density)),
            (DensitySource::None, MissingDensityPolicy::Skip) => ResolvedDensity::Skip,
            (DensitySource::None, MissingDensityPolicy::Fail) => {
                return Err(LRVError::MissingSpectralDensity);
            }
        };

        Ok(ResolvedOptions {
            c,
            frequencies: self.frequencies.clone(),
            density,
            f_against_mp: self.f_against_mp,
            f_against_d: self.f_against_d,
            sigma: self.sigma,
            tolerance: self.tolerance,
            quadrature: self.quadrature,
        })
    }
}

fn check_supplied(name: &'static str, value: Supplied<f64>, positive: bool) -> LRVTestResult<()> {
    if let Supplied::Given(value) = value {
        if !value.is_finite() || (positive && value <= 0.0) {
            return Err(LRVError::InvalidSuppliedConstant { name, value });
        }
    }
    Ok(())
}
