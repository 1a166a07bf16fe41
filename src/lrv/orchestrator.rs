//! lrv::orchestrator — end-to-end LRV coherence test.
//!
//! Purpose
//! -------
//! Run the whole LRV pipeline on an `N×M` series: coherence estimation,
//! linear spectral statistics, Marchenko–Pastur centring, boundary and
//! smoothing-bias corrections, the asymptotic standard deviation σ, and the
//! five test statistics.
//!
//! Key behaviors
//! -------------
//! - Options are resolved and validated once, before any heavy work
//!   (including the missing-density `Fail` policy).
//! - Constants supplied by the caller are used verbatim; the others are
//!   derived by [`crate::lrv::corrections`] and [`crate::lrv::sigma`].
//! - `θ(ν) = LSS(ν) − f_against_mp − f_against_D·(r_n(ν)·v_n − 1/(c·B))`.
//! - With `k` frequencies:
//!   - `t_stat_0(ν) = M·θ(ν)/σ`;
//!   - `t_stat_1 = Σ t_stat_0/√k`;
//!   - `t_stat_2 = Σ((M·θ)² − σ²)/(√k·√2·σ²)`;
//!   - `t_stat_3 = Σ t_stat_0²`;
//!   - `t_stat_4 = ½·(max t_stat_0² − b_k)` with
//!     `b_k = 2(ln k − ½ ln ln k − ln Γ(½))`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Per-frequency arrays (frequencies, LSS, `r_n`, θ, `t_stat_0`) share one
//!   length and one order.
//! - σ = 0 is rejected with `LRVError::ZeroVariance`; no statistic is ever
//!   produced by dividing by zero.
//! - For `k = 1`, `b_k = +∞` and `t_stat_4 = −∞`; a warning is logged.
//!
//! Conventions
//! -----------
//! - The coherence estimator is a trait object at the seam; [`lrv`] takes any
//!   [`CoherenceEstimator`] and `LRVResult::compute` uses the default
//!   [`crate::spectral::SmoothedPeriodogram`].
//! - Stages log through `tracing` (`info!` for the run, `debug!` for
//!   derived constants); no subscriber is installed here.
//!
//! Downstream usage
//! ----------------
//! - Inspect the returned [`LRVResult`] or call its decision helpers.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the statistics on fixed θ vectors and the `k = 1`
//!   Gumbel-centering edge case; the end-to-end golden run lives in
//!   `tests/integration_lrv_pipeline.rs`.

use crate::lrv::{
    corrections::{corrections, f_against_d, f_against_mp, r_n_values, v_n},
    errors::{LRVError, LRVTestResult},
    options::{LRVOptions, ResolvedDensity, Supplied},
    result::LRVResult,
    sigma::sigma_series,
    test_function::TestFunction,
};
use crate::spectral::{
    coherence::CoherenceEstimator, errors::SpectralError, lss::linear_spectral_statistics,
    series::TimeSeries,
};
use statrs::function::gamma::ln_gamma;
use std::f64::consts::SQRT_2;
use tracing::{debug, info, warn};

/// The five LRV test statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct TestStatistics {
    pub t_stats_0: Vec<f64>,
    pub t_stat_1: f64,
    pub t_stat_2: f64,
    pub t_stat_3: f64,
    pub t_stat_4: f64,
}

/// Run the LRV test.
///
/// Parameters
/// ----------
/// - `series`: `&TimeSeries`
///   Validated `N×M` series.
/// - `bandwidth`: `usize`
///   Smoothing bandwidth `B`, `1 ≤ B < N`.
/// - `f`: `&F` where `F: TestFunction`
///   Test function applied to the coherence eigenvalues.
/// - `options`: `&LRVOptions`
///   Run configuration; resolved once against `(N, M, B)`.
/// - `estimator`: `&E` where `E: CoherenceEstimator`
///   Source of the per-frequency coherence matrices. It replaces
///   `options.variant`, which only configures [`LRVResult::compute`].
///
/// Returns
/// -------
/// `LRVTestResult<LRVResult>`
///
/// Errors
/// ------
/// - Option resolution errors (see [`LRVOptions::resolve`]).
/// - Estimator, density, and quadrature errors, wrapped.
/// - `LRVError::NegativeVariance` / `ZeroVariance` from the σ stage.
pub fn lrv<F, E>(
    series: &TimeSeries, bandwidth: usize, f: &F, options: &LRVOptions, estimator: &E,
) -> LRVTestResult<LRVResult>
where
    F: TestFunction + ?Sized,
    E: CoherenceEstimator + ?Sized,
{
    let n_obs = series.n_obs();
    let n_features = series.n_features();
    let resolved = options.resolve(n_obs, n_features, bandwidth)?;
    let c = resolved.c;
    let tolerance = resolved.tolerance;
    let quadrature = &resolved.quadrature;
    info!(n_obs, n_features, bandwidth, c, "running LRV test");

    let estimate = estimator.estimate(series, bandwidth, &resolved.frequencies)?;
    let frequencies = estimate.frequencies().to_vec();
    if frequencies.is_empty() {
        return Err(
            SpectralError::InvalidFrequencyCount { requested: 0, available: n_obs }.into()
        );
    }
    let lss = linear_spectral_statistics(&estimate, &|x: f64| f.eval_real(x))?;
    let k = frequencies.len();

    let f_mp = match resolved.f_against_mp {
        Supplied::Given(value) => value,
        Supplied::Derive => f_against_mp(f, c, tolerance, quadrature)?,
    };
    let f_d = match resolved.f_against_d {
        Supplied::Given(value) => value,
        Supplied::Derive => f_against_d(f, c, tolerance, quadrature)?,
    };
    debug!(
        f_against_mp = f_mp,
        f_against_d = f_d,
        mp_derived = matches!(resolved.f_against_mp, Supplied::Derive),
        d_derived = matches!(resolved.f_against_d, Supplied::Derive),
        "centring constants ready"
    );

    let r_n = match &resolved.density {
        ResolvedDensity::Estimate(lag_window) => {
            let density = lag_window.estimate(series)?;
            r_n_values(&density, &frequencies, n_features)?
        }
        ResolvedDensity::Given(density) => {
            r_n_values(density.as_ref(), &frequencies, n_features)?
        }
        ResolvedDensity::Skip => {
            debug!("no spectral density source; frequency-dependent correction skipped");
            vec![0.0; k]
        }
    };
    let v_n = v_n(bandwidth, n_obs);
    let corrections = corrections(f_d, &r_n, v_n, c, bandwidth);
    let thetas: Vec<f64> =
        lss.iter().zip(corrections.iter()).map(|(value, corr)| value - f_mp - corr).collect();

    let sigma = match resolved.sigma {
        Supplied::Given(value) => value,
        Supplied::Derive => {
            let outcome = sigma_series(f, c, tolerance, quadrature)?;
            debug!(sigma = outcome.sigma, terms = outcome.terms, "sigma derived");
            outcome.sigma
        }
    };
    if sigma == 0.0 {
        return Err(LRVError::ZeroVariance);
    }

    let statistics = test_statistics(&thetas, n_features, sigma);
    info!(
        frequencies = k,
        t_stat_1 = statistics.t_stat_1,
        t_stat_3 = statistics.t_stat_3,
        "LRV test complete"
    );

    Ok(LRVResult {
        n_obs,
        n_features,
        bandwidth,
        c,
        frequencies,
        lss,
        v_n,
        r_n,
        thetas,
        f_against_mp: f_mp,
        f_against_d: f_d,
        corrections,
        sigma,
        statistics,
    })
}

/// Test statistics for centred LSS values `thetas` with `M` features and
/// standard deviation `sigma > 0`.
pub fn test_statistics(thetas: &[f64], n_features: usize, sigma: f64) -> TestStatistics {
    let m = n_features as f64;
    let k = thetas.len() as f64;
    let sqrt_k = k.sqrt();

    let t_stats_0: Vec<f64> = thetas.iter().map(|theta| m * theta / sigma).collect();
    let t_stat_1 = t_stats_0.iter().sum::<f64>() / sqrt_k;
    let sigma_sq = sigma * sigma;
    let t_stat_2 = thetas.iter().map(|theta| (m * theta).powi(2) - sigma_sq).sum::<f64>()
        / (sqrt_k * SQRT_2 * sigma_sq);
    let t_stat_3 = t_stats_0.iter().map(|t| t * t).sum::<f64>();

    if thetas.len() == 1 {
        warn!("single frequency: Gumbel centering b_k is infinite and t_stat_4 is -inf");
    }
    let max_sq = t_stats_0.iter().map(|t| t * t).fold(f64::NEG_INFINITY, f64::max);
    let t_stat_4 = 0.5 * (max_sq - gumbel_centering(k));

    TestStatistics { t_stats_0, t_stat_1, t_stat_2, t_stat_3, t_stat_4 }
}

/// `b_k = 2(ln k − ½ ln ln k − ln Γ(½))`.
fn gumbel_centering(k: f64) -> f64 {
    2.0 * (k.ln() - 0.5 * k.ln().ln() - ln_gamma(0.5))
}
