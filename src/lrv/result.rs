//! lrv::result — immutable record of an LRV run and its decision helpers.
//!
//! Purpose
//! -------
//! Hold every intermediate and final quantity of one LRV test run
//! (dimensions, frequency grid, LSS values, corrections, σ, and the five
//! statistics) and expose the default rejection rules and p-values of each
//! statistic.
//!
//! Key behaviors
//! -------------
//! - [`LRVResult::compute`] runs the pipeline with the default smoothed
//!   periodogram estimator; [`crate::lrv::orchestrator::lrv`] accepts any
//!   estimator.
//! - Statistics 0 to 2 are tested against the standard normal with a
//!   two-sided default, statistic 3 against χ²(k) and statistic 4 against
//!   the standard Gumbel, both right-sided by default.
//! - [`LRVResult::decide`] dispatches on the statistic index.
//!
//! Invariants & assumptions
//! ------------------------
//! - `frequencies`, `lss`, `r_n`, `thetas`, `corrections`, and `t_stats_0`
//!   have the same length `k ≥ 1`.
//! - The record is never mutated after construction.
//!
//! Testing notes
//! -------------
//! - Unit tests build records by hand to check the default alternatives,
//!   index dispatch, and p-value ranges; the pipeline itself is exercised
//!   by the integration tests.

use crate::lrv::{
    decision::{Alternative, Decision, Distribution, is_positive, p_value, validate_level},
    errors::{LRVError, LRVTestResult},
    options::LRVOptions,
    orchestrator::{TestStatistics, lrv},
    test_function::TestFunction,
};
use crate::spectral::{coherence::SmoothedPeriodogram, series::TimeSeries};

/// LRVResult — outcome of one LRV test run.
///
/// Fields
/// ------
/// - `n_obs`, `n_features`, `bandwidth`: `usize`
///   `N`, `M`, and `B`.
/// - `c`: `f64`
///   Aspect ratio used for the MP law.
/// - `frequencies`, `lss`, `r_n`, `thetas`, `corrections`: `Vec<f64>`
///   Per-frequency grid, statistics, bias factors, centred statistics, and
///   total corrections.
/// - `v_n`, `f_against_mp`, `f_against_d`, `sigma`: `f64`
///   Frequency-independent constants of the run.
/// - `statistics`: `TestStatistics`
///   `t_stat_0` per frequency and the global `t_stat_1` to `t_stat_4`.
#[derive(Debug, Clone, PartialEq)]
pub struct LRVResult {
    pub(crate) n_obs: usize,
    pub(crate) n_features: usize,
    pub(crate) bandwidth: usize,
    pub(crate) c: f64,
    pub(crate) frequencies: Vec<f64>,
    pub(crate) lss: Vec<f64>,
    pub(crate) v_n: f64,
    pub(crate) r_n: Vec<f64>,
    pub(crate) thetas: Vec<f64>,
    pub(crate) f_against_mp: f64,
    pub(crate) f_against_d: f64,
    pub(crate) corrections: Vec<f64>,
    pub(crate) sigma: f64,
    pub(crate) statistics: TestStatistics,
}

impl LRVResult {
    /// Run the LRV test with a [`SmoothedPeriodogram`] of `options.variant`.
    pub fn compute<F: TestFunction + ?Sized>(
        series: &TimeSeries, bandwidth: usize, f: &F, options: &LRVOptions,
    ) -> LRVTestResult<Self> {
        let estimator = SmoothedPeriodogram::new(options.variant);
        lrv(series, bandwidth, f, options, &estimator)
    }

    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn bandwidth(&self) -> usize {
        self.bandwidth
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn lss(&self) -> &[f64] {
        &self.lss
    }

    pub fn v_n(&self) -> f64 {
        self.v_n
    }

    pub fn r_n(&self) -> &[f64] {
        &self.r_n
    }

    pub fn thetas(&self) -> &[f64] {
        &self.thetas
    }

    pub fn f_against_mp(&self) -> f64 {
        self.f_against_mp
    }

    pub fn f_against_d(&self) -> f64 {
        self.f_against_d
    }

    pub fn corrections(&self) -> &[f64] {
        &self.corrections
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn statistics(&self) -> &TestStatistics {
        &self.statistics
    }

    pub fn t_stats_0(&self) -> &[f64] {
        &self.statistics.t_stats_0
    }

    pub fn t_stat_1(&self) -> f64 {
        self.statistics.t_stat_1
    }

    pub fn t_stat_2(&self) -> f64 {
        self.statistics.t_stat_2
    }

    pub fn t_stat_3(&self) -> f64 {
        self.statistics.t_stat_3
    }

    pub fn t_stat_4(&self) -> f64 {
        self.statistics.t_stat_4
    }

    // ---- Decisions ----

    /// Per-frequency normal decisions on `t_stat_0` (default `Double`).
    pub fn is_positive_0(
        &self, level: f64, alternative: Option<Alternative>,
    ) -> LRVTestResult<Vec<bool>> {
        validate_level(level)?;
        let alternative = alternative.unwrap_or(Alternative::Double);
        self.statistics
            .t_stats_0
            .iter()
            .map(|&t| is_positive(t, Distribution::Normal, alternative, level, None))
            .collect()
    }

    /// Normal decision on `t_stat_1` (default `Double`).
    pub fn is_positive_1(&self, level: f64, alternative: Option<Alternative>) -> LRVTestResult<bool> {
        self.global_decision(1, level, alternative)
    }

    /// Normal decision on `t_stat_2` (default `Double`).
    pub fn is_positive_2(&self, level: f64, alternative: Option<Alternative>) -> LRVTestResult<bool> {
        self.global_decision(2, level, alternative)
    }

    /// χ²(k) decision on `t_stat_3` (default `Right`).
    pub fn is_positive_3(&self, level: f64, alternative: Option<Alternative>) -> LRVTestResult<bool> {
        self.global_decision(3, level, alternative)
    }

    /// Gumbel decision on `t_stat_4` (default `Right`).
    pub fn is_positive_4(&self, level: f64, alternative: Option<Alternative>) -> LRVTestResult<bool> {
        self.global_decision(4, level, alternative)
    }

    /// Decision for statistic `index ∈ 0..=4`.
    ///
    /// Errors
    /// ------
    /// - `LRVError::InvalidStatisticIndex` for `index > 4`.
    /// - Level validation errors.
    pub fn decide(
        &self, index: usize, level: f64, alternative: Option<Alternative>,
    ) -> LRVTestResult<Decision> {
        match index {
            0 => Ok(Decision::PerFrequency(self.is_positive_0(level, alternative)?)),
            1..=4 => Ok(Decision::Global(self.global_decision(index, level, alternative)?)),
            _ => Err(LRVError::InvalidStatisticIndex(index)),
        }
    }

    // ---- p-values ----

    /// Per-frequency normal p-values of `t_stat_0` (default `Double`).
    pub fn p_values_0(&self, alternative: Option<Alternative>) -> LRVTestResult<Vec<f64>> {
        let alternative = alternative.unwrap_or(Alternative::Double);
        self.statistics
            .t_stats_0
            .iter()
            .map(|&t| p_value(t, Distribution::Normal, alternative, None))
            .collect()
    }

    pub fn p_value_1(&self, alternative: Option<Alternative>) -> LRVTestResult<f64> {
        self.global_p_value(1, alternative)
    }

    pub fn p_value_2(&self, alternative: Option<Alternative>) -> LRVTestResult<f64> {
        self.global_p_value(2, alternative)
    }

    pub fn p_value_3(&self, alternative: Option<Alternative>) -> LRVTestResult<f64> {
        self.global_p_value(3, alternative)
    }

    pub fn p_value_4(&self, alternative: Option<Alternative>) -> LRVTestResult<f64> {
        self.global_p_value(4, alternative)
    }

    // ---- Helper methods ----

    /// Statistic, reference law, default alternative, and degrees of freedom
    /// for the global statistics 1 to 4.
    fn global_setup(
        &self, index: usize,
    ) -> LRVTestResult<(f64, Distribution, Alternative, Option<usize>)> {
        let k = self.frequencies.len();
        match index {
            1 => Ok((self.statistics.t_stat_1, Distribution::Normal, Alternative::Double, None)),
            2 => Ok((self.statistics.t_stat_2, Distribution::Normal, Alternative::Double, None)),
            3 => {
                Ok((self.statistics.t_stat_3, Distribution::ChiSquared, Alternative::Right, Some(k)))
            }
            4 => Ok((self.statistics.t_stat_4, Distribution::Gumbel, Alternative::Right, None)),
            _ => Err(LRVError::InvalidStatisticIndex(index)),
        }
    }

    fn global_decision(
        &self, index: usize, level: f64, alternative: Option<Alternative>,
    ) -> LRVTestResult<bool> {
        let (statistic, distribution, default, df) = self.global_setup(index)?;
        is_positive(statistic, distribution, alternative.unwrap_or(default), level, df)
    }

    fn global_p_value(&self, index: usize, alternative: Option<Alternative>) -> LRVTestResult<f64> {
        let (statistic, distribution, default, df) = self.global_setup(index)?;
        p_value(statistic, distribution, alternative.unwrap_or(default), df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lrv::orchestrator::test_statistics;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Default alternatives of the five statistics.
    // - Index dispatch of `decide`, including the invalid index.
    // - p-value ranges and the right-sided χ² default.
    //
    // They intentionally DO NOT cover:
    // - How the statistics are computed; see `lrv::orchestrator`.
    // -------------------------------------------------------------------------

    fn record(thetas: Vec<f64>, n_features: usize, sigma: f64) -> LRVResult {
        let k = thetas.len();
        let statistics = test_statistics(&thetas, n_features, sigma);
        LRVResult {
            n_obs: 10,
            n_features,
            bandwidth: 3,
            c: n_features as f64 / 3.0,
            frequencies: (0..k).map(|i| i as f64 / 10.0 - 0.5).collect(),
            lss: vec![1.0; k],
            v_n: 0.0,
            r_n: vec![0.0; k],
            thetas,
            f_against_mp: 0.0,
            f_against_d: 0.0,
            corrections: vec![0.0; k],
            sigma,
            statistics,
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify per-frequency and global decisions under default alternatives.
    //
    // Given
    // -----
    // - θ = [1.0, 0.1, −1.5], M = 2, σ = 1, so t_stat_0 = [2, 0.2, −3].
    //
    // Expect
    // ------
    // - Two-sided per-frequency decisions [true, false, true] at 5%; a left
    //   one-sided run rejects only −3; `decide(0, …)` agrees.
    fn is_positive_0_uses_two_sided_normal_by_default() {
        // Arrange
        let result = record(vec![1.0, 0.1, -1.5], 2, 1.0);

        // Act
        let double = result.is_positive_0(0.05, None).unwrap();
        let left = result.is_positive_0(0.05, Some(Alternative::Left)).unwrap();
        let decided = result.decide(0, 0.05, None).unwrap();

        // Assert
        assert_eq!(double, vec![true, false, true]);
        assert_eq!(left, vec![false, false, true]);
        assert_eq!(decided, Decision::PerFrequency(vec![true, false, true]));
    }

    #[test]
    // Purpose
    // -------
    // Check the global statistics and their default laws.
    //
    // Given
    // -----
    // - θ = [3.0, 3.0, 3.0], M = 1, σ = 1: t_stat_3 = 27 far beyond
    //   χ²(3) q(0.95) ≈ 7.81.
    //
    // Expect
    // ------
    // - `is_positive_3` rejects with a tiny p-value; `is_positive_1` rejects
    //   (t_stat_1 = 3√3).
    fn global_statistics_use_default_laws() {
        // Arrange
        let result = record(vec![3.0, 3.0, 3.0], 1, 1.0);

        // Act
        let chi = result.is_positive_3(0.05, None).unwrap();
        let p3 = result.p_value_3(None).unwrap();
        let normal = result.decide(1, 0.05, None).unwrap();

        // Assert
        assert!(chi);
        assert!(p3 < 1e-4, "p3 = {p3}");
        assert_eq!(normal, Decision::Global(true));
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid indices and levels are rejected and p-values are
    // probabilities.
    //
    // Given
    // -----
    // - A small record, index 5, level 1.2.
    //
    // Expect
    // ------
    // - `InvalidStatisticIndex(5)`, `InvalidLevel(1.2)`, p-values in [0, 1].
    fn decide_rejects_invalid_arguments_and_p_values_are_probabilities() {
        // Arrange
        let result = record(vec![0.2, -0.4], 2, 1.0);

        // Act / Assert
        assert_eq!(result.decide(5, 0.05, None), Err(LRVError::InvalidStatisticIndex(5)));
        assert_eq!(result.is_positive_0(1.2, None), Err(LRVError::InvalidLevel(1.2)));
        for p in result.p_values_0(None).unwrap() {
            assert!((0.0..=1.0).contains(&p));
        }
        for p in [
            result.p_value_1(None).unwrap(),
            result.p_value_2(None).unwrap(),
            result.p_value_4(None).unwrap(),
        ] {
            assert!((0.0..=1.0).contains(&p), "p = {p}");
        }
    }
}
