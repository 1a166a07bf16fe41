//! lrv — the LRV coherence test.
//!
//! Purpose
//! -------
//! Test whether the smoothed coherence matrices of a high-dimensional time
//! series behave like those of independent components, by comparing linear
//! spectral statistics with their Marchenko–Pastur limits.
//!
//! Key behaviors
//! -------------
//! - [`LRVOptions`] configures a run and resolves once into validated
//!   settings.
//! - [`lrv`] (or [`LRVResult::compute`]) runs the pipeline and returns an
//!   immutable [`LRVResult`].
//! - [`corrections`] and [`sigma`] hold the centring, bias, and variance
//!   terms; [`decision`] holds rejection regions and p-values.
//! - Test functions plug in through [`TestFunction`], with [`Polynomial`]
//!   and [`ComplexFn`] provided.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every failure surfaces as [`LRVError`]; lower-level spectral and
//!   numerical errors are wrapped, never discarded.
//!
//! Downstream usage
//! ----------------
//! - Build a [`crate::spectral::TimeSeries`], pick a test function and a
//!   bandwidth, call [`LRVResult::compute`], then inspect the statistics or
//!   call `is_positive_*` / `p_value_*`.

pub mod corrections;
pub mod decision;
pub mod errors;
pub mod options;
pub mod orchestrator;
pub mod result;
pub mod sigma;
pub mod test_function;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::corrections::{correction, f_against_d, f_against_mp, r_n, r_n_values, v_n};
pub use self::decision::{Alternative, Decision, Distribution, is_positive, p_value};
pub use self::errors::{LRVError, LRVTestResult};
pub use self::options::{
    AspectRatio, DensitySource, LRVOptions, MissingDensityPolicy, ResolvedOptions, Supplied,
};
pub use self::orchestrator::{TestStatistics, lrv, test_statistics};
pub use self::result::LRVResult;
pub use self::sigma::{SigmaSeries, sigma, sigma_series};
pub use self::test_function::{ComplexFn, Polynomial, TestFunction};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::decision::{Alternative, Distribution};
    pub use super::errors::{LRVError, LRVTestResult};
    pub use super::options::{AspectRatio, DensitySource, LRVOptions, MissingDensityPolicy, Supplied};
    pub use super::result::LRVResult;
    pub use super::test_function::{ComplexFn, Polynomial, TestFunction};
}
