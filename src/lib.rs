//! rust_lrv — random-matrix coherence tests for high-dimensional time series.
//!
//! Purpose
//! -------
//! Serve as the crate root. The crate implements the LRV test: it estimates
//! smoothed coherence matrices of an `N×M` series across Fourier
//! frequencies, reduces each to a linear spectral statistic, centres and
//! corrects it with Marchenko–Pastur limits, and assembles five test
//! statistics with normal, χ², and Gumbel reference laws.
//!
//! Key behaviors
//! -------------
//! - [`numerics`]: adaptive quadrature, circle contours, finite differences.
//! - [`rmt`]: Marchenko–Pastur transforms and Stieltjes inversion.
//! - [`spectral`]: series storage, lag-window densities, coherence
//!   estimation, and linear spectral statistics.
//! - [`lrv`]: options, corrections, σ, the orchestrator, the result record,
//!   and decisions.
//!
//! Invariants & assumptions
//! ------------------------
//! - The library is pure: no I/O, no global state, and no `tracing`
//!   subscriber is installed; callers decide where logs go.
//! - Each subtree reports failures through its own error enum, and the
//!   enums convert upward into [`lrv::LRVError`].
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ndarray::Array2;
//! use rust_lrv::lrv::prelude::*;
//! use rust_lrv::spectral::TimeSeries;
//!
//! let data = Array2::from_shape_fn((64, 4), |(t, m)| ((t * 7 + m * 3) % 11) as f64);
//! let series = TimeSeries::from_real(&data)?;
//! let f = Polynomial::shifted_square(1.0);
//! let result = LRVResult::compute(&series, 8, &f, &LRVOptions::default())?;
//! let reject = result.is_positive_1(0.05, None)?;
//! # let _ = reject;
//! # Ok::<(), LRVError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code in each module; the end-to-end
//!   reference run is in `tests/integration_lrv_pipeline.rs`.

pub mod lrv;
pub mod numerics;
pub mod rmt;
pub mod spectral;
