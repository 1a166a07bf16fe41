//! rmt::inversion — integrate a test function against a law given by its
//! Stieltjes transform.
//!
//! Purpose
//! -------
//! Compute `∫ f(x) dμ(x)` for a law `μ` known only through its Stieltjes
//! transform `g`, using the inversion formula
//! `dμ/dx = lim_{y→0⁺} Im g(x + iy) / π` evaluated at the fixed height
//! [`INVERSION_HEIGHT`].
//!
//! Key behaviors
//! -------------
//! - [`action_d_on_f`] integrates `f(x)·Im g(x + iy)/π` over a supplied
//!   support with absolute target equal to the caller's tolerance.
//! - A converged integral whose error estimate still exceeds the tolerance
//!   is rejected with [`NumericsError::ErrorAboveTolerance`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The support is a finite interval containing the absolutely continuous
//!   part of `μ`; atoms (e.g. the MP point mass at 0 when `c > 1`) are not
//!   captured.
//! - Failures of `g` (degenerate branches) abort the integral.

use crate::numerics::{
    constants::INVERSION_HEIGHT,
    errors::{NumericsError, NumericsResult},
    quadrature::{QuadratureOptions, try_integrate_complex},
};
use num_complex::Complex64;
use std::f64::consts::PI;

const INVERSION_QUANTITY: &str = "Stieltjes inversion integral";

/// Integrate `f` against the density recovered from the Stieltjes transform `g`.
///
/// Parameters
/// ----------
/// - `f`: `&F` where `F: Fn(f64) -> f64`
///   Real test function.
/// - `g`: `&G` where `G: Fn(Complex64) -> NumericsResult<Complex64>`
///   Stieltjes transform of the target law.
/// - `support`: `(f64, f64)`
///   Integration interval `[lower, upper]`.
/// - `tolerance`: `f64`
///   Absolute quadrature target and asserted bound on the error estimate.
/// - `opts`: `&QuadratureOptions`
///   Source of the subdivision and time budgets.
///
/// Returns
/// -------
/// `NumericsResult<f64>`
///   `∫ f(x)·Im g(x + iy)/π dx` over the support.
///
/// Errors
/// ------
/// - Errors of `g` are propagated; quadrature failures are labelled
///   "Stieltjes inversion integral".
/// - `NumericsError::ErrorAboveTolerance` if the error estimate exceeds
///   `tolerance`.
pub fn action_d_on_f<F, G>(
    f: &F, g: &G, support: (f64, f64), tolerance: f64, opts: &QuadratureOptions,
) -> NumericsResult<f64>
where
    F: Fn(f64) -> f64,
    G: Fn(Complex64) -> NumericsResult<Complex64>,
{
    let (lower, upper) = support;
    let quadrature = opts.absolute(tolerance)?;
    let integrand = |x: f64| -> NumericsResult<Complex64> {
        let density = g(Complex64::new(x, INVERSION_HEIGHT))?.im / PI;
        Ok(Complex64::new(f(x) * density, 0.0))
    };

    let outcome = try_integrate_complex(&integrand, lower, upper, &quadrature)
        .map_err(|err| err.labelled(INVERSION_QUANTITY, None))?;
    if outcome.error > tolerance {
        return Err(NumericsError::ErrorAboveTolerance {
            quantity: INVERSION_QUANTITY,
            achieved: outcome.error,
            tolerance,
        });
    }
    Ok(outcome.value.re)
}
