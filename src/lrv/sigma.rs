//! lrv::sigma — asymptotic standard deviation of the LSS.
//!
//! Purpose
//! -------
//! Estimate the limiting standard deviation σ of `M·θ(ν)` under the null
//! from the series of contour integrals
//! `cᵢ(n) = ∮ −√(n + 1)·c·f(ψ(w, c))/w^{n+2} dw`, n = 1, 2, …, on the circle
//! of centre 0 and radius `√c + 0.1`, with
//! `σ² = −Σ_n cᵢ(n)²/(4π²)`.
//!
//! Key behaviors
//! -------------
//! - Terms are evaluated sequentially; the first term with
//!   `|cᵢ(n)| ≤ 1e-4` is included and ends the series.
//! - The series is capped at `n ≤ 20`; hitting the cap without a small term
//!   emits a `tracing` warning and keeps the partial sum.
//! - Quadrature failures name the series and the term index `n` at which
//!   they occurred.
//! - The imaginary residue of σ² must be below the scaled bound and its
//!   real part must be non-negative.
//!
//! Invariants & assumptions
//! ------------------------
//! - `c` is finite and `> 0`.
//! - `f` is analytic on and inside the contour image under ψ, away from
//!   `w = 0`.
//! - σ² is accepted as real when `|Im σ²| < tolerance·max(1, |Re σ²|)`.
//!   The bound is relative for large variances, so `σ(s·f) = |s|·σ(f)`
//!   holds without spurious residue failures.
//!
//! Testing notes
//! -------------
//! - Unit tests pin `σ(x², 1) = √2`, `σ(x², ½) = √2/2`, and
//!   `σ((x − 1)², c) = √2·c`, and drive each failure path with
//!   complex-valued or slowly decaying test functions.

use crate::lrv::{
    errors::{LRVError, LRVTestResult},
    test_function::TestFunction,
};
use crate::numerics::{
    constants::{SIGMA_MAX_TERMS, SIGMA_RADIUS_MARGIN, SIGMA_TERM_THRESHOLD},
    contour::{Contour, contour_integral, real_part},
    errors::NumericsError,
    quadrature::QuadratureOptions,
};
use crate::rmt::marchenko_pastur::psi;
use num_complex::Complex64;
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Outcome of the variance series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaSeries {
    pub sigma: f64,
    pub terms: usize,
    pub converged: bool,
}

/// σ for test function `f` at aspect ratio `c`.
///
/// Errors
/// ------
/// - Contour and quadrature errors, wrapped as `LRVError::Numerics`;
///   quadrature failures are labelled "sigma series term" with the index n.
/// - `NumericsError::ResidualImaginary` if
///   `|Im σ²| ≥ tolerance·max(1, |Re σ²|)`.
/// - `LRVError::NegativeVariance` if `Re σ² < 0`.
pub fn sigma<F: TestFunction + ?Sized>(
    f: &F, c: f64, tolerance: f64, opts: &QuadratureOptions,
) -> LRVTestResult<f64> {
    Ok(sigma_series(f, c, tolerance, opts)?.sigma)
}

/// σ together with the number of series terms and whether the series met
/// its stopping threshold before the cap.
pub fn sigma_series<F: TestFunction + ?Sized>(
    f: &F, c: f64, tolerance: f64, opts: &QuadratureOptions,
) -> LRVTestResult<SigmaSeries> {
    let contour = Contour::circle(0.0, c.sqrt() + SIGMA_RADIUS_MARGIN)?;

    let mut sum_of_squares = Complex64::new(0.0, 0.0);
    let mut terms = 0;
    let mut converged = false;
    for n in 1..=SIGMA_MAX_TERMS {
        let term = series_term(f, c, n, &contour, opts)?;
        sum_of_squares += term * term;
        terms = n;
        if term.norm() <= SIGMA_TERM_THRESHOLD {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(terms, c, "variance series hit its term cap before the stopping threshold");
    }

    let variance = real_part("sigma squared", -sum_of_squares / (4.0 * PI * PI), tolerance)?;
    if variance < 0.0 {
        return Err(LRVError::NegativeVariance(variance));
    }
    debug!(terms, converged, sigma_squared = variance, "variance series evaluated");

    Ok(SigmaSeries { sigma: variance.sqrt(), terms, converged })
}

fn series_term<F: TestFunction + ?Sized>(
    f: &F, c: f64, n: usize, contour: &Contour, opts: &QuadratureOptions,
) -> Result<Complex64, NumericsError> {
    let weight = -((n + 1) as f64).sqrt() * c;
    let power = (n + 2) as i32;
    let integrand = |w: Complex64| weight * f.eval(psi(w, c)) / w.powi(power);
    contour_integral(&integrand, contour, opts)
        .map_err(|err| err.labelled("sigma series term", Some(n)))
}
