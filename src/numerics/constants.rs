//! Numerical constants shared across the LRV pipeline.
//!
//! Collects the fixed tolerances and step sizes used by the asymptotic
//! formulas so that every call site agrees on them.
//!
//! # Provided items
//! - [`DEFAULT_TOLERANCE`]: default asserted tolerance (1e-6) for
//!   quadrature error estimates and imaginary residues.
//! - [`DERIVATIVE_STEP`]: centred finite-difference step (1e-6).
//! - [`INVERSION_HEIGHT`]: imaginary offset `y` approximating the `y → 0⁺`
//!   limit in the Stieltjes inversion formula.
//! - [`SIGMA_TERM_THRESHOLD`] and [`SIGMA_MAX_TERMS`]: stopping rule of the
//!   variance series.
//! - [`SIGMA_RADIUS_MARGIN`]: extra radius added to `√c` for the variance
//!   contour.

/// Default tolerance for asserted error estimates and imaginary residues.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default absolute / relative targets of the adaptive quadrature.
pub const DEFAULT_EPSABS: f64 = 1e-6;
pub const DEFAULT_EPSREL: f64 = 1e-6;

/// Default subdivision budget of the adaptive quadrature.
pub const DEFAULT_MAX_SUBDIVISIONS: usize = 1000;

/// Step of the centred finite difference `(f(x+h) − f(x−h)) / 2h`.
pub const DERIVATIVE_STEP: f64 = 1e-6;

/// Height `y` at which `Im g(x + iy) / π` approximates the density of a law
/// with Stieltjes transform `g`.
pub const INVERSION_HEIGHT: f64 = 1e-20;

/// The variance series stops at the first term with modulus at or below this.
pub const SIGMA_TERM_THRESHOLD: f64 = 1e-4;

/// Hard cap on the index `n` of the variance series.
pub const SIGMA_MAX_TERMS: usize = 20;

/// The variance contour is the circle of radius `√c + SIGMA_RADIUS_MARGIN`.
pub const SIGMA_RADIUS_MARGIN: f64 = 0.1;
