//! numerics — quadrature, contours, and finite differences.
//!
//! Purpose
//! -------
//! Provide the numerical building blocks of the LRV pipeline: adaptive
//! Gauss–Kronrod quadrature on real intervals, clockwise circle contours with
//! complex contour integration, and fixed-step centred differences.
//!
//! Key behaviors
//! -------------
//! - [`integrate_complex`] / [`integrate_real`] run adaptive 21-point
//!   Gauss–Kronrod quadrature to the targets in [`QuadratureOptions`].
//! - [`Contour`] and [`contour_integral`] integrate `g(z)` along circles.
//! - [`central_difference`] / [`central_difference_vec`] approximate
//!   derivatives with the step [`constants::DERIVATIVE_STEP`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every integration is bounded by a subdivision budget and, optionally,
//!   a wall-clock budget; failures surface as [`NumericsError`].
//! - Contours are oriented clockwise (`∮ 1/z dz = −2πi`).
//!
//! Downstream usage
//! ----------------
//! - `rmt` builds the Stieltjes inversion integral on top of
//!   [`integrate_real`]; `lrv` builds the boundary correction and variance
//!   series on top of [`contour_integral`].

pub mod constants;
pub mod contour;
pub mod differentiation;
pub mod errors;
pub mod quadrature;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::contour::{Contour, contour_integral, real_part};
pub use self::differentiation::{central_difference, central_difference_vec};
pub use self::errors::{NumericsError, NumericsResult};
pub use self::quadrature::{
    QuadratureOptions, QuadratureOutcome, integrate_complex, integrate_real, try_integrate_complex,
};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::contour::{Contour, contour_integral};
    pub use super::errors::{NumericsError, NumericsResult};
    pub use super::quadrature::{QuadratureOptions, integrate_complex, integrate_real};
}
