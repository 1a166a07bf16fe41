//! rmt::marchenko_pastur — Marchenko–Pastur law and its transforms.
//!
//! Purpose
//! -------
//! Evaluate the closed-form objects attached to the Marchenko–Pastur (MP)
//! law with aspect ratio `c > 0`: its support, its Stieltjes transform `t`,
//! the companion transform `t̃`, the product `z·t·t̃`, and the map
//! `ψ(w) = (w + 1)(w + c)/w` used to pull test functions back to a circle.
//!
//! Key behaviors
//! -------------
//! - [`support_mp`] returns `((1 − √c)², (1 + √c)²)` with the lower edge
//!   clamped at 0.
//! - [`stieltjes`] solves the quadratic satisfied by `t(z)` and returns the
//!   root with strictly positive imaginary part.
//! - [`psi`] is the change of variables used by the boundary term and the
//!   variance series.
//! - [`companion_stieltjes`] and [`z_t_t_tilde`] are direct formulas on top
//!   of [`stieltjes`]. The LRV pipeline does not call them; they are
//!   diagnostics of the transform pair `(t, t̃)` and are reachable only
//!   through this module path, not the `rmt` re-exports.
//!
//! Invariants & assumptions
//! ------------------------
//! - `c` is finite and strictly positive; callers validate it once upstream.
//! - Branch selection never guesses: when neither root has a positive
//!   imaginary part (real `z` off the upper half-plane) the call fails with
//!   [`NumericsError::DegenerateBranch`].
//!
//! Conventions
//! -----------
//! - `t(z) = ∫ 1/(x − z) dμ_c(x)`, so `Im t(x + iy) / π → density` as
//!   `y → 0⁺` inside the support.
//! - Square roots are principal (`num_complex::Complex64::sqrt`).
//!
//! Testing notes
//! -------------
//! - Unit tests check the support edges, the quadratic identity satisfied
//!   by `t`, the sign of `Im t` in the upper half-plane, the companion
//!   identity, and the degenerate-branch error on the real axis.

use crate::numerics::errors::{NumericsError, NumericsResult};
use num_complex::Complex64;

/// Support `[a, b]` of the MP law with aspect ratio `c`.
pub fn support_mp(c: f64) -> (f64, f64) {
    let root = c.sqrt();
    (((1.0 - root) * (1.0 - root)).max(0.0), (1.0 + root) * (1.0 + root))
}

/// Stieltjes transform `t(z, c)` of the MP law.
///
/// Parameters
/// ----------
/// - `z`: `Complex64`
///   Evaluation point, typically `x + iy` with small `y > 0`.
/// - `c`: `f64`
///   Aspect ratio; finite and `> 0`.
///
/// Returns
/// -------
/// `NumericsResult<Complex64>`
///   The root `G± = −((1 − c) − z ± √D)/(2cz)`, `D = (z − 1 − c)² − 4c`,
///   whose imaginary part is strictly positive. `G₊` is preferred when both
///   qualify.
///
/// Errors
/// ------
/// - `NumericsError::DegenerateBranch { z }` when neither root has a
///   strictly positive imaginary part.
pub fn stieltjes(z: Complex64, c: f64) -> NumericsResult<Complex64> {
    let shifted = z - 1.0 - c;
    let discriminant = shifted * shifted - 4.0 * c;
    let root = discriminant.sqrt();
    let base = Complex64::new(1.0 - c, 0.0) - z;
    let denominator = 2.0 * c * z;

    let plus = -(base + root) / denominator;
    if plus.im > 0.0 {
        return Ok(plus);
    }
    let minus = -(base - root) / denominator;
    if minus.im > 0.0 {
        return Ok(minus);
    }
    Err(NumericsError::DegenerateBranch { z })
}

/// Companion transform `t̃(z, c) = −1 / (z·(1 + c·t(z, c)))`.
pub fn companion_stieltjes(z: Complex64, c: f64) -> NumericsResult<Complex64> {
    let t = stieltjes(z, c)?;
    Ok(-(z * (1.0 + c * t)).inv())
}

/// Product `z·t(z, c)·t̃(z, c)`.
pub fn z_t_t_tilde(z: Complex64, c: f64) -> NumericsResult<Complex64> {
    let t = stieltjes(z, c)?;
    let t_tilde = -(z * (1.0 + c * t)).inv();
    Ok(z * t * t_tilde)
}

/// `ψ(w, c) = (w + 1)(w + c)/w`.
///
/// Maps the circle `|w| = √c` onto the MP support traversed twice; used to
/// express boundary and variance integrals as contour integrals in `w`.
#[inline]
pub fn psi(w: Complex64, c: f64) -> Complex64 {
    (w + 1.0) * (w + c) / w
}
