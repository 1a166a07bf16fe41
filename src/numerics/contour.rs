//! numerics::contour — circle contours and complex contour integrals.
//!
//! Purpose
//! -------
//! Represent closed circular contours in the complex plane and integrate
//! complex functions along them by reparametrising to the unit interval and
//! delegating to the adaptive quadrature in [`crate::numerics::quadrature`].
//!
//! Key behaviors
//! -------------
//! - [`Contour::circle`] builds the circle `z(τ) = center + r·exp(−2πiτ)`,
//!   τ ∈ [0, 1], together with its derivative `dz(τ) = −2πi·r·exp(−2πiτ)`.
//! - [`contour_integral`] computes `∮ g(z) dz = ∫₀¹ g(z(τ))·dz(τ) dτ`.
//! - [`real_part`] accepts a contour result as real when its imaginary
//!   residue is below `tolerance·max(1, |Re|)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Orientation is clockwise: `∮ 1/z dz = −2πi` on any circle around 0.
//!   Every residue-style formula in the crate is written for this
//!   orientation, so it must not be flipped.
//! - Contours are immutable once constructed; radius is finite and `> 0`.
//! - The residue bound of [`real_part`] scales with the real part, so a
//!   test function multiplied by a constant `s` is accepted or rejected
//!   exactly as the unscaled one (for `|Re| ≥ 1`).
//!
//! Testing notes
//! -------------
//! - Unit tests pin the orientation (`∮ 1/z = −2πi`) and check that entire
//!   functions integrate to zero.

use crate::numerics::{
    errors::{NumericsError, NumericsResult},
    quadrature::{QuadratureOptions, integrate_complex},
};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Closed circle traversed clockwise once as τ runs over [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contour {
    center: f64,
    radius: f64,
}

impl Contour {
    /// Construct the circle of the given real `center` and `radius`.
    ///
    /// Errors
    /// ------
    /// - `NumericsError::InvalidContour` if `center` is not finite or
    ///   `radius` is not finite and strictly positive.
    pub fn circle(center: f64, radius: f64) -> NumericsResult<Self> {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return Err(NumericsError::InvalidContour { center, radius });
        }
        Ok(Contour { center, radius })
    }

    /// Circle centred at the midpoint of `[lower, upper]` passing through both ends.
    pub fn spanning(lower: f64, upper: f64) -> NumericsResult<Self> {
        Contour::circle(0.5 * (lower + upper), 0.5 * (upper - lower))
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Point on the contour at parameter `tau`.
    #[inline]
    pub fn z(&self, tau: f64) -> Complex64 {
        Complex64::new(self.center, 0.0) + self.radius * phase(tau)
    }

    /// Derivative `dz/dτ` at parameter `tau`.
    #[inline]
    pub fn dz(&self, tau: f64) -> Complex64 {
        Complex64::new(0.0, -2.0 * PI * self.radius) * phase(tau)
    }
}

#[inline]
fn phase(tau: f64) -> Complex64 {
    Complex64::new(0.0, -2.0 * PI * tau).exp()
}

/// Integrate `g` along `contour`.
///
/// Parameters
/// ----------
/// - `g`: `&F` where `F: Fn(Complex64) -> Complex64`
///   Integrand; must be finite on the contour.
/// - `contour`: `&Contour`
///   Clockwise circle.
/// - `opts`: `&QuadratureOptions`
///   Accuracy targets and budgets of the underlying real quadrature.
///
/// Returns
/// -------
/// `NumericsResult<Complex64>`
///   `∫₀¹ g(z(τ))·dz(τ) dτ`.
///
/// Errors
/// ------
/// - Any [`NumericsError`] raised by [`integrate_complex`], in particular
///   `NonConvergence` with the achieved and requested error levels.
pub fn contour_integral<F>(
    g: &F, contour: &Contour, opts: &QuadratureOptions,
) -> NumericsResult<Complex64>
where
    F: Fn(Complex64) -> Complex64,
{
    let integrand = |tau: f64| g(contour.z(tau)) * contour.dz(tau);
    Ok(integrate_complex(&integrand, 0.0, 1.0, opts)?.value)
}

/// Real part of a contour result that must be real.
///
/// The imaginary residue is accepted when `|Im| < tolerance·max(1, |Re|)`,
/// i.e. absolutely for results of magnitude below one and relatively above.
///
/// Errors
/// ------
/// - `NumericsError::ResidualImaginary` naming `quantity`, reporting the
///   residue and the scaled bound it failed.
pub fn real_part(quantity: &'static str, value: Complex64, tolerance: f64) -> NumericsResult<f64> {
    let bound = tolerance * value.re.abs().max(1.0);
    if value.im.abs() >= bound {
        return Err(NumericsError::ResidualImaginary {
            quantity,
            imaginary: value.im,
            tolerance: bound,
        });
    }
    Ok(value.re)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Orientation of the circle parametrisation.
    // - Cauchy's theorem for entire integrands.
    // - Validation of contour parameters.
    //
    // They intentionally DO NOT cover:
    // - Quadrature convergence failures; see `numerics::quadrature`.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-9;

    fn unit_circle() -> Contour {
        Contour::circle(0.0, 1.0).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Pin the clockwise orientation of every contour in the crate.
    //
    // Given
    // -----
    // - g(z) = 1/z on the unit circle.
    //
    // Expect
    // ------
    // - ∮ g = −2πi.
    fn contour_integral_reciprocal_is_minus_two_pi_i() {
        // Act
        let value =
            contour_integral(&|z: Complex64| z.inv(), &unit_circle(), &QuadratureOptions::default())
                .unwrap();

        // Assert
        assert_relative_eq!(value.re, 0.0, epsilon = TOL);
        assert_relative_eq!(value.im, -2.0 * PI, epsilon = TOL);
    }

    #[test]
    // Purpose
    // -------
    // Check that entire functions integrate to zero on a closed contour.
    //
    // Given
    // -----
    // - g(z) = z and g(z) = z² on the unit circle.
    //
    // Expect
    // ------
    // - Both integrals vanish.
    fn contour_integral_entire_functions_vanish() {
        // Arrange
        let opts = QuadratureOptions::default();

        // Act
        let linear = contour_integral(&|z: Complex64| z, &unit_circle(), &opts).unwrap();
        let square = contour_integral(&|z: Complex64| z * z, &unit_circle(), &opts).unwrap();

        // Assert
        assert!(linear.norm() < TOL, "∮z = {linear}");
        assert!(square.norm() < TOL, "∮z² = {square}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that a shifted circle keeps the orientation and encloses its pole.
    //
    // Given
    // -----
    // - g(z) = 1/(z − 2) on the circle of centre 2 and radius 0.5.
    //
    // Expect
    // ------
    // - ∮ g = −2πi.
    fn contour_integral_shifted_circle_encloses_its_center() {
        // Arrange
        let contour = Contour::circle(2.0, 0.5).unwrap();

        // Act
        let value = contour_integral(
            &|z: Complex64| (z - 2.0).inv(),
            &contour,
            &QuadratureOptions::default(),
        )
        .unwrap();

        // Assert
        assert_relative_eq!(value.im, -2.0 * PI, epsilon = TOL);
    }

    #[test]
    // Purpose
    // -------
    // Ensure degenerate circles are rejected.
    //
    // Given
    // -----
    // - radius = 0 and center = NaN.
    //
    // Expect
    // ------
    // - `InvalidContour` in both cases.
    fn contour_circle_rejects_degenerate_parameters() {
        // Act / Assert
        assert!(matches!(Contour::circle(0.0, 0.0), Err(NumericsError::InvalidContour { .. })));
        assert!(matches!(
            Contour::circle(f64::NAN, 1.0),
            Err(NumericsError::InvalidContour { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check that the imaginary residue bound is absolute below one and
    // relative above.
    //
    // Given
    // -----
    // - tolerance 1e-6; values 0.5 + 2e-6i, 1e5 − 7e-5i, and 1e5 + 0.5i.
    //
    // Expect
    // ------
    // - The first is rejected against bound 1e-6, the second accepted, the
    //   third rejected against bound 0.1.
    fn real_part_scales_residue_bound_with_magnitude() {
        // Act
        let small = real_part("small", Complex64::new(0.5, 2e-6), 1e-6);
        let scaled = real_part("scaled", Complex64::new(1e5, -7e-5), 1e-6);
        let large = real_part("large", Complex64::new(1e5, 0.5), 1e-6);

        // Assert
        assert_eq!(
            small,
            Err(NumericsError::ResidualImaginary {
                quantity: "small",
                imaginary: 2e-6,
                tolerance: 1e-6,
            })
        );
        assert_eq!(scaled, Ok(1e5));
        match large {
            Err(NumericsError::ResidualImaginary { quantity, imaginary, tolerance }) => {
                assert_eq!(quantity, "large");
                assert_eq!(imaginary, 0.5);
                assert_relative_eq!(tolerance, 0.1, max_relative = 1e-12);
            }
            other => panic!("expected ResidualImaginary, got {other:?}"),
        }
    }
}
