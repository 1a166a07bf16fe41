//! numerics::differentiation — centred finite differences.
//!
//! Provides the fixed-step centred difference
//! `f'(x) ≈ (f(x + h) − f(x − h)) / 2h` with `h = DERIVATIVE_STEP` (1e-6),
//! for scalar functions and for vector-valued functions evaluated
//! component-wise. The step is fixed, not adaptive, so that the derivative
//! of a spectral density is reproducible across runs.

use crate::numerics::constants::DERIVATIVE_STEP;
use ndarray::Array1;

/// Centred difference of a scalar function at `x`.
pub fn central_difference<F>(f: &F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = DERIVATIVE_STEP;
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Component-wise centred difference of a vector-valued function at `x`.
///
/// Errors from `f` are propagated unchanged; the two evaluations must have
/// equal length (the caller's function fixes the output dimension).
pub fn central_difference_vec<F, E>(f: &F, x: f64) -> Result<Array1<f64>, E>
where
    F: Fn(f64) -> Result<Array1<f64>, E>,
{
    let h = DERIVATIVE_STEP;
    let forward = f(x + h)?;
    let backward = f(x - h)?;
    Ok((forward - backward) / (2.0 * h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accuracy of the scalar and vector centred differences on polynomials.
    //
    // They intentionally DO NOT cover:
    // - Step-size selection; the step is a fixed constant.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check the scalar difference on x² and x³ at 2.
    //
    // Given
    // -----
    // - f(x) = x² and g(x) = x³.
    //
    // Expect
    // ------
    // - f'(2) ≈ 4 and g'(2) ≈ 12 to relative 1e-3.
    fn central_difference_polynomials_match_analytic_derivatives() {
        // Act
        let square = central_difference(&|x: f64| x * x, 2.0);
        let cube = central_difference(&|x: f64| x * x * x, 2.0);

        // Assert
        assert_relative_eq!(square, 4.0, max_relative = 1e-3);
        assert_relative_eq!(cube, 12.0, max_relative = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Check the vector difference applies component-wise.
    //
    // Given
    // -----
    // - f(x) = [x, x²] at 2.
    //
    // Expect
    // ------
    // - [1, 4] to relative 1e-3.
    fn central_difference_vec_is_componentwise() {
        // Arrange
        let f = |x: f64| -> Result<Array1<f64>, ()> { Ok(array![x, x * x]) };

        // Act
        let derivative = central_difference_vec(&f, 2.0).unwrap();

        // Assert
        assert_relative_eq!(derivative[0], 1.0, max_relative = 1e-3);
        assert_relative_eq!(derivative[1], 4.0, max_relative = 1e-3);
    }
}
