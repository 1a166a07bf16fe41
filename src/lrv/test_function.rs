//! lrv::test_function — scalar test functions applied to eigenvalues.
//!
//! Purpose
//! -------
//! Represent the function `f` whose linear spectral statistic is tested.
//! Test functions are evaluated on complex arguments because the boundary
//! correction and the variance series integrate `f(ψ(w))` along circles off
//! the real line; on eigenvalues they are evaluated at `x + 0i`.
//!
//! Key behaviors
//! -------------
//! - [`TestFunction`] is the seam: `eval` on `Complex64`, `eval_real` as the
//!   real part of `eval(x + 0i)`.
//! - [`Polynomial`] stores real coefficients in ascending powers and
//!   evaluates with Horner's scheme; [`Polynomial::shifted_square`] builds
//!   `(x − a)²`.
//! - [`ComplexFn`] adapts any `Fn(Complex64) -> Complex64` closure.
//!
//! Invariants & assumptions
//! ------------------------
//! - Test functions are pure and `Send + Sync`; they are shared across the
//!   `rayon` workers that evaluate per-frequency statistics.
//! - Functions should be analytic in a neighbourhood of the MP support so
//!   that the contour integrals are well defined.

use num_complex::Complex64;

/// Pure scalar function evaluated on eigenvalues and along contours.
pub trait TestFunction: Send + Sync {
    fn eval(&self, z: Complex64) -> Complex64;

    fn eval_real(&self, x: f64) -> f64 {
        self.eval(Complex64::new(x, 0.0)).re
    }
}

/// Real polynomial `Σ_k coefficients[k]·x^k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Coefficients in ascending order of power.
    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    /// `(x − shift)²`.
    pub fn shifted_square(shift: f64) -> Self {
        Polynomial::new(vec![shift * shift, -2.0 * shift, 1.0])
    }

    /// `x^power`.
    pub fn monomial(power: usize) -> Self {
        let mut coefficients = vec![0.0; power + 1];
        coefficients[power] = 1.0;
        Polynomial::new(coefficients)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl TestFunction for Polynomial {
    fn eval(&self, z: Complex64) -> Complex64 {
        self.coefficients.iter().rev().fold(Complex64::new(0.0, 0.0), |acc, &a| acc * z + a)
    }

    fn eval_real(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, &a| acc * x + a)
    }
}

/// Closure-backed test function.
#[derive(Debug, Clone, Copy)]
pub struct ComplexFn<F>(pub F);

impl<F> TestFunction for ComplexFn<F>
where
    F: Fn(Complex64) -> Complex64 + Send + Sync,
{
    fn eval(&self, z: Complex64) -> Complex64 {
        (self.0)(z)
    }
}
