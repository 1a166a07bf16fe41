//! numerics::errors — failure modes of quadrature, contours, and transforms.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by every numerical
//! building block of the crate: adaptive quadrature, contour integration,
//! finite differences, and the Marchenko–Pastur transforms. Each variant
//! carries enough context (which quantity, which tolerance, which achieved
//! error) to diagnose a failed run without re-running it.
//!
//! Key behaviors
//! -------------
//! - Define [`NumericsError`] and [`NumericsResult`] as the canonical error
//!   and result types for the `numerics` and `rmt` subtrees.
//! - Attach human-readable `Display` messages that embed the offending
//!   values, so that `tracing` events and test failures are self-describing.
//!
//! Invariants & assumptions
//! ------------------------
//! - Numerical routines never retry with different parameters; the first
//!   failure is returned to the caller as a `NumericsError`.
//! - Variants are small and cloneable so they can be wrapped by the
//!   higher-level `SpectralError` and `LRVError` enums.
//!
//! Testing notes
//! -------------
//! - Unit tests below check that payloads appear in the `Display` output.

use num_complex::Complex64;

pub type NumericsResult<T> = Result<T, NumericsError>;

/// NumericsError — numerical failures of the integration and transform layer.
///
/// Variants
/// --------
/// - `NonConvergence`
///   The adaptive quadrature exhausted its subdivision budget (or the
///   interval width collapsed below round-off) before the summed error
///   estimate met the requested tolerance. `quantity` names the integral
///   and `term` its series index, if any.
/// - `TimeBudgetExceeded`
///   The optional wall-clock budget of an adaptive integration elapsed,
///   labelled like `NonConvergence`.
/// - `NonFiniteIntegrand`
///   The integrand returned NaN or ±∞ at parameter value `at`.
/// - `InvalidInterval`
///   Integration bounds are non-finite or reversed.
/// - `InvalidQuadratureOptions`
///   Tolerances are non-positive/non-finite or the budget is zero.
/// - `InvalidContour`
///   A circle contour was requested with a non-finite center or a
///   non-positive radius.
/// - `DegenerateBranch`
///   Neither algebraic root of the Marchenko–Pastur Stieltjes equation has a
///   strictly positive imaginary part at `z`, i.e. `z` lies on the support.
/// - `ErrorAboveTolerance`
///   An integration converged but its reported error estimate exceeds the
///   tolerance the caller asserted for `quantity`.
/// - `ResidualImaginary`
///   A quantity that must be real carries an imaginary part whose magnitude
///   is not below `tolerance`.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericsError {
    // ---- Quadrature ----
    NonConvergence {
        quantity: &'static str,
        term: Option<usize>,
        subdivisions: usize,
        achieved: f64,
        requested: f64,
    },
    TimeBudgetExceeded {
        quantity: &'static str,
        term: Option<usize>,
        subdivisions: usize,
        achieved: f64,
        requested: f64,
    },
    NonFiniteIntegrand { at: f64 },
    InvalidInterval { lower: f64, upper: f64 },
    InvalidQuadratureOptions { reason: &'static str },

    // ---- Contours ----
    InvalidContour { center: f64, radius: f64 },

    // ---- Transforms ----
    DegenerateBranch { z: Complex64 },

    // ---- Asserted tolerances ----
    ErrorAboveTolerance { quantity: &'static str, achieved: f64, tolerance: f64 },
    ResidualImaginary { quantity: &'static str, imaginary: f64, tolerance: f64 },
}

impl NumericsError {
    /// Quantity label the bare quadrature attaches to its own failures.
    pub const UNLABELLED: &'static str = "integral";

    /// Relabel a quadrature failure with the quantity being computed.
    ///
    /// `NonConvergence` and `TimeBudgetExceeded` take `quantity` and `term`;
    /// every other variant is returned unchanged.
    pub fn labelled(self, quantity: &'static str, term: Option<usize>) -> Self {
        match self {
            NumericsError::NonConvergence { subdivisions, achieved, requested, .. } => {
                NumericsError::NonConvergence { quantity, term, subdivisions, achieved, requested }
            }
            NumericsError::TimeBudgetExceeded { subdivisions, achieved, requested, .. } => {
                NumericsError::TimeBudgetExceeded {
                    quantity,
                    term,
                    subdivisions,
                    achieved,
                    requested,
                }
            }
            other => other,
        }
    }
}

fn term_suffix(term: &Option<usize>) -> String {
    term.map(|n| format!(" (term n = {n})")).unwrap_or_default()
}

impl std::error::Error for NumericsError {}

impl std::fmt::Display for NumericsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Quadrature ----
            NumericsError::NonConvergence { quantity, term, subdivisions, achieved, requested } => {
                write!(
                    f,
                    "Numerics Error: quadrature for {quantity}{} did not converge after \
                     {subdivisions} subdivisions (error estimate {achieved:e}, requested \
                     {requested:e})",
                    term_suffix(term)
                )
            }
            NumericsError::TimeBudgetExceeded {
                quantity,
                term,
                subdivisions,
                achieved,
                requested,
            } => {
                write!(
                    f,
                    "Numerics Error: quadrature time budget for {quantity}{} exceeded after \
                     {subdivisions} subdivisions (error estimate {achieved:e}, requested \
                     {requested:e})",
                    term_suffix(term)
                )
            }
            NumericsError::NonFiniteIntegrand { at } => {
                write!(f, "Numerics Error: integrand is not finite at parameter {at}")
            }
            NumericsError::InvalidInterval { lower, upper } => {
                write!(f, "Numerics Error: invalid integration interval [{lower}, {upper}]")
            }
            NumericsError::InvalidQuadratureOptions { reason } => {
                write!(f, "Numerics Error: invalid quadrature options ({reason})")
            }

            // ---- Contours ----
            NumericsError::InvalidContour { center, radius } => write!(
                f,
                "Numerics Error: invalid circle contour (center = {center}, radius = {radius})"
            ),

            // ---- Transforms ----
            NumericsError::DegenerateBranch { z } => write!(
                f,
                "Numerics Error: no Stieltjes branch with positive imaginary part at z = {z}; \
                 z lies on the Marchenko–Pastur support"
            ),

            // ---- Asserted tolerances ----
            NumericsError::ErrorAboveTolerance { quantity, achieved, tolerance } => write!(
                f,
                "Numerics Error: error estimate {achieved:e} for {quantity} exceeds tolerance \
                 {tolerance:e}"
            ),
            NumericsError::ResidualImaginary { quantity, imaginary, tolerance } => write!(
                f,
                "Numerics Error: {quantity} has imaginary residue {imaginary:e} (tolerance \
                 {tolerance:e})"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Embedding of payload values into `Display` messages.
    //
    // They intentionally DO NOT cover:
    // - The conditions under which each variant is raised; those are tested
    //   in the quadrature, contour, and transform modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `NonConvergence` reports the subdivision count and both
    // error levels.
    //
    // Given
    // -----
    // - A `NonConvergence` with 1000 subdivisions.
    //
    // Expect
    // ------
    // - The message contains "1000" and the requested tolerance.
    fn non_convergence_display_includes_budget_and_tolerances() {
        // Arrange
        let err = NumericsError::NonConvergence {
            quantity: NumericsError::UNLABELLED,
            term: None,
            subdivisions: 1000,
            achieved: 2e-3,
            requested: 1e-6,
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("1000"), "missing subdivision count.\nGot: {msg}");
        assert!(msg.contains("1e-6"), "missing requested tolerance.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `ResidualImaginary` names the offending quantity.
    //
    // Given
    // -----
    // - A `ResidualImaginary` for "sigma squared".
    //
    // Expect
    // ------
    // - The message contains "sigma squared".
    fn residual_imaginary_display_names_quantity() {
        // Arrange
        let err = NumericsError::ResidualImaginary {
            quantity: "sigma squared",
            imaginary: 0.5,
            tolerance: 1e-6,
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("sigma squared"), "missing quantity name.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Check that relabelling names the quantity and series term of a
    // quadrature failure and leaves other variants alone.
    //
    // Given
    // -----
    // - An unlabelled `TimeBudgetExceeded` and an `InvalidContour`.
    //
    // Expect
    // ------
    // - The budget error carries the new label, term 3, and its requested
    //   target in the message; the contour error is unchanged.
    fn labelled_renames_quadrature_failures_only() {
        // Arrange
        let budget = NumericsError::TimeBudgetExceeded {
            quantity: NumericsError::UNLABELLED,
            term: None,
            subdivisions: 1,
            achieved: 0.25,
            requested: 1e-14,
        };
        let contour = NumericsError::InvalidContour { center: 0.0, radius: -1.0 };

        // Act
        let relabelled = budget.labelled("sigma series term", Some(3));
        let untouched = contour.clone().labelled("sigma series term", Some(3));

        // Assert
        assert_eq!(
            relabelled,
            NumericsError::TimeBudgetExceeded {
                quantity: "sigma series term",
                term: Some(3),
                subdivisions: 1,
                achieved: 0.25,
                requested: 1e-14,
            }
        );
        let msg = relabelled.to_string();
        assert!(msg.contains("sigma series term (term n = 3)"), "missing label.\nGot: {msg}");
        assert!(msg.contains("1e-14"), "missing requested target.\nGot: {msg}");
        assert_eq!(untouched, contour);
    }
}
