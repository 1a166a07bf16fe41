//! lrv::corrections — centring and boundary corrections of the LSS.
//!
//! Purpose
//! -------
//! Compute the deterministic terms subtracted from each linear spectral
//! statistic before it is standardised:
//! - the Marchenko–Pastur centring `f_against_mp = ∫ f dμ_c`;
//! - the boundary term `f_against_D`, the action of the companion boundary
//!   distribution `D` on `f`;
//! - the smoothing-bias factors `r_n(ν)` and `v_n`;
//! - the combined correction `f_against_D·(r_n(ν)·v_n − 1/(c·B))`.
//!
//! Key behaviors
//! -------------
//! - [`f_against_mp`] uses Stieltjes inversion of the MP transform over the
//!   MP support.
//! - [`f_against_d`] evaluates
//!   `Re ∮ −c/(2πi)·f(ψ(w, c))/w³ dw` on the circle of centre 0 and radius
//!   `√c`, and rejects results whose imaginary residue is not below the
//!   tolerance.
//! - [`r_n`] is `(mean_m sd'_m(ν)/sd_m(ν))²`; [`r_n_values`] evaluates it on
//!   a frequency grid in parallel.
//! - [`v_n`] is `mean_b (b/N)²` over the `B` smoothing offsets
//!   `b ∈ [−⌊B/2⌋, ⌊(B − 1)/2⌋]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `c` has been validated (finite, `> 0`) by option resolution.
//! - A zero density component fails with `SpectralError::ZeroDensity`
//!   rather than producing NaN or ±∞.
//! - `f_against_D` is accepted as real when its imaginary residue is below
//!   `tolerance·max(1, |Re|)`; the bound is relative for large values so
//!   that rescaling `f` does not change the outcome.
//!
//! Testing notes
//! -------------
//! - Unit tests pin `v_n(2, 10) = 0.005`, the `r_n` cases for hand-built
//!   densities, `f_against_mp` moments, and `f_against_D((x − 1)²) = c`.

use crate::lrv::test_function::TestFunction;
use crate::numerics::{
    contour::{Contour, contour_integral, real_part},
    errors::NumericsResult,
    quadrature::QuadratureOptions,
};
use crate::rmt::{
    inversion::action_d_on_f,
    marchenko_pastur::{psi, stieltjes, support_mp},
};
use crate::spectral::{
    errors::{SpectralError, SpectralResult},
    lag_window::SpectralDensity,
};
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;

const F_AGAINST_D: &str = "f_against_D";

/// `∫ f dμ_c`, the expectation of `f` under the MP law.
///
/// Errors
/// ------
/// - Errors of [`action_d_on_f`], including `ErrorAboveTolerance`.
pub fn f_against_mp<F: TestFunction + ?Sized>(
    f: &F, c: f64, tolerance: f64, opts: &QuadratureOptions,
) -> NumericsResult<f64> {
    action_d_on_f(
        &|x: f64| f.eval_real(x),
        &|z: Complex64| stieltjes(z, c),
        support_mp(c),
        tolerance,
        opts,
    )
}

/// Boundary term `Re ∮ −c/(2πi)·f(ψ(w, c))/w³ dw` on `|w| = √c`.
///
/// Errors
/// ------
/// - Contour errors; quadrature failures labelled "f_against_D".
/// - `NumericsError::ResidualImaginary` if `|Im| ≥ tolerance·max(1, |Re|)`.
pub fn f_against_d<F: TestFunction + ?Sized>(
    f: &F, c: f64, tolerance: f64, opts: &QuadratureOptions,
) -> NumericsResult<f64> {
    let root = c.sqrt();
    let contour = Contour::spanning(-root, root)?;
    let scale = Complex64::new(0.0, 2.0 * PI).inv() * (-c);
    let integrand = |w: Complex64| scale * f.eval(psi(w, c)) / (w * w * w);

    let value = contour_integral(&integrand, &contour, opts)
        .map_err(|err| err.labelled(F_AGAINST_D, None))?;
    real_part(F_AGAINST_D, value, tolerance)
}

/// Smoothing-window factor `v_n = mean_b (b/N)²`.
pub fn v_n(bandwidth: usize, n_obs: usize) -> f64 {
    let n = n_obs as f64;
    let lower = -((bandwidth / 2) as i64);
    let sum: f64 = (lower..lower + bandwidth as i64).map(|b| (b as f64 / n).powi(2)).sum();
    sum / bandwidth as f64
}

/// `r_n(ν) = (mean_m sd'_m(ν)/sd_m(ν))²`.
///
/// Errors
/// ------
/// - `SpectralError::ShapeMismatch` if density and derivative lengths differ.
/// - `SpectralError::ZeroDensity` if a density component is zero.
/// - Errors of the density source.
pub fn r_n<D: SpectralDensity + ?Sized>(density: &D, frequency: f64) -> SpectralResult<f64> {
    let sd = density.density(frequency)?;
    let sd_prime = density.derivative(frequency)?;
    if sd.len() != sd_prime.len() {
        return Err(SpectralError::ShapeMismatch { expected: sd.len(), found: sd_prime.len() });
    }
    if sd.is_empty() {
        return Err(SpectralError::EmptyFeatureSet);
    }

    let mut total = 0.0;
    for (feature, (value, slope)) in sd.iter().zip(sd_prime.iter()).enumerate() {
        if *value == 0.0 {
            return Err(SpectralError::ZeroDensity { frequency, feature });
        }
        total += slope / value;
    }
    let mean = total / sd.len() as f64;
    Ok(mean * mean)
}

/// `r_n` on every frequency, checking that the density has `n_features`
/// components.
pub fn r_n_values<D: SpectralDensity + ?Sized>(
    density: &D, frequencies: &[f64], n_features: usize,
) -> SpectralResult<Vec<f64>> {
    frequencies
        .par_iter()
        .map(|&frequency| {
            let found = density.density(frequency)?.len();
            if found != n_features {
                return Err(SpectralError::ShapeMismatch { expected: n_features, found });
            }
            r_n(density, frequency)
        })
        .collect()
}

/// Total correction `f_against_D·(r_n·v_n − 1/(c·B))` at one frequency.
#[inline]
pub fn correction(f_against_d: f64, r_n: f64, v_n: f64, c: f64, bandwidth: usize) -> f64 {
    f_against_d * (r_n * v_n - 1.0 / (c * bandwidth as f64))
}

/// Corrections for every frequency.
pub fn corrections(f_against_d: f64, r_n: &[f64], v_n: f64, c: f64, bandwidth: usize) -> Vec<f64> {
    r_n.iter().map(|&r| correction(f_against_d, r, v_n, c, bandwidth)).collect()
}
