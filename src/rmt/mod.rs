//! rmt — Marchenko–Pastur transforms and Stieltjes inversion.
//!
//! Purpose
//! -------
//! Collect the random-matrix-theory objects used by the LRV correction
//! terms: the Marchenko–Pastur support and Stieltjes transforms, the map
//! `ψ`, and the inversion integral that turns a Stieltjes transform into
//! an expectation under its law.
//!
//! Key behaviors
//! -------------
//! - [`support_mp`], [`stieltjes`], and [`psi`] evaluate the closed-form
//!   MP quantities the pipeline needs; the companion-transform diagnostics
//!   stay in [`marchenko_pastur`].
//! - [`action_d_on_f`] integrates a test function against the law defined
//!   by any Stieltjes transform.
//!
//! Invariants & assumptions
//! ------------------------
//! - Aspect ratios are validated upstream (`c` finite and `> 0`).
//! - All failures are reported as [`crate::numerics::NumericsError`].

pub mod inversion;
pub mod marchenko_pastur;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::inversion::action_d_on_f;
pub use self::marchenko_pastur::{psi, stieltjes, support_mp};
