//! lrv::decision — rejection regions and p-values for the LRV statistics.
//!
//! Purpose
//! -------
//! Turn a test statistic into a reject / do-not-reject decision or a
//! p-value under one of the three reference laws used by the LRV test:
//! standard normal, χ²(df), and the standard right-skewed Gumbel
//! (location 0, scale 1).
//!
//! Key behaviors
//! -------------
//! - [`is_positive`] compares the statistic with the quantile of the
//!   reference law: left `stat < q(level)`, right `stat > q(1 − level)`,
//!   double `|stat| > q(1 − level/2)` for normal and Gumbel, and
//!   `stat ∉ [q(level/2), q(1 − level/2)]` for χ².
//! - [`p_value`] returns the CDF (left), the survival function (right), or
//!   `min(1, 2·min(CDF, SF))` (double).
//! - [`Distribution`] and [`Alternative`] parse from the string tags
//!   `normal | chi2 | gumbel` and `left | right | double`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `level` lies in `(0, 1)`; anything else is `LRVError::InvalidLevel`.
//! - Degrees of freedom are required (and must be `≥ 1`) for χ² only; they
//!   are ignored for the other laws.
//! - A NaN statistic never rejects and has a NaN p-value.
//!
//! Conventions
//! -----------
//! - Quantiles, CDFs, and survival functions come from
//!   `statrs::distribution`.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the normal critical values at 5%, the χ² two-sided
//!   region, tag parsing, argument validation, and p-value symmetry.

use crate::lrv::errors::{LRVError, LRVTestResult};
use statrs::distribution::{ChiSquared, ContinuousCDF, Gumbel, Normal};
use std::str::FromStr;

/// Reference law of a statistic under the null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Normal,
    ChiSquared,
    Gumbel,
}

impl FromStr for Distribution {
    type Err = LRVError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Distribution::Normal),
            "chi2" => Ok(Distribution::ChiSquared),
            "gumbel" => Ok(Distribution::Gumbel),
            _ => Err(LRVError::InvalidDistribution(s.to_string())),
        }
    }
}

/// Alternative hypothesis, i.e. the side(s) of the rejection region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alternative {
    Left,
    Right,
    Double,
}

impl FromStr for Alternative {
    type Err = LRVError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alternative::Left),
            "right" => Ok(Alternative::Right),
            "double" => Ok(Alternative::Double),
            _ => Err(LRVError::InvalidAlternative(s.to_string())),
        }
    }
}

/// Outcome of [`crate::lrv::result::LRVResult::decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// One decision per frequency (statistic 0).
    PerFrequency(Vec<bool>),
    /// A single global decision (statistics 1 to 4).
    Global(bool),
}

/// Whether `statistic` lies in the rejection region at `level`.
///
/// Parameters
/// ----------
/// - `statistic`: `f64`
///   Observed test statistic.
/// - `distribution`: `Distribution`
///   Reference law under the null.
/// - `alternative`: `Alternative`
///   Side(s) of the rejection region.
/// - `level`: `f64`
///   Significance level in `(0, 1)`.
/// - `df`: `Option<usize>`
///   Degrees of freedom; required for χ² only.
///
/// Errors
/// ------
/// - `LRVError::InvalidLevel` unless `0 < level < 1`.
/// - `LRVError::MissingDegreesOfFreedom` / `InvalidDegreesOfFreedom` for
///   χ² without `df ≥ 1`.
pub fn is_positive(
    statistic: f64, distribution: Distribution, alternative: Alternative, level: f64,
    df: Option<usize>,
) -> LRVTestResult<bool> {
    validate_level(level)?;
    let law = ReferenceLaw::new(distribution, df)?;
    let rejects = match alternative {
        Alternative::Left => statistic < law.quantile(level),
        Alternative::Right => statistic > law.quantile(1.0 - level),
        Alternative::Double => match &law {
            ReferenceLaw::ChiSquared(_) => {
                statistic < law.quantile(level / 2.0) || statistic > law.quantile(1.0 - level / 2.0)
            }
            _ => statistic.abs() > law.quantile(1.0 - level / 2.0),
        },
    };
    Ok(rejects)
}

/// p-value of `statistic` under `distribution`.
///
/// Errors
/// ------
/// - `LRVError::MissingDegreesOfFreedom` / `InvalidDegreesOfFreedom` for
///   χ² without `df ≥ 1`.
pub fn p_value(
    statistic: f64, distribution: Distribution, alternative: Alternative, df: Option<usize>,
) -> LRVTestResult<f64> {
    let law = ReferenceLaw::new(distribution, df)?;
    let p = match alternative {
        Alternative::Left => law.cdf(statistic),
        Alternative::Right => law.sf(statistic),
        Alternative::Double => (2.0 * law.cdf(statistic).min(law.sf(statistic))).min(1.0),
    };
    Ok(p)
}

pub(crate) fn validate_level(level: f64) -> LRVTestResult<()> {
    if !(level > 0.0 && level < 1.0) {
        return Err(LRVError::InvalidLevel(level));
    }
    Ok(())
}

// ---- Helper methods ----

enum ReferenceLaw {
    Normal(Normal),
    ChiSquared(ChiSquared),
    Gumbel(Gumbel),
}

impl ReferenceLaw {
    fn new(distribution: Distribution, df: Option<usize>) -> LRVTestResult<Self> {
        match distribution {
            Distribution::Normal => Ok(ReferenceLaw::Normal(Normal::standard())),
            Distribution::ChiSquared => {
                let df = df.ok_or(LRVError::MissingDegreesOfFreedom)?;
                if df == 0 {
                    return Err(LRVError::InvalidDegreesOfFreedom(df));
                }
                ChiSquared::new(df as f64)
                    .map(ReferenceLaw::ChiSquared)
                    .map_err(|_| LRVError::InvalidDegreesOfFreedom(df))
            }
            Distribution::Gumbel => Gumbel::new(0.0, 1.0)
                .map(ReferenceLaw::Gumbel)
                .map_err(|_| LRVError::InvalidDistribution("gumbel".to_string())),
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        match self {
            ReferenceLaw::Normal(law) => law.cdf(x),
            ReferenceLaw::ChiSquared(law) => law.cdf(x),
            ReferenceLaw::Gumbel(law) => law.cdf(x),
        }
    }

    fn sf(&self, x: f64) -> f64 {
        match self {
            ReferenceLaw::Normal(law) => law.sf(x),
            ReferenceLaw::ChiSquared(law) => law.sf(x),
            ReferenceLaw::Gumbel(law) => law.sf(x),
        }
    }

    fn quantile(&self, p: f64) -> f64 {
        match self {
            ReferenceLaw::Normal(law) => law.inverse_cdf(p),
            ReferenceLaw::ChiSquared(law) => law.inverse_cdf(p),
            ReferenceLaw::Gumbel(law) => law.inverse_cdf(p),
        }
    }
}
