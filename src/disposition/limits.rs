//! Two-sided specification limits.

use serde::{Deserialize, Serialize};

use crate::error::DispositionError;

/// Nominal value and the lower/upper specification limits of a
/// characteristic.
///
/// # Invariants
///
/// - All values are finite
/// - `lower < upper`
///
/// The nominal is carried for reporting and is not required to lie between
/// the limits.
///
/// # Examples
///
/// ```
/// use u_acceptance::disposition::SpecificationLimits;
///
/// let limits = SpecificationLimits::new(100.0, 98.0, 102.0).unwrap();
/// assert_eq!(limits.width(), 4.0);
///
/// assert!(SpecificationLimits::new(100.0, 102.0, 98.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLimits")]
pub struct SpecificationLimits {
    nominal: f64,
    lower: f64,
    upper: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLimits {
    nominal: f64,
    lower: f64,
    upper: f64,
}

impl SpecificationLimits {
    pub fn new(nominal: f64, lower: f64, upper: f64) -> Result<Self, DispositionError> {
        if !nominal.is_finite() {
            return Err(DispositionError::InvalidNominal { nominal });
        }
        if !lower.is_finite() || !upper.is_finite() || upper <= lower {
            return Err(DispositionError::InvalidLimits { lower, upper });
        }
        Ok(Self {
            nominal,
            lower,
            upper,
        })
    }

    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// Lower specification limit (LSL).
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper specification limit (USL).
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Tolerance width `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl TryFrom<RawLimits> for SpecificationLimits {
    type Error = DispositionError;

    fn try_from(raw: RawLimits) -> Result<Self, Self::Error> {
        Self::new(raw.nominal, raw.lower, raw.upper)
    }
}
