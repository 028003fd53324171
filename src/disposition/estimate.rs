//! Estimated percent nonconforming from a variables sample.
//!
//! Treats the sample mean and sample standard deviation as the parameters of
//! a fitted normal distribution and estimates the tail mass outside each
//! specification limit analytically:
//!
//! ```text
//! Z_U = (U - x̄) / s        p_U = 100 · (1 - Φ(Z_U))
//! Z_L = (x̄ - L) / s        p_L = 100 · (1 - Φ(Z_L))
//! p   = p_U + p_L
//! ```
//!
//! where `s` is the Bessel-corrected (n - 1) standard deviation. The lot is
//! accepted when `p <= k`.
//!
//! Both distances are oriented so that a larger value means the mean lies
//! further inside the limit; a negative distance means the mean has crossed
//! that limit. With small samples `p` can move non-monotonically as
//! individual readings change; the estimate is reported as computed.
//!
//! # References
//!
//! - MIL-STD-414 (1957), *Sampling Procedures and Tables for Inspection by
//!   Variables for Percent Defective*, Section B, Part I (standard deviation
//!   method, double specification limit, Form 2).
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Section 15.5.

use serde::Serialize;
use u_numflow::{special, stats};

use super::limits::SpecificationLimits;
use super::verdict::Verdict;
use crate::error::DispositionError;

/// Statistics and decision for one evaluated sample.
///
/// All values are full precision; rounding for display is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispositionResult {
    /// Number of measurements evaluated.
    pub sample_size: usize,
    /// Sample mean x̄.
    pub mean: f64,
    /// Sample standard deviation s (n - 1 divisor).
    pub std_dev: f64,
    /// (x̄ - L) / s.
    pub z_lower: f64,
    /// (U - x̄) / s.
    pub z_upper: f64,
    /// Estimated percent below the lower limit.
    pub p_lower: f64,
    /// Estimated percent above the upper limit.
    pub p_upper: f64,
    /// `p_lower + p_upper`.
    pub p_total: f64,
    /// Acceptability constant compared against, if the plan defines one.
    pub k: Option<f64>,
    pub verdict: Verdict,
}

impl DispositionResult {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accept
    }

    pub fn is_rejected(&self) -> bool {
        self.verdict == Verdict::Reject
    }

    pub fn is_indeterminate(&self) -> bool {
        self.verdict == Verdict::Indeterminate
    }
}

/// Standard normal CDF, Φ(z) = ½·(1 + erf(z/√2)).
pub fn normal_cdf(z: f64) -> f64 {
    special::standard_normal_cdf(z)
}

/// Evaluates a sample against two-sided limits and an acceptability constant.
///
/// `k = None` produces [`Verdict::Indeterminate`]; the statistics are still
/// computed and reported.
///
/// # Errors
///
/// - [`DispositionError::InsufficientData`] with fewer than 2 values
/// - [`DispositionError::NonFiniteValue`] if any value is NaN or infinite
/// - [`DispositionError::InvalidConstant`] if `k` is negative or not finite
/// - [`DispositionError::ZeroVariance`] if all values are identical
///
/// # Examples
///
/// ```
/// use u_acceptance::disposition::{evaluate, SpecificationLimits, Verdict};
///
/// let limits = SpecificationLimits::new(100.0, 98.0, 102.0).unwrap();
/// let values = [100.5, 99.8, 101.2, 100.0, 99.5];
///
/// let result = evaluate(&values, &limits, Some(3.05)).unwrap();
/// assert!((result.mean - 100.2).abs() < 1e-12);
/// assert!(result.p_total < 3.05);
/// assert_eq!(result.verdict, Verdict::Accept);
///
/// assert!(evaluate(&[100.0, 100.0, 100.0], &limits, Some(3.05)).is_err());
/// ```
pub fn evaluate(
    values: &[f64],
    limits: &SpecificationLimits,
    k: Option<f64>,
) -> Result<DispositionResult, DispositionError> {
    let n = values.len();
    if n < 2 {
        return Err(DispositionError::InsufficientData { len: n });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(DispositionError::NonFiniteValue { index });
    }
    if let Some(k) = k {
        if !k.is_finite() || k < 0.0 {
            return Err(DispositionError::InvalidConstant { k });
        }
    }
    // Bit-identical readings: s is exactly zero.
    if values.iter().all(|&v| v == values[0]) {
        return Err(DispositionError::ZeroVariance);
    }

    let mean = stats::mean(values).ok_or(DispositionError::InsufficientData { len: n })?;
    let std_dev = stats::std_dev(values).ok_or(DispositionError::InsufficientData { len: n })?;
    if std_dev <= 0.0 {
        return Err(DispositionError::ZeroVariance);
    }

    let z_upper = (limits.upper() - mean) / std_dev;
    let z_lower = (mean - limits.lower()) / std_dev;

    let p_upper = (1.0 - normal_cdf(z_upper)) * 100.0;
    let p_lower = (1.0 - normal_cdf(z_lower)) * 100.0;
    let p_total = p_upper + p_lower;

    let verdict = Verdict::decide(p_total, k);

    tracing::debug!(
        n,
        mean,
        std_dev,
        z_lower,
        z_upper,
        p_total,
        k = ?k,
        %verdict,
        "evaluated sample"
    );

    Ok(DispositionResult {
        sample_size: n,
        mean,
        std_dev,
        z_lower,
        z_upper,
        p_lower,
        p_upper,
        p_total,
        k,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> SpecificationLimits {
        SpecificationLimits::new(100.0, 98.0, 102.0).unwrap()
    }

    // -----------------------------------------------------------------------
    // Normal CDF
    // -----------------------------------------------------------------------

    #[test]
    fn normal_cdf_reference_values() {
        let cases = [
            (0.0, 0.5),
            (1.0, 0.841_344_746_068_542_9),
            (-1.0, 0.158_655_253_931_457_05),
            (1.96, 0.975_002_104_851_779_5),
            (-3.0, 0.001_349_898_031_630_094_6),
            (3.0, 0.998_650_101_968_369_9),
        ];
        for (z, expected) in cases {
            let got = normal_cdf(z);
            assert!(
                (got - expected).abs() < 1e-7,
                "Phi({z}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn normal_cdf_tails() {
        assert!(normal_cdf(-10.0) < 1e-7);
        assert!(normal_cdf(10.0) > 1.0 - 1e-7);
    }

    // -----------------------------------------------------------------------
    // Worked example
    // -----------------------------------------------------------------------

    #[test]
    fn worked_example_accepts() {
        let values = [100.5, 99.8, 101.2, 100.0, 99.5];
        let r = evaluate(&values, &limits(), Some(3.05)).unwrap();

        // Squared deviations sum to 1.78; s = sqrt(1.78 / 4).
        let s = 0.445_f64.sqrt();
        assert_eq!(r.sample_size, 5);
        assert!((r.mean - 100.2).abs() < 1e-12);
        assert!((r.std_dev - s).abs() < 1e-12, "std_dev = {}", r.std_dev);
        assert!((r.z_upper - 1.8 / s).abs() < 1e-9);
        assert!((r.z_lower - 2.2 / s).abs() < 1e-9);
        assert!((r.z_upper - 2.698).abs() < 1e-3);
        assert!((r.z_lower - 3.298).abs() < 1e-3);

        assert!(r.p_upper > 0.3 && r.p_upper < 0.4, "p_upper = {}", r.p_upper);
        assert!(r.p_lower > 0.04 && r.p_lower < 0.06, "p_lower = {}", r.p_lower);
        assert!((r.p_total - (r.p_upper + r.p_lower)).abs() < 1e-15);
        assert_eq!(r.k, Some(3.05));
        assert_eq!(r.verdict, Verdict::Accept);
        assert!(r.is_accepted());
    }

    #[test]
    fn uses_bessel_corrected_standard_deviation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let limits = SpecificationLimits::new(2.5, 0.0, 5.0).unwrap();
        let r = evaluate(&values, &limits, None).unwrap();

        let sample = (5.0_f64 / 3.0).sqrt();
        let population = 1.25_f64.sqrt();
        assert!((r.std_dev - sample).abs() < 1e-12);
        assert!((r.std_dev - population).abs() > 0.1);
    }

    #[test]
    fn centered_sample_has_equal_tails() {
        let r = evaluate(&[99.0, 101.0], &limits(), Some(3.05)).unwrap();
        assert!((r.p_upper - r.p_lower).abs() < 1e-12);
        // z = 2 / sqrt(2); each tail is about 7.865 %.
        assert!((r.p_upper - 7.865).abs() < 1e-2, "p_upper = {}", r.p_upper);
        assert_eq!(r.verdict, Verdict::Reject);
        assert!(r.is_rejected());
    }

    #[test]
    fn mean_beyond_upper_limit_gives_negative_distance() {
        let r = evaluate(&[103.0, 104.0, 105.0], &limits(), Some(40.0)).unwrap();
        assert!(r.z_upper < 0.0);
        assert!((r.z_upper + 2.0).abs() < 1e-12);
        assert!((r.z_lower - 6.0).abs() < 1e-12);
        assert!(r.p_upper > 97.0 && r.p_upper < 98.0);
        assert_eq!(r.verdict, Verdict::Reject);
    }

    #[test]
    fn tie_with_k_accepts() {
        let values = [99.0, 101.0];
        let p = evaluate(&values, &limits(), None).unwrap().p_total;
        let r = evaluate(&values, &limits(), Some(p)).unwrap();
        assert_eq!(r.verdict, Verdict::Accept);
    }

    #[test]
    fn missing_k_is_indeterminate() {
        let values = [100.5, 99.8, 101.2];
        let r = evaluate(&values, &limits(), None).unwrap();
        assert_eq!(r.verdict, Verdict::Indeterminate);
        assert!(r.is_indeterminate());
        assert_eq!(r.k, None);
    }

    #[test]
    fn zero_k_rejects_any_positive_estimate() {
        let r = evaluate(&[100.5, 99.8, 101.2], &limits(), Some(0.0)).unwrap();
        assert_eq!(r.verdict, Verdict::Reject);
    }

    // -----------------------------------------------------------------------
    // Errors
    // -----------------------------------------------------------------------

    #[test]
    fn identical_values_are_zero_variance() {
        assert_eq!(
            evaluate(&[100.0, 100.0, 100.0], &limits(), Some(3.05)),
            Err(DispositionError::ZeroVariance)
        );
        assert_eq!(
            evaluate(&[0.1; 15], &limits(), Some(3.05)),
            Err(DispositionError::ZeroVariance)
        );
    }

    #[test]
    fn fewer_than_two_values_is_insufficient() {
        assert_eq!(
            evaluate(&[], &limits(), Some(1.0)),
            Err(DispositionError::InsufficientData { len: 0 })
        );
        assert_eq!(
            evaluate(&[100.0], &limits(), Some(1.0)),
            Err(DispositionError::InsufficientData { len: 1 })
        );
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert_eq!(
            evaluate(&[100.0, f64::NAN, 101.0], &limits(), Some(1.0)),
            Err(DispositionError::NonFiniteValue { index: 1 })
        );
        assert_eq!(
            evaluate(&[100.0, 101.0, f64::INFINITY], &limits(), Some(1.0)),
            Err(DispositionError::NonFiniteValue { index: 2 })
        );
    }

    #[test]
    fn invalid_constant_is_rejected() {
        let values = [100.5, 99.8, 101.2, 100.0, 99.5];
        for k in [f64::NAN, f64::INFINITY, -1.0] {
            assert!(
                matches!(
                    evaluate(&values, &limits(), Some(k)),
                    Err(DispositionError::InvalidConstant { .. })
                ),
                "k = {k}"
            );
        }
        assert_eq!(
            evaluate(&values, &limits(), Some(-1.0)),
            Err(DispositionError::InvalidConstant { k: -1.0 })
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let values = [100.5, 99.8, 101.2, 100.0, 99.5];
        let a = evaluate(&values, &limits(), Some(3.05)).unwrap();
        let b = evaluate(&values, &limits(), Some(3.05)).unwrap();
        assert_eq!(a, b);
    }
}
