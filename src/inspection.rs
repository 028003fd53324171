//! End-to-end lot inspection: resolve the plan, then evaluate the sample.
//!
//! [`InspectionRequest`] deserializes from TOML or JSON, so an outer layer can
//! submit an analysis as a document:
//!
//! ```toml
//! level = "II"
//! lot_size = 1000
//! aql = "1"
//! limits = { nominal = 100.0, lower = 98.0, upper = 102.0 }
//! values = [100.5, 99.8, 101.2]   # exactly n measurements
//! ```

use serde::{Deserialize, Serialize};

use crate::disposition::{DispositionResult, SpecificationLimits};
use crate::error::Result;
use crate::plan::{Aql, InspectionLevel, PlanTables, SamplingPlan};

/// Inputs for inspecting one lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectionRequest {
    pub level: InspectionLevel,
    pub lot_size: u64,
    pub aql: Aql,
    pub limits: SpecificationLimits,
    /// Measured values; must number exactly the plan's sample size.
    pub values: Vec<f64>,
}

/// Resolved plan and the disposition reached with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionReport {
    pub lot_size: u64,
    pub level: InspectionLevel,
    pub plan: SamplingPlan,
    pub disposition: DispositionResult,
}

/// Resolves the plan for the request's lot and evaluates its sample.
///
/// # Errors
///
/// Plan errors when the lot size has no range; disposition errors when the
/// sample does not have exactly `n` values, has fewer than two, contains a
/// non-finite value, or has zero spread.
///
/// # Examples
///
/// ```
/// use u_acceptance::disposition::{SpecificationLimits, Verdict};
/// use u_acceptance::inspection::{inspect, InspectionRequest};
/// use u_acceptance::plan::{Aql, InspectionLevel, PlanTables};
///
/// let request = InspectionRequest {
///     level: InspectionLevel::II,
///     lot_size: 40,
///     aql: Aql::Aql2_5,
///     limits: SpecificationLimits::new(100.0, 98.0, 102.0).unwrap(),
///     values: vec![100.5, 99.8, 101.2],
/// };
///
/// let report = inspect(PlanTables::standard(), &request).unwrap();
/// assert_eq!(report.plan.sample_size, 3);
/// assert_eq!(report.disposition.verdict, Verdict::Accept);
/// ```
pub fn inspect(tables: &PlanTables, request: &InspectionRequest) -> Result<InspectionReport> {
    let plan = tables.resolve(request.level, request.lot_size, request.aql)?;
    let disposition = plan.evaluate(&request.values, &request.limits)?;

    tracing::debug!(
        lot_size = request.lot_size,
        level = %request.level,
        letter = %plan.letter,
        verdict = %disposition.verdict,
        "lot inspected"
    );

    Ok(InspectionReport {
        lot_size: request.lot_size,
        level: request.level,
        plan,
        disposition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disposition::Verdict;
    use crate::error::{DispositionError, Error, PlanError};

    fn request(lot_size: u64, aql: Aql, values: Vec<f64>) -> InspectionRequest {
        InspectionRequest {
            level: InspectionLevel::II,
            lot_size,
            aql,
            limits: SpecificationLimits::new(100.0, 98.0, 102.0).unwrap(),
            values,
        }
    }

    fn fifteen_readings() -> Vec<f64> {
        vec![
            100.5, 99.8, 101.2, 100.0, 99.5, 100.3, 99.9, 100.1, 100.4, 99.7, 100.2, 100.0, 99.6,
            100.6, 100.2,
        ]
    }

    #[test]
    fn lot_of_1000_uses_plan_g() {
        let report = inspect(PlanTables::standard(), &request(1000, Aql::Aql1, fifteen_readings()))
            .unwrap();
        assert_eq!(report.plan.letter.to_string(), "G");
        assert_eq!(report.plan.sample_size, 15);
        assert_eq!(report.plan.k, Some(3.05));
        assert_eq!(report.disposition.sample_size, 15);
        assert_eq!(report.disposition.verdict, Verdict::Accept);
    }

    #[test]
    fn undefined_k_reports_indeterminate() {
        // Lot of 40 at level II is letter B, which has no k at AQL 1.
        let report = inspect(
            PlanTables::standard(),
            &request(40, Aql::Aql1, vec![100.5, 99.8, 101.2]),
        )
        .unwrap();
        assert_eq!(report.plan.k, None);
        assert_eq!(report.disposition.verdict, Verdict::Indeterminate);
    }

    #[test]
    fn wrong_sample_count_fails() {
        let err = inspect(PlanTables::standard(), &request(1000, Aql::Aql1, vec![100.0, 101.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Disposition(DispositionError::SampleSizeMismatch {
                expected: 15,
                actual: 2
            })
        ));
    }

    #[test]
    fn lot_below_minimum_fails() {
        let err = inspect(PlanTables::standard(), &request(2, Aql::Aql1, vec![]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Plan(PlanError::LotSizeNotFound { lot_size: 2 })
        ));
    }

    #[test]
    fn identical_readings_fail_without_verdict() {
        let err = inspect(PlanTables::standard(), &request(40, Aql::Aql2_5, vec![100.0; 3]))
            .unwrap_err();
        assert!(matches!(err, Error::Disposition(DispositionError::ZeroVariance)));
    }

    #[test]
    fn request_from_toml() {
        let source = r#"
            level = "II"
            lot_size = 1000
            aql = "1"
            limits = { nominal = 100.0, lower = 98.0, upper = 102.0 }
            values = [100.5, 99.8, 101.2, 100.0, 99.5, 100.3, 99.9, 100.1,
                      100.4, 99.7, 100.2, 100.0, 99.6, 100.6, 100.2]
        "#;
        let parsed: InspectionRequest = toml::from_str(source).unwrap();
        assert_eq!(parsed, request(1000, Aql::Aql1, fifteen_readings()));
    }

    #[test]
    fn request_rejects_invalid_limits() {
        let source = r#"{
            "level": "II", "lot_size": 1000, "aql": "1",
            "limits": {"nominal": 100.0, "lower": 102.0, "upper": 98.0},
            "values": [100.0, 101.0]
        }"#;
        assert!(serde_json::from_str::<InspectionRequest>(source).is_err());
    }

    #[test]
    fn report_serializes() {
        let report = inspect(
            PlanTables::standard(),
            &request(40, Aql::Aql1, vec![100.5, 99.8, 101.2]),
        )
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["plan"]["letter"], "B");
        assert_eq!(json["plan"]["aql"], "1");
        assert!(json["plan"]["k"].is_null());
        assert_eq!(json["disposition"]["verdict"], "indeterminate");
    }
}
