//! Plan resolution: (level, lot size) → code letter → (n, k).
//!
//! Resolution is a pure lookup over an immutable [`PlanTables`]. The free
//! functions use [`PlanTables::standard`]; the methods work on any loaded
//! table revision.

use serde::{Deserialize, Serialize};

use super::level::{Aql, CodeLetter, InspectionLevel};
use super::tables::PlanTables;
use crate::disposition::{self, DispositionResult, SpecificationLimits};
use crate::error::{DispositionError, PlanError};

/// A resolved single-sampling plan under normal inspection.
///
/// `k` is `None` when the table defines no acceptability constant for the
/// requested AQL. That is a valid plan: evaluating a sample against it yields
/// [`Verdict::Indeterminate`](crate::disposition::Verdict::Indeterminate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingPlan {
    /// Sample size code letter.
    pub letter: CodeLetter,
    /// AQL column the plan was resolved for.
    pub aql: Aql,
    /// Number of units to measure.
    pub sample_size: usize,
    /// Maximum allowable estimated percent nonconforming.
    pub k: Option<f64>,
}

impl SamplingPlan {
    /// Returns `k`, or [`PlanError::UndefinedConstant`] when the table has none.
    pub fn acceptability_constant(&self) -> Result<f64, PlanError> {
        self.k.ok_or(PlanError::UndefinedConstant {
            letter: self.letter,
            aql: self.aql,
        })
    }

    /// Evaluates a sample of exactly `sample_size` measurements against this
    /// plan's acceptability constant.
    ///
    /// # Errors
    ///
    /// [`DispositionError::SampleSizeMismatch`] when the number of values
    /// differs from the plan's sample size, otherwise any error of
    /// [`disposition::evaluate`].
    pub fn evaluate(
        &self,
        values: &[f64],
        limits: &SpecificationLimits,
    ) -> Result<DispositionResult, DispositionError> {
        if values.len() != self.sample_size {
            return Err(DispositionError::SampleSizeMismatch {
                expected: self.sample_size,
                actual: values.len(),
            });
        }
        disposition::evaluate(values, limits, self.k)
    }
}

impl PlanTables {
    /// Finds the code letter for a lot size at the given inspection level.
    ///
    /// # Errors
    ///
    /// [`PlanError::LotSizeNotFound`] when no lot range contains `lot_size`,
    /// which for validated tables means `lot_size < MIN_LOT_SIZE`.
    pub fn resolve_letter(
        &self,
        level: InspectionLevel,
        lot_size: u64,
    ) -> Result<CodeLetter, PlanError> {
        let range = self
            .lot_ranges()
            .iter()
            .find(|range| range.contains(lot_size))
            .ok_or(PlanError::LotSizeNotFound { lot_size })?;
        let letter = range.letter(level);
        tracing::debug!(%level, lot_size, %letter, "resolved code letter");
        Ok(letter)
    }

    /// Looks up the sample size and acceptability constant for a code letter
    /// and AQL column.
    ///
    /// # Errors
    ///
    /// [`PlanError::LetterNotFound`] when the letter has no plan row. An
    /// undefined `k` is not an error; it is reported as `k: None`.
    pub fn resolve_plan(&self, letter: CodeLetter, aql: Aql) -> Result<SamplingPlan, PlanError> {
        let row = self
            .row(letter)
            .ok_or(PlanError::LetterNotFound { letter })?;
        let plan = SamplingPlan {
            letter,
            aql,
            sample_size: row.sample_size(),
            k: row.constant(aql),
        };
        if plan.k.is_none() {
            tracing::debug!(%letter, %aql, "no acceptability constant under normal inspection");
        }
        Ok(plan)
    }

    /// Resolves the full plan for a lot: letter first, then `n` and `k`.
    pub fn resolve(
        &self,
        level: InspectionLevel,
        lot_size: u64,
        aql: Aql,
    ) -> Result<SamplingPlan, PlanError> {
        let letter = self.resolve_letter(level, lot_size)?;
        self.resolve_plan(letter, aql)
    }
}

/// [`PlanTables::resolve_letter`] over the standard tables.
///
/// # Examples
///
/// ```
/// use u_acceptance::plan::{resolve_letter, InspectionLevel};
///
/// let letter = resolve_letter(InspectionLevel::II, 1000).unwrap();
/// assert_eq!(letter.to_string(), "G");
///
/// assert!(resolve_letter(InspectionLevel::II, 2).is_err());
/// ```
pub fn resolve_letter(level: InspectionLevel, lot_size: u64) -> Result<CodeLetter, PlanError> {
    PlanTables::standard().resolve_letter(level, lot_size)
}

/// [`PlanTables::resolve_plan`] over the standard tables.
///
/// # Examples
///
/// ```
/// use u_acceptance::plan::{resolve_plan, Aql, CodeLetter};
///
/// let plan = resolve_plan("G".parse().unwrap(), Aql::Aql1).unwrap();
/// assert_eq!(plan.sample_size, 15);
/// assert_eq!(plan.k, Some(3.05));
///
/// // Letter B has no constant at AQL 1: a valid plan without k.
/// let plan = resolve_plan("B".parse().unwrap(), Aql::Aql1).unwrap();
/// assert_eq!(plan.k, None);
/// ```
pub fn resolve_plan(letter: CodeLetter, aql: Aql) -> Result<SamplingPlan, PlanError> {
    PlanTables::standard().resolve_plan(letter, aql)
}

/// [`PlanTables::resolve`] over the standard tables.
pub fn resolve(level: InspectionLevel, lot_size: u64, aql: Aql) -> Result<SamplingPlan, PlanError> {
    PlanTables::standard().resolve(level, lot_size, aql)
}
