//! Error types for plan resolution, table loading, and lot disposition.
//!
//! Every failure is returned as a value. Nothing here is transient, so no
//! error is ever worth retrying: each one describes an input or data problem.

use crate::plan::{Aql, CodeLetter, InspectionLevel};

/// Failure to resolve a sampling plan.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The lot size falls outside every lot range (below the first range).
    #[error("no lot range contains lot size {lot_size}")]
    LotSizeNotFound { lot_size: u64 },

    /// The code letter has no row in the plan table.
    #[error("code letter {letter} is not defined in the plan table")]
    LetterNotFound { letter: CodeLetter },

    /// The plan exists but no acceptability constant is defined for the AQL
    /// under normal inspection.
    #[error("no acceptability constant defined for code letter {letter} at AQL {aql}")]
    UndefinedConstant { letter: CodeLetter, aql: Aql },

    #[error("unknown inspection level {0:?} (expected I, II, III, IV or V)")]
    UnknownLevel(String),

    #[error("unknown AQL {0:?}")]
    UnknownAql(String),

    #[error("invalid code letter {0:?} (expected a single uppercase letter)")]
    InvalidLetter(String),
}

/// Failure to load or validate a plan table set.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read plan tables: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse plan tables: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("plan tables define no lot ranges")]
    NoLotRanges,

    /// The first lot range must start at the minimum meaningful lot size.
    #[error("first lot range starts at {found}, expected {expected}")]
    FirstRangeStart { expected: u64, found: u64 },

    #[error("lot range starting at {min} has no code letter for inspection level {level}")]
    MissingLevel { min: u64, level: InspectionLevel },

    #[error("lot range {min}..={max} is empty")]
    EmptyRange { min: u64, max: u64 },

    /// Consecutive ranges leave lot sizes uncovered.
    #[error("lot sizes {from}..={to} are not covered by any lot range")]
    Gap { from: u64, to: u64 },

    /// Consecutive ranges claim the same lot size.
    #[error("lot range starting at {min} overlaps the previous range ending at {previous_max}")]
    Overlap { min: u64, previous_max: u64 },

    #[error("lot range starting at {min} is unbounded but is not the last range")]
    UnboundedNotLast { min: u64 },

    #[error("last lot range ends at {max}; it must be unbounded")]
    BoundedLastRange { max: u64 },

    #[error(transparent)]
    Plan(#[from] PlanError),

    /// A lot range maps to a code letter with no plan row.
    #[error("lot range starting at {min} uses code letter {letter}, which has no plan row")]
    MissingPlanRow { min: u64, letter: CodeLetter },

    #[error("code letter {letter} has more than one plan row")]
    DuplicatePlanRow { letter: CodeLetter },

    #[error("plan row {letter} has a sample size of zero")]
    ZeroSampleSize { letter: CodeLetter },

    /// Sample sizes must grow with the code letter.
    #[error("sample size of {letter} ({sample_size}) does not exceed that of {previous} ({previous_size})")]
    SampleSizeNotIncreasing {
        letter: CodeLetter,
        sample_size: usize,
        previous: CodeLetter,
        previous_size: usize,
    },

    #[error("plan row {letter} has invalid acceptability constant {k} at AQL {aql}")]
    InvalidConstant { letter: CodeLetter, aql: Aql, k: f64 },
}

/// Failure to reach a disposition for a sample.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispositionError {
    /// Sample standard deviation needs at least two measurements.
    #[error("at least 2 measurements are required, got {len}")]
    InsufficientData { len: usize },

    /// Every measurement is identical; standardized distances are undefined.
    #[error("sample standard deviation is zero (all measurements identical)")]
    ZeroVariance,

    #[error("measurement at index {index} is not finite")]
    NonFiniteValue { index: usize },

    #[error("invalid specification limits: lower {lower}, upper {upper}")]
    InvalidLimits { lower: f64, upper: f64 },

    /// `k` must be a finite, non-negative percentage.
    #[error("invalid acceptability constant {k}")]
    InvalidConstant { k: f64 },

    #[error("invalid nominal value {nominal}")]
    InvalidNominal { nominal: f64 },

    /// The plan calls for exactly `expected` measurements.
    #[error("sampling plan requires {expected} measurements, got {actual}")]
    SampleSizeMismatch { expected: usize, actual: usize },
}

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Disposition(#[from] DispositionError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
