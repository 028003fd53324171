//! Lot disposition by the variables (standard deviation) method.
//!
//! Converts a measured sample into an estimated percent nonconforming and
//! compares it against the plan's acceptability constant `k`.
//!
//! # Components
//!
//! - [`SpecificationLimits`] — nominal, lower and upper limits
//! - [`evaluate`] — sample statistics, standardized distances, estimate, verdict
//! - [`Verdict`] — accept, reject, or indeterminate (no `k`)
//!
//! # References
//!
//! - MIL-STD-414 (1957), Section B.
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod estimate;
mod limits;
mod verdict;

pub use estimate::{evaluate, normal_cdf, DispositionResult};
pub use limits::SpecificationLimits;
pub use verdict::Verdict;
