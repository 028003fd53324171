//! # u-acceptance
//!
//! Acceptance sampling by variables: resolves a MIL-STD-414 normal-inspection
//! sampling plan for a lot and decides whether the lot is accepted from a
//! measured sample.
//!
//! ## Modules
//!
//! - [`plan`] — Plan resolution: (inspection level, lot size) → code letter,
//!   (code letter, AQL) → sample size `n` and acceptability constant `k`
//! - [`disposition`] — Sample statistics, estimated percent nonconforming,
//!   and the accept / reject / indeterminate verdict
//! - [`inspection`] — Both steps for one lot, from a serializable request
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use u_acceptance::disposition::{SpecificationLimits, Verdict};
//! use u_acceptance::plan::{resolve, Aql, InspectionLevel};
//!
//! let plan = resolve(InspectionLevel::II, 1000, Aql::Aql1).unwrap();
//! assert_eq!(plan.letter.to_string(), "G");
//! assert_eq!(plan.sample_size, 15);
//! assert_eq!(plan.k, Some(3.05));
//!
//! let limits = SpecificationLimits::new(100.0, 98.0, 102.0).unwrap();
//! let values = [
//!     100.5, 99.8, 101.2, 100.0, 99.5, 100.3, 99.9, 100.1,
//!     100.4, 99.7, 100.2, 100.0, 99.6, 100.6, 100.2,
//! ];
//! let result = plan.evaluate(&values, &limits).unwrap();
//! assert_eq!(result.verdict, Verdict::Accept);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Tables are data**: lot ranges and plan constants load from TOML and
//!   are validated once; the published tables ship embedded
//! - **No sentinels**: an undefined `k` is `None` and yields an
//!   indeterminate verdict, never a zero tolerance
//! - **Pure**: every operation is a deterministic function of its inputs

pub mod disposition;
pub mod error;
pub mod inspection;
pub mod plan;

pub use error::{Error, Result};
