//! Sampling plan resolution.
//!
//! Maps an inspection level and lot size to a sample size code letter, then
//! the code letter and AQL to a sample size `n` and acceptability constant
//! `k`.
//!
//! # Tables
//!
//! - [`PlanTables`] — validated lot-range and plan tables, loadable from TOML
//! - [`PlanTables::standard`] — MIL-STD-414 normal inspection, embedded
//!
//! # Resolution
//!
//! - [`resolve_letter`] — (level, lot size) → code letter
//! - [`resolve_plan`] — (code letter, AQL) → [`SamplingPlan`]
//! - [`resolve`] — both steps
//!
//! # References
//!
//! - MIL-STD-414 (1957), Section A, Table A-2 (sample size code letters) and
//!   Section B, Table B-3 (normal inspection, double specification limit).

mod level;
mod resolver;
mod tables;

pub use level::{Aql, CodeLetter, InspectionLevel};
pub use resolver::{resolve, resolve_letter, resolve_plan, SamplingPlan};
pub use tables::{LotRange, PlanRow, PlanTables, MIN_LOT_SIZE};
