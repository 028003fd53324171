//! Keys of the sampling tables: inspection level, AQL, and code letter.
//!
//! Each type parses from and displays as the exact string printed in the
//! published tables ("II", "0.65", "G"), and (de)serializes as that string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Inspection level, in order of increasing stringency.
///
/// Higher levels map a given lot size to a later code letter, and therefore
/// to a larger sample.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InspectionLevel {
    I,
    II,
    III,
    IV,
    V,
}

impl InspectionLevel {
    /// All levels in ascending stringency.
    pub const ALL: [InspectionLevel; 5] = [Self::I, Self::II, Self::III, Self::IV, Self::V];

    /// Zero-based position in [`InspectionLevel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
        }
    }
}

impl fmt::Display for InspectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InspectionLevel {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s.trim())
            .ok_or_else(|| PlanError::UnknownLevel(s.to_string()))
    }
}

/// Acceptable quality level: one column of the plan table.
///
/// The fourteen values are percentages of nonconforming product.
///
/// # Examples
///
/// ```
/// use u_acceptance::plan::Aql;
///
/// let aql: Aql = "0.65".parse().unwrap();
/// assert_eq!(aql, Aql::Aql0_65);
/// assert_eq!(aql.percent(), 0.65);
/// assert!("0.5".parse::<Aql>().is_err());
/// ```
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Aql {
    Aql0_04,
    Aql0_065,
    Aql0_1,
    Aql0_15,
    Aql0_25,
    Aql0_4,
    Aql0_65,
    Aql1,
    Aql1_5,
    Aql2_5,
    Aql4,
    Aql6_5,
    Aql10,
    Aql15,
}

impl Aql {
    /// All AQL columns, tightest first.
    pub const ALL: [Aql; 14] = [
        Self::Aql0_04,
        Self::Aql0_065,
        Self::Aql0_1,
        Self::Aql0_15,
        Self::Aql0_25,
        Self::Aql0_4,
        Self::Aql0_65,
        Self::Aql1,
        Self::Aql1_5,
        Self::Aql2_5,
        Self::Aql4,
        Self::Aql6_5,
        Self::Aql10,
        Self::Aql15,
    ];

    /// Zero-based column position in [`Aql::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column identifier as printed in the table header.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aql0_04 => "0.04",
            Self::Aql0_065 => "0.065",
            Self::Aql0_1 => "0.1",
            Self::Aql0_15 => "0.15",
            Self::Aql0_25 => "0.25",
            Self::Aql0_4 => "0.4",
            Self::Aql0_65 => "0.65",
            Self::Aql1 => "1",
            Self::Aql1_5 => "1.5",
            Self::Aql2_5 => "2.5",
            Self::Aql4 => "4",
            Self::Aql6_5 => "6.5",
            Self::Aql10 => "10",
            Self::Aql15 => "15",
        }
    }

    /// AQL as a percentage of nonconforming product.
    pub fn percent(self) -> f64 {
        match self {
            Self::Aql0_04 => 0.04,
            Self::Aql0_065 => 0.065,
            Self::Aql0_1 => 0.1,
            Self::Aql0_15 => 0.15,
            Self::Aql0_25 => 0.25,
            Self::Aql0_4 => 0.4,
            Self::Aql0_65 => 0.65,
            Self::Aql1 => 1.0,
            Self::Aql1_5 => 1.5,
            Self::Aql2_5 => 2.5,
            Self::Aql4 => 4.0,
            Self::Aql6_5 => 6.5,
            Self::Aql10 => 10.0,
            Self::Aql15 => 15.0,
        }
    }
}

impl fmt::Display for Aql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aql {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|aql| aql.as_str() == s.trim())
            .ok_or_else(|| PlanError::UnknownAql(s.to_string()))
    }
}

impl TryFrom<String> for Aql {
    type Error = PlanError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Aql> for String {
    fn from(aql: Aql) -> Self {
        aql.as_str().to_string()
    }
}

/// Sample size code letter (B through Q in the published tables).
///
/// Guaranteed to hold a single uppercase ASCII letter. Letters order
/// alphabetically, which is also the order of increasing sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodeLetter(char);

impl CodeLetter {
    pub fn new(c: char) -> Result<Self, PlanError> {
        if c.is_ascii_uppercase() {
            Ok(Self(c))
        } else {
            Err(PlanError::InvalidLetter(c.to_string()))
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for CodeLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CodeLetter {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c).map_err(|_| PlanError::InvalidLetter(s.to_string())),
            _ => Err(PlanError::InvalidLetter(s.to_string())),
        }
    }
}

impl TryFrom<String> for CodeLetter {
    type Error = PlanError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CodeLetter> for String {
    fn from(letter: CodeLetter) -> Self {
        letter.0.to_string()
    }
}
