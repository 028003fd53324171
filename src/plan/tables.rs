//! Sampling tables: lot-size ranges and the per-letter plan rows.
//!
//! Tables are data, loaded from TOML and validated once. The published
//! MIL-STD-414 normal-inspection tables are embedded in the crate and exposed
//! through [`PlanTables::standard`], a process-wide registry that is built on
//! first use and never mutated afterwards.
//!
//! # Table format
//!
//! ```toml
//! [[lot_range]]
//! min = 3
//! max = 8            # omitted on the last, unbounded range
//! letters = { I = "B", II = "B", III = "B", IV = "B", V = "C" }
//!
//! [plan.B]
//! sample_size = 3
//! k = { "2.5" = 7.59, "4" = 18.86 }
//! ```
//!
//! An AQL absent from a row's `k` table has no acceptability constant under
//! normal inspection; it is never read as zero.
//!
//! # Invariants
//!
//! A loaded [`PlanTables`] guarantees:
//!
//! - lot ranges partition `[MIN_LOT_SIZE, ∞)` with no gaps or overlaps;
//! - every code letter used by a lot range has a plan row;
//! - sample sizes strictly increase with the code letter;
//! - every acceptability constant is finite and non-negative.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use super::level::{Aql, CodeLetter, InspectionLevel};
use crate::error::TableError;

/// Smallest lot size the tables cover.
pub const MIN_LOT_SIZE: u64 = 3;

const STANDARD_TABLES: &str = include_str!("../../tables/mil_std_414.toml");

static STANDARD: OnceLock<PlanTables> = OnceLock::new();

/// A closed lot-size interval and its code letter at each inspection level.
#[derive(Debug, Clone, PartialEq)]
pub struct LotRange {
    min: u64,
    max: Option<u64>,
    letters: [CodeLetter; 5],
}

impl LotRange {
    /// Creates a range `min..=max`, or `min..` when `max` is `None`.
    ///
    /// `letters` is indexed by [`InspectionLevel::index`].
    pub fn new(min: u64, max: Option<u64>, letters: [CodeLetter; 5]) -> Self {
        Self { min, max, letters }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    /// Upper bound, or `None` for the unbounded last range.
    pub fn max(&self) -> Option<u64> {
        self.max
    }

    pub fn contains(&self, lot_size: u64) -> bool {
        lot_size >= self.min && self.max.map_or(true, |max| lot_size <= max)
    }

    pub fn letter(&self, level: InspectionLevel) -> CodeLetter {
        self.letters[level.index()]
    }
}

/// One row of the plan table: sample size and per-AQL acceptability constants.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRow {
    letter: CodeLetter,
    sample_size: usize,
    constants: [Option<f64>; 14],
}

impl PlanRow {
    /// `constants` is indexed by [`Aql::index`].
    pub fn new(letter: CodeLetter, sample_size: usize, constants: [Option<f64>; 14]) -> Self {
        Self {
            letter,
            sample_size,
            constants,
        }
    }

    pub fn letter(&self) -> CodeLetter {
        self.letter
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Acceptability constant `k` (maximum allowable percent nonconforming)
    /// for the AQL column, or `None` when the table leaves it undefined.
    pub fn constant(&self, aql: Aql) -> Option<f64> {
        self.constants[aql.index()]
    }
}

/// Validated, immutable set of sampling tables.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTables {
    lot_ranges: Vec<LotRange>,
    rows: BTreeMap<CodeLetter, PlanRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTables {
    #[serde(default, rename = "lot_range")]
    lot_ranges: Vec<RawLotRange>,
    #[serde(default, rename = "plan")]
    plans: BTreeMap<String, RawPlanRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLotRange {
    min: u64,
    max: Option<u64>,
    letters: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPlanRow {
    sample_size: usize,
    #[serde(default)]
    k: BTreeMap<String, f64>,
}

impl PlanTables {
    /// Builds a table set, checking every invariant listed in the module docs.
    pub fn new(lot_ranges: Vec<LotRange>, rows: Vec<PlanRow>) -> Result<Self, TableError> {
        let mut by_letter = BTreeMap::new();
        for row in rows {
            let letter = row.letter;
            if by_letter.insert(letter, row).is_some() {
                return Err(TableError::DuplicatePlanRow { letter });
            }
        }

        validate_rows(&by_letter)?;
        validate_ranges(&lot_ranges, &by_letter)?;

        tracing::info!(
            lot_ranges = lot_ranges.len(),
            plan_rows = by_letter.len(),
            "sampling tables loaded"
        );

        Ok(Self {
            lot_ranges,
            rows: by_letter,
        })
    }

    /// Parses and validates a TOML table document.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_acceptance::plan::{Aql, InspectionLevel, PlanTables};
    ///
    /// let tables = PlanTables::from_toml_str(r#"
    ///     [[lot_range]]
    ///     min = 3
    ///     letters = { I = "B", II = "B", III = "B", IV = "B", V = "B" }
    ///
    ///     [plan.B]
    ///     sample_size = 3
    ///     k = { "2.5" = 7.59 }
    /// "#).unwrap();
    ///
    /// let plan = tables.resolve(InspectionLevel::II, 1_000_000, Aql::Aql2_5).unwrap();
    /// assert_eq!(plan.sample_size, 3);
    /// assert_eq!(plan.k, Some(7.59));
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, TableError> {
        let raw: RawTables = toml::from_str(source)?;
        raw.into_tables()
    }

    /// Reads a TOML table document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading sampling tables");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The published MIL-STD-414 normal-inspection tables.
    ///
    /// Parsed on first call; every later call returns the same instance.
    ///
    /// # Panics
    ///
    /// Panics if the embedded table document fails to parse or validate,
    /// which would be a defect in the shipped data.
    pub fn standard() -> &'static PlanTables {
        STANDARD.get_or_init(|| {
            Self::from_toml_str(STANDARD_TABLES)
                .expect("embedded MIL-STD-414 tables should be valid")
        })
    }

    /// Lot ranges in ascending order.
    pub fn lot_ranges(&self) -> &[LotRange] {
        &self.lot_ranges
    }

    /// Code letters with a plan row, in alphabetical order.
    pub fn letters(&self) -> impl Iterator<Item = CodeLetter> + '_ {
        self.rows.keys().copied()
    }

    pub fn row(&self, letter: CodeLetter) -> Option<&PlanRow> {
        self.rows.get(&letter)
    }
}

impl RawTables {
    fn into_tables(self) -> Result<PlanTables, TableError> {
        let lot_ranges = self
            .lot_ranges
            .into_iter()
            .map(RawLotRange::into_range)
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .plans
            .into_iter()
            .map(|(letter, row)| row.into_row(&letter))
            .collect::<Result<Vec<_>, _>>()?;

        PlanTables::new(lot_ranges, rows)
    }
}

impl RawLotRange {
    fn into_range(self) -> Result<LotRange, TableError> {
        let mut letters: [Option<CodeLetter>; 5] = [None; 5];
        for (level, letter) in &self.letters {
            let level: InspectionLevel = level.parse()?;
            letters[level.index()] = Some(letter.parse::<CodeLetter>()?);
        }

        let [Some(i), Some(ii), Some(iii), Some(iv), Some(v)] = letters else {
            let level = InspectionLevel::ALL
                .into_iter()
                .find(|level| letters[level.index()].is_none())
                .unwrap_or(InspectionLevel::I);
            return Err(TableError::MissingLevel {
                min: self.min,
                level,
            });
        };

        Ok(LotRange::new(self.min, self.max, [i, ii, iii, iv, v]))
    }
}

impl RawPlanRow {
    fn into_row(self, letter: &str) -> Result<PlanRow, TableError> {
        let letter: CodeLetter = letter.parse()?;
        let mut constants = [None; 14];
        for (aql, k) in self.k {
            let aql: Aql = aql.parse()?;
            constants[aql.index()] = Some(k);
        }
        Ok(PlanRow::new(letter, self.sample_size, constants))
    }
}

fn validate_rows(rows: &BTreeMap<CodeLetter, PlanRow>) -> Result<(), TableError> {
    let mut previous: Option<&PlanRow> = None;
    for row in rows.values() {
        if row.sample_size == 0 {
            return Err(TableError::ZeroSampleSize { letter: row.letter });
        }
        for aql in Aql::ALL {
            if let Some(k) = row.constant(aql) {
                if !k.is_finite() || k < 0.0 {
                    return Err(TableError::InvalidConstant {
                        letter: row.letter,
                        aql,
                        k,
                    });
                }
            }
        }
        if let Some(prev) = previous {
            if row.sample_size <= prev.sample_size {
                return Err(TableError::SampleSizeNotIncreasing {
                    letter: row.letter,
                    sample_size: row.sample_size,
                    previous: prev.letter,
                    previous_size: prev.sample_size,
                });
            }
        }
        previous = Some(row);
    }
    Ok(())
}

fn validate_ranges(
    ranges: &[LotRange],
    rows: &BTreeMap<CodeLetter, PlanRow>,
) -> Result<(), TableError> {
    let first = ranges.first().ok_or(TableError::NoLotRanges)?;
    if first.min != MIN_LOT_SIZE {
        return Err(TableError::FirstRangeStart {
            expected: MIN_LOT_SIZE,
            found: first.min,
        });
    }

    let last_index = ranges.len() - 1;
    let mut previous_max: Option<u64> = None;
    for (i, range) in ranges.iter().enumerate() {
        if let Some(prev_max) = previous_max {
            if range.min <= prev_max {
                return Err(TableError::Overlap {
                    min: range.min,
                    previous_max: prev_max,
                });
            }
            if range.min > prev_max + 1 {
                return Err(TableError::Gap {
                    from: prev_max + 1,
                    to: range.min - 1,
                });
            }
        }

        match range.max {
            Some(max) if max < range.min => {
                return Err(TableError::EmptyRange {
                    min: range.min,
                    max,
                })
            }
            Some(max) if i == last_index => return Err(TableError::BoundedLastRange { max }),
            None if i != last_index => return Err(TableError::UnboundedNotLast { min: range.min }),
            _ => {}
        }

        for level in InspectionLevel::ALL {
            let letter = range.letter(level);
            if !rows.contains_key(&letter) {
                return Err(TableError::MissingPlanRow {
                    min: range.min,
                    letter,
                });
            }
        }

        previous_max = range.max;
    }
    Ok(())
}
