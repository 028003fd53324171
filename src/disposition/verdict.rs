//! Lot disposition outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Accept / reject decision for a lot, or `Indeterminate` when the plan has
/// no acceptability constant to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Estimated percent nonconforming is at most `k`.
    Accept,
    /// Estimated percent nonconforming exceeds `k`.
    Reject,
    /// No `k` is defined for the plan.
    Indeterminate,
}

impl Verdict {
    /// Compares the estimated total percent nonconforming against `k`.
    ///
    /// The boundary is inclusive: `p_total == k` accepts.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_acceptance::disposition::Verdict;
    ///
    /// assert_eq!(Verdict::decide(3.05, Some(3.05)), Verdict::Accept);
    /// assert_eq!(Verdict::decide(3.06, Some(3.05)), Verdict::Reject);
    /// assert_eq!(Verdict::decide(0.0, None), Verdict::Indeterminate);
    /// ```
    pub fn decide(p_total: f64, k: Option<f64>) -> Self {
        match k {
            None => Self::Indeterminate,
            Some(k) if p_total <= k => Self::Accept,
            Some(_) => Self::Reject,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Indeterminate => "indeterminate",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
