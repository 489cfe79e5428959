//! # Objective
//!
//! The optimization direction. Selection, population ordering and best-ever tracking
//! all compare scores through an `Objective`, so the core never assumes whether a
//! lower or a higher score is better.

use std::cmp::Ordering;

/// Whether lower or higher fitness scores are better.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Objective {
    /// Lower scores are better.
    #[default]
    Minimize,
    /// Higher scores are better.
    Maximize,
}

impl Objective {
    /// Orders two scores best first: `Ordering::Less` means `a` is better than `b`.
    ///
    /// NaN is treated as worse than any number.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let natural = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                match self {
                    Objective::Minimize => natural,
                    Objective::Maximize => natural.reverse(),
                }
            }
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_better(&self, candidate: f64, incumbent: f64) -> bool {
        self.compare(candidate, incumbent) == Ordering::Less
    }
}
