//! Shaping an expanded term set into a membership condition.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::Condition;
use crate::term::{MatchSet, TermId};

/// Comparison used for the selected terms.
///
/// Chosen from the number of selected (pre-expansion) values. It only
/// affects how the condition is written, never which content matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Exactly one term was selected.
    #[serde(rename = "=")]
    Eq,
    /// Several terms were selected.
    #[serde(rename = "IN")]
    In,
}

impl Operator {
    /// `Eq` for a single selected value, `In` otherwise.
    #[must_use]
    pub fn for_value_count(count: usize) -> Self {
        if count == 1 {
            Self::Eq
        } else {
            Self::In
        }
    }

    /// SQL spelling of the operator.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::In => "IN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Builds the condition testing `field` against the expanded terms.
///
/// - one selected term, nothing discovered: `field = seed`
/// - one selected term, relatives discovered: `field = seed OR field IN (relatives)`
/// - several selected terms: `field IN (all matched terms)`
///
/// Terms are emitted in sorted order.
#[must_use]
pub fn membership_predicate(field: &str, selected: &[TermId], matched: &MatchSet) -> Condition {
    let sorted = matched.to_sorted_vec();

    match selected {
        [seed] => {
            let discovered: Vec<Value> = sorted
                .iter()
                .filter(|term| *term != seed)
                .map(TermId::to_value)
                .collect();
            let base = Condition::eq(field, seed.to_value());
            if discovered.is_empty() {
                base
            } else {
                Condition::or(vec![base, Condition::is_in(field, discovered)])
            }
        }
        _ => Condition::is_in(field, sorted.iter().map(TermId::to_value).collect()),
    }
}
