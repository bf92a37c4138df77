//! Membership conditions over content payloads.
//!
//! A depth filter ultimately contributes a single condition: "the content's
//! term field is one of these terms". This module holds that condition type,
//! its evaluation against JSON payloads, and the rules for shaping it from an
//! expanded [`MatchSet`](crate::term::MatchSet).
//!
//! ## Usage
//!
//! ```rust
//! use taxodepth_core::filter::{Condition, Filter};
//! use serde_json::json;
//!
//! let filter = Filter::new(Condition::is_in("tid", vec![json!(1), json!(2)]));
//!
//! assert!(filter.matches(&json!({"tid": 2})));
//! assert!(filter.matches(&json!({"tid": [7, 1]})));
//! ```

mod builders;
mod matching;
mod predicate;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use predicate::{membership_predicate, Operator};

/// A filter over content payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// The root condition of the filter.
    pub condition: Condition,
}

impl Filter {
    /// Creates a new filter with the given condition.
    #[must_use]
    pub fn new(condition: Condition) -> Self {
        Self { condition }
    }

    /// Evaluates the filter against a payload.
    ///
    /// Returns `true` if the payload matches the filter conditions.
    #[must_use]
    pub fn matches(&self, payload: &Value) -> bool {
        self.condition.matches(payload)
    }
}

/// A condition on a content payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Equality comparison: field == value
    Eq {
        /// Field name (supports dot notation for nested fields)
        field: String,
        /// Value to compare against
        value: Value,
    },
    /// Check if field value is in a list
    In {
        /// Field name
        field: String,
        /// List of values to check against
        values: Vec<Value>,
    },
    /// Logical OR of multiple conditions
    Or {
        /// Conditions to OR together
        conditions: Vec<Condition>,
    },
}
