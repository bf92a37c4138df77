//! Builder methods for creating Condition instances.

use super::Condition;
use serde_json::Value;

impl Condition {
    /// Creates an equality condition.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an IN condition (field value must be in the list).
    #[must_use]
    pub fn is_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::In {
            field: field.into(),
            values,
        }
    }

    /// Creates an OR condition combining multiple conditions.
    #[must_use]
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self::Or { conditions }
    }

    /// Returns the field this condition tests, if it tests a single field.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Eq { field, .. } | Self::In { field, .. } => Some(field),
            Self::Or { .. } => None,
        }
    }
}
