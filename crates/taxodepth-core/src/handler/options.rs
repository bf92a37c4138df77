//! Options of the depth filter.

use serde::{Deserialize, Serialize};

use crate::config::FilterConfig;

/// End-user description of the `depth` option.
pub const DEPTH_DESCRIPTION: &str = "The depth will match content tagged with terms in the \
hierarchy. For example, if you have the term \"fruit\" and a child term \"apple\", with a depth \
of -1 (or lower) then filtering for the term \"fruit\" will get content that is tagged with \
\"apple\" as well as \"fruit\". If positive, the reverse is true; searching for \"apple\" will \
also pick up content tagged with \"fruit\" if depth is 1 (or higher).";

/// Operators offered by the depth filter: only "is one of".
pub const OPERATOR_OPTIONS: &[(&str, &str)] = &[("or", "Is one of")];

/// Configuration of one depth filter instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Signed hierarchy distance: positive widens to ancestors, negative
    /// to descendants, zero matches the selected terms only.
    pub depth: i32,
    /// Where-group the condition is added to.
    pub group: u32,
    /// Alias of a configured join relationship, if any.
    pub relationship: Option<String>,
    /// Term column the membership condition attaches to.
    pub real_field: String,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

impl FilterOptions {
    /// Options seeded from configuration defaults.
    #[must_use]
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            depth: config.default_depth,
            group: config.group,
            relationship: None,
            real_field: config.real_field.clone(),
        }
    }

    /// Sets the depth.
    #[must_use]
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the where-group.
    #[must_use]
    pub fn with_group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }

    /// Attaches the filter to a relationship alias.
    #[must_use]
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }

    /// Sets the term column.
    #[must_use]
    pub fn with_real_field(mut self, real_field: impl Into<String>) -> Self {
        self.real_field = real_field.into();
        self
    }
}
