use serde::{Deserialize, Serialize};

/// Behavior switches shared by a mapper and every predicate built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Match field names exactly. When off, `name` and `NAME` resolve to the
    /// same mapping.
    pub case_sensitive_fields: bool,
    /// Treat the literal `null` as a null test instead of text.
    pub allow_null_search: bool,
    /// Compare every text field case-insensitively, not only under `=`.
    pub case_insensitive_filtering: bool,
    /// How many levels of nested members `generate_mappings` expands.
    pub max_nesting_depth: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig {
            case_sensitive_fields: true,
            allow_null_search: true,
            case_insensitive_filtering: false,
            max_nesting_depth: 1,
        }
    }
}
