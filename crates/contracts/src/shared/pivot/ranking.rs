use serde::{Deserialize, Serialize};

/// Number of published rank positions per dataset
pub const TOP_N: usize = 5;

/// One self-join match: a label that appeared on both pivot axes,
/// with its coerced numeric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub label: String,
    pub value: f64,
}

impl MatchEntry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}
