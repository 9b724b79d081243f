use serde::{Deserialize, Serialize};

use super::report::PivotRow;

/// Field name prefix marking the row-axis label
pub const ROW_PREFIX: &str = "Row_";
/// Field name prefix marking the column-axis label
pub const COLUMN_PREFIX: &str = "Column_";
/// Field name prefix marking the numeric measure
pub const VALUE_PREFIX: &str = "Value_";

/// Field names detected from a sample row, all three present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedKeys {
    pub row_key: String,
    pub column_key: String,
    pub value_key: String,
}

/// Outcome of key detection over one report.
///
/// Keys are derived from the first row only and are never cached across
/// invocations; every refresh detects them anew.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyDetection {
    /// All three keys found
    Detected(DetectedKeys),
    /// The report contained no rows
    EmptyResult,
    /// At least one prefix had no matching field; the sample row is kept
    /// for diagnostics
    Undetectable { sample: PivotRow },
}
