use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of a host pivot report.
///
/// Field names are not fixed by schema; the row/column/value semantics are
/// carried by the `Row_*` / `Column_*` / `Value_*` naming convention. The
/// backing map preserves declaration order, which key detection relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PivotRow(pub serde_json::Map<String, Value>);

impl PivotRow {
    /// Field names in record declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    /// Raw value at a field, if the field exists
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String form of a field value; `None` for null, absent or
    /// non-scalar values. Numeric and string labels that stringify
    /// identically compare equal through this form.
    pub fn label(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Numeric form of a field value; anything that does not convert
    /// cleanly (absent, null, malformed string) coerces to 0.0
    pub fn number(&self, key: &str) -> f64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            // non-finite parses ("NaN", "inf") coerce to 0.0 like any
            // other unusable value
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
            Some(Value::Bool(b)) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}

impl FromIterator<(String, Value)> for PivotRow {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Report payload as returned by the host analytics API.
///
/// A missing `Data` key is treated as an empty result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(rename = "Data", default)]
    pub data: Vec<PivotRow>,
}
