use contracts::shared::pivot::{
    DetectedKeys, KeyDetection, ReportData, COLUMN_PREFIX, ROW_PREFIX, VALUE_PREFIX,
};

/// Detect row/column/value field names from a report sample.
///
/// Only the first row is inspected; for each prefix the first matching
/// field in record declaration order wins. An empty report or a report
/// whose field names do not follow the prefix convention yields the
/// corresponding non-fatal variant — the caller clears the output slots.
pub fn detect_keys(report: &ReportData) -> KeyDetection {
    let sample = match report.data.first() {
        Some(row) => row,
        None => return KeyDetection::EmptyResult,
    };

    let row_key = first_with_prefix(sample.field_names(), ROW_PREFIX);
    let column_key = first_with_prefix(sample.field_names(), COLUMN_PREFIX);
    let value_key = first_with_prefix(sample.field_names(), VALUE_PREFIX);

    match (row_key, column_key, value_key) {
        (Some(row_key), Some(column_key), Some(value_key)) => {
            KeyDetection::Detected(DetectedKeys {
                row_key,
                column_key,
                value_key,
            })
        }
        _ => KeyDetection::Undetectable {
            sample: sample.clone(),
        },
    }
}

fn first_with_prefix<'a>(names: impl Iterator<Item = &'a str>, prefix: &str) -> Option<String> {
    let mut names = names;
    names.find(|n| n.starts_with(prefix)).map(|n| n.to_string())
}
