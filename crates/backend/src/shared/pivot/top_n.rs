use contracts::shared::pivot::{DetectedKeys, MatchEntry, PivotRow};

/// Extract the top `n` self-join entries from a pivot row set.
///
/// A row qualifies when the string forms of its row-axis and column-axis
/// labels are identical (the self-join diagonal of the pivot). Rows with a
/// null or absent label on either axis are skipped. The measure is coerced
/// to f64 with 0.0 for anything non-numeric — bad value data never drops
/// a matching row, it just ranks it at the bottom.
///
/// The result is sorted by value descending; ties keep original scan
/// order (stable sort). Pure function, no I/O.
pub fn extract_top(rows: &[PivotRow], keys: &DetectedKeys, n: usize) -> Vec<MatchEntry> {
    let mut matches: Vec<MatchEntry> = Vec::new();

    for row in rows {
        let row_label = match row.label(&keys.row_key) {
            Some(l) => l,
            None => continue,
        };
        let column_label = match row.label(&keys.column_key) {
            Some(l) => l,
            None => continue,
        };

        if row_label == column_label {
            let value = row.number(&keys.value_key);
            matches.push(MatchEntry::new(row_label, value));
        }
    }

    matches.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    matches.truncate(n);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::pivot::TOP_N;

    fn rows(rows: &[&str]) -> Vec<PivotRow> {
        rows.iter()
            .map(|r| serde_json::from_str(r).unwrap())
            .collect()
    }

    fn keys() -> DetectedKeys {
        DetectedKeys {
            row_key: "Row_A".into(),
            column_key: "Column_A".into(),
            value_key: "Value_A".into(),
        }
    }

    #[test]
    fn test_self_join_ranking() {
        let rows = rows(&[
            r#"{"Row_A": "X", "Column_A": "X", "Value_A": "10"}"#,
            r#"{"Row_A": "Y", "Column_A": "Y", "Value_A": "30"}"#,
            r#"{"Row_A": "Y", "Column_A": "Z", "Value_A": "99"}"#,
        ]);

        let top = extract_top(&rows, &keys(), TOP_N);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0], MatchEntry::new("Y", 30.0));
        assert_eq!(top[1], MatchEntry::new("X", 10.0));
    }

    #[test]
    fn test_non_matching_rows_excluded_regardless_of_value() {
        let rows = rows(&[
            r#"{"Row_A": "A", "Column_A": "B", "Value_A": 1000000}"#,
            r#"{"Row_A": "C", "Column_A": "C", "Value_A": 1}"#,
        ]);

        let top = extract_top(&rows, &keys(), TOP_N);
        assert_eq!(top, vec![MatchEntry::new("C", 1.0)]);
    }

    #[test]
    fn test_numeric_and_string_labels_compare_by_string_form() {
        let rows = rows(&[r#"{"Row_A": 42, "Column_A": "42", "Value_A": 7}"#]);

        let top = extract_top(&rows, &keys(), TOP_N);
        assert_eq!(top, vec![MatchEntry::new("42", 7.0)]);
    }

    #[test]
    fn test_null_or_absent_labels_skip_the_row() {
        let rows = rows(&[
            r#"{"Row_A": null, "Column_A": "X", "Value_A": 5}"#,
            r#"{"Column_A": "X", "Value_A": 5}"#,
            r#"{"Row_A": "X", "Value_A": 5}"#,
        ]);

        assert!(extract_top(&rows, &keys(), TOP_N).is_empty());
    }

    #[test]
    fn test_bad_value_coerces_to_zero_and_stays() {
        let rows = rows(&[
            r#"{"Row_A": "Good", "Column_A": "Good", "Value_A": 2}"#,
            r#"{"Row_A": "Bad", "Column_A": "Bad", "Value_A": "abc"}"#,
        ]);

        let top = extract_top(&rows, &keys(), TOP_N);
        assert_eq!(top.len(), 2);
        assert_eq!(top[1], MatchEntry::new("Bad", 0.0));
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let rows = rows(&[
            r#"{"Row_A": "First", "Column_A": "First", "Value_A": 10}"#,
            r#"{"Row_A": "Second", "Column_A": "Second", "Value_A": 10}"#,
            r#"{"Row_A": "Third", "Column_A": "Third", "Value_A": 20}"#,
        ]);

        let top = extract_top(&rows, &keys(), TOP_N);
        let labels: Vec<&str> = top.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_truncates_to_n() {
        let rows: Vec<PivotRow> = (0..8)
            .map(|i| {
                serde_json::from_str(&format!(
                    r#"{{"Row_A": "L{i}", "Column_A": "L{i}", "Value_A": {i}}}"#
                ))
                .unwrap()
            })
            .collect();

        let top = extract_top(&rows, &keys(), TOP_N);
        assert_eq!(top.len(), TOP_N);
        assert_eq!(top[0].label, "L7");
        assert_eq!(top[4].label, "L3");
    }

    #[test]
    fn test_deterministic() {
        let rows = rows(&[
            r#"{"Row_A": "X", "Column_A": "X", "Value_A": 10}"#,
            r#"{"Row_A": "Y", "Column_A": "Y", "Value_A": 30}"#,
        ]);

        let first = extract_top(&rows, &keys(), TOP_N);
        let second = extract_top(&rows, &keys(), TOP_N);
        assert_eq!(first, second);
    }
}
