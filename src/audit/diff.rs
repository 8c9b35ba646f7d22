//! Diff generation for audit logging
//!
//! Produces one-line summaries of which top-level fields changed between two
//! JSON snapshots of the same record.

use serde_json::Value;

/// Summarize changed, added and removed top-level fields
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes: Vec<String> = before_obj
                .iter()
                .filter_map(|(key, old)| match after_obj.get(key) {
                    Some(new) if new == old => None,
                    Some(new) => Some(format!("{}: {} -> {}", key, format_value(old), format_value(new))),
                    None => Some(format!("{}: {} -> (removed)", key, format_value(old))),
                })
                .collect();

            changes.extend(
                after_obj
                    .iter()
                    .filter(|(key, _)| !before_obj.contains_key(*key))
                    .map(|(key, new)| format!("{}: (added) -> {}", key, format_value(new))),
            );
            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_change() {
        let before = json!({"id": "1", "due_amount": 100.0, "payment_amount": 0.0});
        let after = json!({"id": "1", "due_amount": 100.0, "payment_amount": 40.0});

        assert_eq!(
            generate_diff(&before, &after),
            Some("payment_amount: 0.0 -> 40.0".to_string())
        );
    }

    #[test]
    fn test_no_change() {
        let value = json!({"payment_amount": 10.0});
        assert_eq!(generate_diff(&value, &value), None);
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"memo": "old"});
        let after = json!({"document_number": "INV-1"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("memo: \"old\" -> (removed)"));
        assert!(diff.contains("document_number: (added) -> \"INV-1\""));
    }

    #[test]
    fn test_scalar_and_long_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)), Some("1 -> 2".to_string()));

        let long = "x".repeat(80);
        let diff = generate_diff(&json!({"memo": long}), &json!({"memo": "short"})).unwrap();
        assert!(diff.contains("...\" -> \"short\""));
    }
}
