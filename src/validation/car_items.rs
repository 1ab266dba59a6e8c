use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;

use super::ValidationErrors;
use crate::constants::MAX_CAR_ITEMS;

/// Validates the body of an item replacement and returns the item names.
///
/// An empty or non-array body short-circuits with a single message.
pub fn validate_car_items(body: &Value) -> Result<Vec<String>, ValidationErrors> {
    let items = match body.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(ValidationErrors::new(vec!["items is required".to_string()])),
    };

    let mut errors = Vec::new();
    if items.len() > MAX_CAR_ITEMS {
        errors.push(format!("items must be a maximum of {MAX_CAR_ITEMS}"));
    }

    if has_repeated(items) {
        errors.push("items cannot be repeated".to_string());
    }

    let names: Vec<String> = items
        .iter()
        .filter_map(|item| item.as_str().filter(|name| !name.is_empty()))
        .map(str::to_string)
        .collect();
    if names.len() != items.len() {
        errors.push("item name is required".to_string());
    }

    ValidationErrors::check(errors)?;
    Ok(names)
}

/// Stops at the first value seen twice. Strings are keyed by their content,
/// anything else by its JSON text.
fn has_repeated(items: &[Value]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().any(|item| {
        let key = match item {
            Value::String(name) => (true, Cow::Borrowed(name.as_str())),
            other => (false, Cow::Owned(other.to_string())),
        };
        !seen.insert(key)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn errors_of(body: Value) -> Vec<String> {
        validate_car_items(&body).unwrap_err().errors
    }

    #[test]
    fn accepts_distinct_names() {
        assert_eq!(
            validate_car_items(&json!(["Air bag", "ABS", "Sunroof"])).unwrap(),
            vec!["Air bag", "ABS", "Sunroof"]
        );
    }

    #[test]
    fn empty_or_non_array_is_required_error() {
        for body in [json!([]), json!({}), json!(null), json!("Air bag")] {
            assert_eq!(errors_of(body), vec!["items is required"]);
        }
    }

    #[test]
    fn too_many_and_repeated_accumulate() {
        assert_eq!(
            errors_of(json!(["A", "B", "C", "D", "E", "F"])),
            vec!["items must be a maximum of 5"]
        );
        assert_eq!(errors_of(json!(["A", "B", "A"])), vec!["items cannot be repeated"]);
        assert_eq!(
            errors_of(json!(["A", "B", "C", "D", "E", "A"])),
            vec!["items must be a maximum of 5", "items cannot be repeated"]
        );
    }

    #[test]
    fn repeated_non_string_values_are_detected() {
        assert!(has_repeated(&[json!(1), json!("1"), json!(1)]));
        assert!(!has_repeated(&[json!(1), json!("1"), json!({ "a": 1 })]));
    }

    #[test]
    fn large_distinct_lists_are_checked_in_linear_time() {
        let body = Value::Array((0..200_000).map(|i| json!(i.to_string())).collect());
        let started = std::time::Instant::now();
        assert_eq!(errors_of(body), vec!["items must be a maximum of 5"]);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn exactly_five_items_is_allowed() {
        assert_eq!(validate_car_items(&json!(["A", "B", "C", "D", "E"])).unwrap().len(), 5);
    }

    #[test]
    fn duplicates_are_case_sensitive() {
        assert!(validate_car_items(&json!(["abs", "ABS"])).is_ok());
    }

    #[test]
    fn non_string_or_empty_names_are_rejected() {
        assert_eq!(errors_of(json!(["A", 3])), vec!["item name is required"]);
        assert_eq!(errors_of(json!(["A", ""])), vec!["item name is required"]);
    }
}
