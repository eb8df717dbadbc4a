use log::*;
use serde_json::Value;

/// True if every field in `part` is present in `complete` with the same value. Arrays must match element for element.
/// Panics if either string is not valid JSON.
pub fn json_is_subset_of(part: &str, complete: &str) -> bool {
    let part: Value = serde_json::from_str(part).expect("Invalid JSON");
    let complete: Value = serde_json::from_str(complete).expect("Invalid JSON");
    value_is_subset_of(&part, &complete)
}

pub fn value_is_subset_of(part: &Value, complete: &Value) -> bool {
    match (part, complete) {
        (Value::Null, _) => true,
        (Value::Object(p), Value::Object(c)) => p.iter().all(|(key, value)| match c.get(key) {
            Some(other) => value_is_subset_of(value, other),
            None => {
                debug!("Key not found: {key}");
                false
            },
        }),
        (Value::Array(p), Value::Array(c)) => {
            if p.len() != c.len() {
                debug!("Array length mismatch: {} != {}", p.len(), c.len());
                return false;
            }
            p.iter().zip(c).all(|(p, c)| value_is_subset_of(p, c))
        },
        (p, c) => {
            let same = p == c;
            if !same {
                debug!("Value mismatch: {p} != {c}");
            }
            same
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DEALS: &str = r#"{
        "deals": [
            {"id": "flipkart_1", "platform": "flipkart", "current_price": "₹1,299", "discount_percentage": 56.69},
            {"id": "amazon_1", "platform": "amazon", "current_price": "₹499", "discount_percentage": 50.05}
        ],
        "total_count": 2
    }"#;

    #[test]
    fn partial_objects() {
        assert!(json_is_subset_of(r#"{"total_count": 2}"#, DEALS));
        assert!(json_is_subset_of(r#"{"deals": [{"id": "flipkart_1"}, {"platform": "amazon"}]}"#, DEALS));
        assert!(!json_is_subset_of(r#"{"total_count": 3}"#, DEALS));
        assert!(!json_is_subset_of(r#"{"affiliate_link": "x"}"#, DEALS));
    }

    #[test]
    fn arrays_must_line_up() {
        assert!(!json_is_subset_of(r#"{"deals": [{"id": "flipkart_1"}]}"#, DEALS));
        assert!(!json_is_subset_of(r#"{"deals": [{"id": "amazon_1"}, {"id": "flipkart_1"}]}"#, DEALS));
        assert!(!json_is_subset_of(r#"{"deals": {"id": "amazon_1"}}"#, DEALS));
    }

    #[test]
    fn nulls_match_anything() {
        assert!(value_is_subset_of(&Value::Null, &Value::Bool(true)));
        assert!(json_is_subset_of(r#"{"total_count": null}"#, DEALS));
    }
}
