use std::sync::OnceLock;

use regex::Regex;

fn first_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("static regex is valid"))
}

/// Extracts the numeric value from a retailer's price string, e.g. `"₹1,299.50"` -> `1299.5`. Any currency prefix
/// (`₹`, `Rs.`, `INR`) is skipped and thousands separators are dropped.
pub fn parse_price(price: &str) -> Option<f64> {
    let number = first_number().find(price)?;
    number.as_str().replace(',', "").parse::<f64>().ok()
}

/// The discount, in percent and rounded to two decimals, of `current` relative to `original`.
///
/// Returns zero if either price cannot be read, or if `original > current > 0` does not hold.
pub fn calculate_discount(current: &str, original: &str) -> f64 {
    match (parse_price(current), parse_price(original)) {
        (Some(current), Some(original)) if original > current && current > 0.0 => {
            let pct = (original - current) / original * 100.0;
            (pct * 100.0).round() / 100.0
        },
        _ => 0.0,
    }
}
