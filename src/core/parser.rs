use serde_json::{Map, Value};

use crate::models::RestaurantCandidate;

pub const DEFAULT_NAME: &str = "Restaurant";
pub const DEFAULT_CUISINE: &str = "American";
pub const DEFAULT_RATING: f64 = 4.0;
pub const DEFAULT_PRICE_LEVEL: f64 = 2.0;

const MIN_RATING: f64 = 0.0;
const MAX_RATING: f64 = 5.0;
const MIN_PRICE_LEVEL: f64 = 1.0;
const MAX_PRICE_LEVEL: f64 = 3.0;

/// Parse generator output into restaurant candidates
///
/// Never fails: malformed JSON, a non-array root or an empty array all
/// yield an empty list. Elements that are not JSON objects are dropped and
/// every field of the remaining objects is validated, defaulted and clamped
/// independently.
pub fn parse_response(text: &str) -> Vec<RestaurantCandidate> {
    let trimmed = text.trim();
    let payload = extract_fenced_block(trimmed).unwrap_or(trimmed);

    let root: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Generator output is not valid JSON: {}", e);
            return Vec::new();
        }
    };

    let Value::Array(items) = root else {
        tracing::warn!("Generator output is not a JSON array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(candidate_from_object)
        .collect()
}

/// Content of the first markdown code fence (```json ... ``` or ``` ... ```)
pub fn extract_fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let rest = &text[start + 3..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

fn candidate_from_object(object: &Map<String, Value>) -> RestaurantCandidate {
    let rating = finite_or(coerce_number(object.get("rating")), DEFAULT_RATING)
        .clamp(MIN_RATING, MAX_RATING);

    // default before rounding: 0.3 is present, rounds to 0, then clamps to 1
    let price_level = finite_or(coerce_number(object.get("priceLevel")), DEFAULT_PRICE_LEVEL)
        .round()
        .clamp(MIN_PRICE_LEVEL, MAX_PRICE_LEVEL);

    RestaurantCandidate {
        name: coerce_string(object.get("name")).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        cuisine: coerce_string(object.get("cuisine"))
            .unwrap_or_else(|| DEFAULT_CUISINE.to_string()),
        rating,
        price_level: price_level as u8,
        address: coerce_string(object.get("address")),
    }
}

/// Scalars become strings; null, arrays and objects count as absent
fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Zero counts as missing, matching how the prompt contract treats `0`
fn finite_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => default,
    }
}
