//! Missing-value policy for every numeric and boolean field the engine reads.
//!
//! Source tables are loosely validated, so each field has exactly one function
//! deciding what an absent or unparsable value means.

use super::domain::{DimensionVector, Scale};

/// Lower bound on the per-dimension weight used by the distance scorer.
pub const DEFAULT_WEIGHT_FLOOR: f64 = 0.6;

/// Weight of an item when its column is blank or unparsable.
pub const DEFAULT_ITEM_WEIGHT: f64 = 1.0;

/// `true`/`1` and `false`/`0` in any case; anything else yields `default`.
pub fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

/// Finite number or `default`.
pub fn parse_number(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}

pub fn item_weight(raw: Option<&str>) -> f64 {
    parse_number(raw, DEFAULT_ITEM_WEIGHT).max(0.0)
}

/// Question weights are validated at build time, but banks can also arrive
/// deserialized from callers.
pub fn question_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        DEFAULT_ITEM_WEIGHT
    }
}

/// Value of a candidate dimension, clamped into the scale. Missing or
/// non-finite entries count as the scale minimum.
pub fn vector_entry(vector: &DimensionVector, key: &str, scale: &Scale) -> f64 {
    vector
        .get(key)
        .filter(|value| value.is_finite())
        .map(|value| scale.clamp(value))
        .unwrap_or(scale.min)
}

/// Weighted mean of a dimension, or the scale midpoint when nothing was
/// observed. Zero would read as an actively scored zero.
pub fn preference_value(weighted_sum: f64, total_weight: f64, scale: &Scale) -> f64 {
    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        scale.midpoint()
    }
}

/// Weight the distance scorer applies to one dimension.
pub fn dimension_weight(observed: f64, floor: f64) -> f64 {
    let observed = if observed.is_finite() { observed } else { 0.0 };
    observed.max(floor)
}
