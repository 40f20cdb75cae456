//! Reusable field validators
//!
//! Each validator takes the raw (or already coerced) value of a single field
//! and returns either the typed value or the message to report for that field.

use serde_json::Value;
use std::str::FromStr;

/// Validator: field must be a non-blank string
pub fn string(
    message: &'static str,
) -> impl Fn(Option<&Value>) -> Result<String, String> + Send + Sync + Clone {
    move |value: Option<&Value>| match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(message.to_string()),
    }
}

/// Validator: coerce the raw value to a finite number
///
/// Follows form-number semantics: surrounding whitespace is ignored, the
/// empty string and a missing value coerce to `0`, booleans to `1`/`0`.
pub fn coerce_number(
    message: &'static str,
) -> impl Fn(Option<&Value>) -> Result<f64, String> + Send + Sync + Clone {
    move |value: Option<&Value>| {
        let number = match value {
            None | Some(Value::Null) => Some(0.0),
            Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    Some(0.0)
                } else {
                    s.parse::<f64>().ok()
                }
            }
            Some(Value::Array(_)) | Some(Value::Object(_)) => None,
        };

        match number {
            Some(n) if n.is_finite() => Ok(n),
            _ => Err(message.to_string()),
        }
    }
}

/// Validator: number must be strictly greater than `min`
pub fn greater_than(
    min: f64,
    message: &'static str,
) -> impl Fn(f64) -> Result<(), String> + Send + Sync + Clone {
    move |num: f64| {
        if num > min {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Amount in major units, rounded to whole cents
pub fn rounded_cents(amount: f64) -> f64 {
    (amount * 100.0).round()
}

/// Validator: amount converted to cents must not exceed `max` cents
pub fn cents_in_range(
    max: i64,
    message: &'static str,
) -> impl Fn(f64) -> Result<(), String> + Send + Sync + Clone {
    move |amount: f64| {
        if rounded_cents(amount) <= max as f64 {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: value must be a string naming one of the variants of `T`
pub fn one_of<T: FromStr>(
    message: &'static str,
) -> impl Fn(Option<&Value>) -> Result<T, String> + Send + Sync + Clone {
    move |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<T>().ok())
            .ok_or_else(|| message.to_string())
    }
}
