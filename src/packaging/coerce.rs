use crate::error::PackagingError;
use crate::schema::InputParameter;
use crate::value::{ParamValue, number_to_json};
use serde_json::Value;

pub(super) fn text(value: &ParamValue) -> Value {
    match value {
        ParamValue::Text(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

pub(super) fn integer(input: &InputParameter, value: &ParamValue) -> Result<Value, PackagingError> {
    let n = value.to_number();
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(PackagingError::NotAnInteger {
            name: input.name.clone(),
            value: value.to_string(),
        });
    }
    check_bounds(input, n)?;
    Ok(number_to_json(n))
}

pub(super) fn float(input: &InputParameter, value: &ParamValue) -> Result<Value, PackagingError> {
    let n = value.to_number();
    let not_a_number = || PackagingError::NotANumber {
        name: input.name.clone(),
        value: value.to_string(),
    };
    if !n.is_finite() {
        return Err(not_a_number());
    }
    check_bounds(input, n)?;
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .ok_or_else(not_a_number)
}

/// Accepts `true/1/yes` and `false/0/no` in any case; anything else falls
/// back to truthiness.
pub(super) fn boolean(value: &ParamValue) -> Value {
    let b = match value {
        ParamValue::Bool(b) => *b,
        ParamValue::Number(n) => *n != 0.0 && !n.is_nan(),
        ParamValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => value.is_truthy(),
        },
        other => other.is_truthy(),
    };
    Value::Bool(b)
}

pub(super) fn select(input: &InputParameter, value: &ParamValue) -> Result<Value, PackagingError> {
    let chosen = value.to_string();
    if let Some(options) = input.options.as_ref().filter(|o| !o.is_empty()) {
        if !options.contains(&chosen) {
            return Err(PackagingError::InvalidOption {
                name: input.name.clone(),
                value: chosen,
                options: options.clone(),
            });
        }
    }
    Ok(Value::String(chosen))
}

fn check_bounds(input: &InputParameter, n: f64) -> Result<(), PackagingError> {
    if let Some(min) = input.min {
        if n < min {
            return Err(PackagingError::BelowMinimum {
                name: input.name.clone(),
                min,
                value: n,
            });
        }
    }
    if let Some(max) = input.max {
        if n > max {
            return Err(PackagingError::AboveMaximum {
                name: input.name.clone(),
                max,
                value: n,
            });
        }
    }
    Ok(())
}
