//! Coercion of raw values into field kinds.

use super::FieldKind;
use serde_json::{Number, Value};

/// Coerce a raw value into `kind`, or describe why it cannot be.
pub(super) fn coerce(kind: &FieldKind, value: &Value) -> Result<Value, String> {
    match kind {
        FieldKind::String => expect_string(value),
        FieldKind::Integer => coerce_integer(value),
        FieldKind::Number => coerce_number(value),
        FieldKind::Boolean => coerce_boolean(value),
        FieldKind::Enum(choices) => coerce_enum(choices, value),
    }
}

fn expect_string(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(_) => Ok(value.clone()),
        _ => Err("expected string".to_string()),
    }
}

fn coerce_integer(value: &Value) -> Result<Value, String> {
    match value {
        Value::Number(number) if number.is_i64() || number.is_u64() => {
            let Some(int) = number.as_i64() else {
                return Err("integer out of range".to_string());
            };
            Ok(Value::from(int))
        }
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| "expected integer".to_string()),
        _ => Err("expected integer".to_string()),
    }
}

fn coerce_number(value: &Value) -> Result<Value, String> {
    let parsed = match value {
        Value::Number(number) => return Ok(Value::Number(number.clone())),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| "expected number".to_string())?,
        _ => return Err("expected number".to_string()),
    };
    Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| "expected finite number".to_string())
}

/// Only the literal strings `"true"` and `"false"` coerce; anything else is
/// rejected rather than treated as truthy.
fn coerce_boolean(value: &Value) -> Result<Value, String> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::String(text) if text == "true" => Ok(Value::Bool(true)),
        Value::String(text) if text == "false" => Ok(Value::Bool(false)),
        _ => Err("invalid boolean value".to_string()),
    }
}

fn coerce_enum(choices: &[String], value: &Value) -> Result<Value, String> {
    let Some(text) = value.as_str() else {
        return Err("expected string".to_string());
    };
    if choices.iter().any(|choice| choice == text) {
        Ok(value.clone())
    } else {
        Err(format!("expected one of: {}", choices.join(", ")))
    }
}
