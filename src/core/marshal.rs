//! Purpose: Convert host-neutral call arguments into native numeric inputs.
//! Exports: `expect_arity`, `not_a_number`, `value_to_f32`, `single_f32`, `type_name`.
//! Role: The adapter step between a dynamic call and the pure computation.
//! Invariants: Every rejection is `InvalidArgument` and names the method.
//! Invariants: Numbers widen to f64 first, then narrow to f32 (overflow becomes infinity).
use crate::core::error::{Error, ErrorKind};
use serde_json::Value;

pub fn expect_arity(method: &str, given: usize, expected: usize) -> Result<(), Error> {
    if given == expected {
        return Ok(());
    }
    tracing::debug!(method, expected, given, "arity mismatch");
    let count = match expected {
        0 => "no arguments".to_string(),
        1 => "exactly one argument".to_string(),
        n => format!("exactly {n} arguments"),
    };
    Err(Error::new(ErrorKind::InvalidArgument).with_message(format!(
        "{method}() takes {count} ({given} given)"
    )))
}

/// Rejection for an argument whose host type has no float conversion.
pub fn not_a_number(method: &str, index: usize, type_name: &str) -> Error {
    tracing::debug!(method, index, kind = type_name, "non-numeric argument");
    Error::new(ErrorKind::InvalidArgument)
        .with_message(format!(
            "{method}() argument {} must be a real number, not {type_name}",
            index + 1
        ))
        .with_index(index)
}

pub fn value_to_f32(method: &str, index: usize, value: &Value) -> Result<f32, Error> {
    match value.as_f64() {
        Some(wide) => Ok(wide as f32),
        None => Err(not_a_number(method, index, type_name(value))),
    }
}

pub fn single_f32(method: &str, args: &[Value]) -> Result<f32, Error> {
    expect_arity(method, args.len(), 1)?;
    value_to_f32(method, 0, &args[0])
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
