use super::type_error;
use crate::{
    error::ParseError,
    value::{
        Number, Value, hex_digits, parse_hex, parse_text_f64, parse_text_i64, signed_magnitude,
        split_sign,
    },
};

/// Converts a numeric literal span.
///
/// Integers that fit an `i64` (decimal or hex) become [`Number::Int64`];
/// integers that do not keep their text. Fractions and exponents become
/// [`Number::Float64`]. With `use_number` every finite literal keeps its
/// text. `NaN` and `Infinity` are always floats.
pub(crate) fn parse_literal(text: &str, use_number: bool) -> Option<Number> {
    let (_, digits) = split_sign(text);
    if matches!(digits, "NaN" | "Infinity") {
        return parse_text_f64(text).map(Number::Float64);
    }
    if use_number {
        return Some(Number::Text(text.to_owned()));
    }
    if let Some(hex) = hex_digits(digits) {
        let (negative, _) = split_sign(text);
        let int = parse_hex(hex).and_then(|m| signed_magnitude(negative, m));
        return Some(int.map_or_else(|| Number::Text(text.to_owned()), Number::Int64));
    }
    if !digits.contains(['.', 'e', 'E']) {
        return Some(match text.parse::<i64>() {
            Ok(i) => Number::Int64(i),
            Err(_) => Number::Text(text.to_owned()),
        });
    }
    parse_text_f64(text).map(Number::Float64)
}

/// Integral value of a numeric argument.
pub(super) fn integral(ctor: &'static str, value: &Value) -> Result<i64, ParseError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| {
            ParseError::validation(ctor, format!("{n} is not an integer in range"))
        }),
        Value::NumberInt(i) => Ok(i64::from(*i)),
        Value::NumberLong(i) => Ok(*i),
        other => Err(type_error(ctor, "a number", other)),
    }
}

/// Like [`integral`], but also accepts numeric strings.
fn integer_arg(ctor: &'static str, value: &Value) -> Result<i64, ParseError> {
    match value {
        Value::String(s) => parse_text_i64(s.trim())
            .ok_or_else(|| ParseError::validation(ctor, format!("{s:?} is not an integer"))),
        Value::Number(_) | Value::NumberInt(_) | Value::NumberLong(_) => integral(ctor, value),
        other => Err(type_error(ctor, "a number or numeric string", other)),
    }
}

pub(super) fn number_int(value: &Value) -> Result<Value, ParseError> {
    let n = integer_arg("NumberInt", value)?;
    i32::try_from(n).map(Value::NumberInt).map_err(|_| {
        ParseError::validation("NumberInt", format!("{n} does not fit in 32 bits"))
    })
}

pub(super) fn number_long(value: &Value) -> Result<Value, ParseError> {
    integer_arg("NumberLong", value).map(Value::NumberLong)
}
