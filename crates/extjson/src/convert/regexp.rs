use super::type_error;
use crate::{
    error::ParseError,
    unescape,
    value::{Regex, Value},
};

fn check_options(options: &str) -> Result<(), ParseError> {
    if options.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ParseError::validation(
            "RegExp",
            format!("options {options:?} must be ASCII letters"),
        ))
    }
}

/// Converts a `/pattern/options` span. The pattern runs up to the last `/`.
pub(crate) fn from_literal(span: &[u8]) -> Option<Value> {
    let close = span.iter().rposition(|b| *b == b'/').filter(|i| *i > 0)?;
    let pattern = unescape::regex_pattern(&span[1..close]);
    let options = core::str::from_utf8(&span[close + 1..]).ok()?;
    Some(Value::Regex(Regex {
        pattern,
        options: options.to_owned(),
    }))
}

/// `RegExp(pattern[, options])`.
pub(super) fn from_ctor(pattern: Value, options: Option<Value>) -> Result<Value, ParseError> {
    let Value::String(pattern) = pattern else {
        return Err(type_error("RegExp", "a pattern string", &pattern));
    };
    let options = match options {
        None => String::new(),
        Some(Value::String(options)) => options,
        Some(other) => return Err(type_error("RegExp", "an options string", &other)),
    };
    check_options(&options)?;
    Ok(Value::Regex(Regex { pattern, options }))
}
