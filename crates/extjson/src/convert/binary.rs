use base64::{Engine, engine::general_purpose::STANDARD};

use super::{number::integral, type_error};
use crate::{
    error::ParseError,
    value::{Binary, Value},
};

/// `BinData(subtype, base64)`.
///
/// The subtype is a number in `0..=255` or a string of exactly two hex
/// characters; the payload is standard padded base64.
pub(super) fn bin_data(subtype: Value, payload: Value) -> Result<Value, ParseError> {
    let subtype = match &subtype {
        Value::String(hex) => parse_hex_subtype(hex)?,
        Value::Number(_) | Value::NumberInt(_) | Value::NumberLong(_) => {
            let n = integral("BinData", &subtype)?;
            u8::try_from(n).map_err(|_| {
                ParseError::validation("BinData", format!("subtype {n} is out of range 0-255"))
            })?
        }
        other => {
            return Err(type_error(
                "BinData",
                "a subtype number or hex string",
                other,
            ));
        }
    };
    let Value::String(encoded) = payload else {
        return Err(type_error("BinData", "a base64 string", &payload));
    };
    let payload = STANDARD.decode(encoded.as_bytes()).map_err(|e| {
        ParseError::validation("BinData", format!("payload is not valid base64: {e}"))
    })?;
    Ok(Value::Binary(Binary { subtype, payload }))
}

fn parse_hex_subtype(hex: &str) -> Result<u8, ParseError> {
    if hex.len() == 2 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        u8::from_str_radix(hex, 16)
            .map_err(|e| ParseError::validation("BinData", format!("subtype {hex:?}: {e}")))
    } else {
        Err(ParseError::validation(
            "BinData",
            format!("subtype {hex:?} is not two hex characters"),
        ))
    }
}
