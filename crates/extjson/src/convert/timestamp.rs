use super::number::integral;
use crate::{
    error::ParseError,
    value::{Timestamp, Value},
};

fn field(name: &str, value: &Value) -> Result<u32, ParseError> {
    let n = integral("Timestamp", value)?;
    u32::try_from(n).map_err(|_| {
        ParseError::validation("Timestamp", format!("{name} {n} does not fit in 32 bits"))
    })
}

pub(super) fn timestamp(seconds: &Value, increment: &Value) -> Result<Value, ParseError> {
    Ok(Value::Timestamp(Timestamp {
        seconds: field("seconds", seconds)?,
        increment: field("increment", increment)?,
    }))
}
