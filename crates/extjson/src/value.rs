//! Extended JSON value types.
//!
//! This module defines the [`Value`] enum, a closed sum over the plain JSON
//! values and the extended kinds the dialect can express (dates, object ids,
//! binary payloads, 32/64-bit integers, regular expressions, timestamps and
//! the `MinKey`/`MaxKey`/`undefined` sentinels).
use core::fmt;

use crate::error::ParseError;

/// Ordered object entries. Field order is preserved and duplicate keys are
/// kept as separate entries.
pub type Document = Vec<(String, Value)>;
pub type Array = Vec<Value>;

/// A numeric literal.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Int64(i64),
    Float64(f64),
    /// The literal's source text, kept when an `i64`/`f64` would lose it.
    Text(String),
}

impl Number {
    /// Returns the value as an `f64`, parsing [`Number::Text`] if needed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Int64(i) => Some(*i as f64),
            Number::Float64(f) => Some(*f),
            Number::Text(text) => parse_text_f64(text),
        }
    }

    /// Returns the value as an `i64` if it is integral and in range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int64(i) => Some(*i),
            Number::Float64(f) => float_to_i64(*f),
            Number::Text(text) => parse_text_i64(text),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int64(i) => write!(f, "{i}"),
            Number::Float64(x) => write!(f, "{x}"),
            Number::Text(text) => f.write_str(text),
        }
    }
}

/// Parses numeric text in any of the forms the scanner accepts: signed
/// decimal, hex with a `0x`/`0X` prefix, `NaN` and `Infinity`.
pub(crate) fn parse_text_f64(text: &str) -> Option<f64> {
    let (negative, digits) = split_sign(text);
    let magnitude = match digits {
        "NaN" => f64::NAN,
        "Infinity" => f64::INFINITY,
        _ => match hex_digits(digits) {
            Some(hex) => hex_to_f64(hex)?,
            None => parse_decimal(digits)?,
        },
    };
    Some(if negative { -magnitude } else { magnitude })
}

pub(crate) fn parse_text_i64(text: &str) -> Option<i64> {
    let (negative, digits) = split_sign(text);
    if let Some(hex) = hex_digits(digits) {
        return signed_magnitude(negative, parse_hex(hex)?);
    }
    if let Ok(i) = text.parse::<i64>() {
        return Some(i);
    }
    let magnitude = parse_decimal(digits)?;
    float_to_i64(if negative { -magnitude } else { magnitude })
}

pub(crate) fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

/// The digits after a `0x`/`0X` prefix, if `digits` has one.
pub(crate) fn hex_digits(digits: &str) -> Option<&str> {
    digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
}

pub(crate) fn parse_hex(hex: &str) -> Option<u64> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(hex, 16).ok()
}

/// Hex digits as a float; magnitudes past `u64` round instead of failing.
fn hex_to_f64(hex: &str) -> Option<f64> {
    if let Some(n) = parse_hex(hex) {
        #[allow(clippy::cast_precision_loss)]
        return Some(n as f64);
    }
    if hex.is_empty() {
        return None;
    }
    hex.chars()
        .try_fold(0.0f64, |acc, c| Some(acc * 16.0 + f64::from(c.to_digit(16)?)))
}

/// Unsigned decimal text; rejects the `inf`/`nan` spellings `f64` parsing
/// would otherwise accept.
fn parse_decimal(digits: &str) -> Option<f64> {
    match digits.as_bytes().first() {
        Some(b'0'..=b'9' | b'.') => digits.parse().ok(),
        _ => None,
    }
}

pub(crate) fn signed_magnitude(negative: bool, magnitude: u64) -> Option<i64> {
    let wide = i128::from(magnitude);
    i64::try_from(if negative { -wide } else { wide }).ok()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn float_to_i64(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// A twelve-byte object identifier, held as 24 lowercase hex characters.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    /// Validates `hex` as 24 hexadecimal characters.
    ///
    /// Unlike the strictly lower-case form dump tools write, upper-case
    /// digits are accepted here; they are stored lower-cased, so
    /// [`as_str`](Self::as_str) is always lower-case.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Validation`] for any other input.
    ///
    /// # Examples
    ///
    /// ```
    /// use extjson::ObjectId;
    ///
    /// let id = ObjectId::parse("507F1F77BCF86CD799439011").unwrap();
    /// assert_eq!(id.as_str(), "507f1f77bcf86cd799439011");
    /// assert!(ObjectId::parse("507f").is_err());
    /// ```
    pub fn parse(hex: &str) -> Result<Self, ParseError> {
        if hex.len() != 24 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::validation(
                "ObjectId",
                format!("{hex:?} is not a 24-character hex string"),
            ));
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The twelve raw bytes of the identifier.
    #[must_use]
    pub fn bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        for (slot, pair) in out.iter_mut().zip(self.0.as_bytes().chunks_exact(2)) {
            *slot = (nibble(pair[0]) << 4) | nibble(pair[1]);
        }
        out
    }
}

fn nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => 0,
    }
}

#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binary {
    pub subtype: u8,
    pub payload: Vec<u8>,
}

#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct DbRef {
    pub collection: String,
    pub id: Box<Value>,
    pub database: Option<String>,
}

#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbPointer {
    pub namespace: String,
    pub id: ObjectId,
}

#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Regex {
    pub pattern: String,
    pub options: String,
}

#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    pub seconds: u32,
    pub increment: u32,
}

/// A decoded extended JSON value.
///
/// # Examples
///
/// ```
/// use extjson::{Number, Value};
///
/// let v = extjson::from_str(r#"{when: Date(123), n: NumberInt(7), tags: ['a']}"#).unwrap();
/// assert_eq!(v.get("when"), Some(&Value::Date(123)));
/// assert_eq!(v.get("n"), Some(&Value::NumberInt(7)));
/// assert_eq!(v.get("tags"), Some(&Value::Array(vec![Value::String("a".into())])));
/// ```
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Document),
    Binary(Binary),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    /// Always lower-case hex, even when the source text was upper-case.
    ObjectId(ObjectId),
    DbRef(DbRef),
    DbPointer(DbPointer),
    NumberInt(i32),
    NumberLong(i64),
    Regex(Regex),
    Timestamp(Timestamp),
    MinKey,
    MaxKey,
    Undefined,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(Number::Int64(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(Number::Float64(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Self::Object(v)
    }
}

impl From<ObjectId> for Value {
    fn from(v: ObjectId) -> Self {
        Self::ObjectId(v)
    }
}

impl Value {
    /// Name of the value's kind, as used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Binary(_) => "BinData",
            Value::Date(_) => "Date",
            Value::ObjectId(_) => "ObjectId",
            Value::DbRef(_) => "DBRef",
            Value::DbPointer(_) => "DBPointer",
            Value::NumberInt(_) => "NumberInt",
            Value::NumberLong(_) => "NumberLong",
            Value::Regex(_) => "RegExp",
            Value::Timestamp(_) => "Timestamp",
            Value::MinKey => "MinKey",
            Value::MaxKey => "MaxKey",
            Value::Undefined => "undefined",
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for every variant plain JSON cannot express.
    ///
    /// # Examples
    ///
    /// ```
    /// use extjson::Value;
    ///
    /// assert!(Value::Date(0).is_extended());
    /// assert!(Value::Undefined.is_extended());
    /// assert!(!Value::Bool(true).is_extended());
    /// ```
    #[must_use]
    pub fn is_extended(&self) -> bool {
        !matches!(
            self,
            Value::Null
                | Value::Bool(_)
                | Value::Number(_)
                | Value::String(_)
                | Value::Array(_)
                | Value::Object(_)
        )
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integral view of plain numbers and `NumberInt`/`NumberLong`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            Value::NumberInt(i) => Some(i64::from(*i)),
            Value::NumberLong(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            Value::NumberInt(i) => Some(f64::from(*i)),
            Value::NumberLong(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` in an object. With duplicate keys the last entry wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_document()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

fn conversion_error(target: &'static str, expected: &'static str, value: &Value) -> ParseError {
    ParseError::Type {
        context: target,
        expected,
        found: value.type_name(),
    }
}

impl TryFrom<Value> for bool {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value
            .as_bool()
            .ok_or_else(|| conversion_error("bool", "a boolean", &value))
    }
}

impl TryFrom<Value> for i64 {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value
            .as_i64()
            .ok_or_else(|| conversion_error("i64", "an integer", &value))
    }
}

impl TryFrom<Value> for f64 {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value
            .as_f64()
            .ok_or_else(|| conversion_error("f64", "a number", &value))
    }
}

impl TryFrom<Value> for String {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(conversion_error("String", "a string", &other)),
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(entries) => Ok(entries),
            other => Err(conversion_error("Document", "an object", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_bytes() {
        let id = ObjectId::parse("000102030405060708090a0B").unwrap();
        assert_eq!(id.bytes(), [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        assert_eq!(id.as_str(), "000102030405060708090a0b");
    }

    #[test]
    fn object_id_rejects_non_hex() {
        assert!(ObjectId::parse("zz0102030405060708090a0b").is_err());
        assert!(ObjectId::parse("000102030405060708090a0b00").is_err());
    }

    #[test]
    fn number_text_views() {
        assert_eq!(Number::Text("-0x10".into()).as_i64(), Some(-16));
        assert_eq!(Number::Text("1e3".into()).as_i64(), Some(1000));
        assert_eq!(Number::Text("1.5".into()).as_i64(), None);
        assert_eq!(Number::Text("99999999999999999999".into()).as_i64(), None);
        assert!(Number::Text("NaN".into()).as_f64().unwrap().is_nan());
        assert_eq!(Number::Text("-Infinity".into()).as_f64(), Some(f64::NEG_INFINITY));
        assert_eq!(
            Number::Text("0x1ffffffffffffffff".into()).as_f64(),
            Some(2f64.powi(65))
        );
        assert_eq!(
            Number::Text("-0x10000000000000000".into()).as_f64(),
            Some(-(2f64.powi(64)))
        );
        assert_eq!(Number::Text("0x1ffffffffffffffff".into()).as_i64(), None);
    }

    #[test]
    fn get_prefers_last_duplicate() {
        let v = Value::Object(vec![
            ("a".into(), Value::from(1i64)),
            ("a".into(), Value::from(2i64)),
        ]);
        assert_eq!(v.get("a"), Some(&Value::from(2i64)));
        assert_eq!(v.get("b"), None);
    }

    #[test]
    fn try_from_reports_found_kind() {
        let err = i64::try_from(Value::String("x".into())).unwrap_err();
        assert_eq!(
            err,
            ParseError::Type {
                context: "i64",
                expected: "an integer",
                found: "string",
            }
        );
        assert_eq!(i64::try_from(Value::NumberLong(5)).unwrap(), 5);
    }
}
