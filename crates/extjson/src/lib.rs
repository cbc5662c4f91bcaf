//! Decoder for extended JSON, the relaxed JSON dialect used to round-trip
//! database documents.
//!
//! Besides ordinary JSON the decoder accepts unquoted keys, single-quoted
//! strings, hexadecimal integers, `NaN`/`Infinity`, `/pattern/options`
//! regex literals and a closed set of constructor calls:
//!
//! ```
//! use extjson::Value;
//!
//! let doc = extjson::from_str(
//!     r#"{_id: ObjectId("507f1f77bcf86cd799439011"), at: new Date(0x5f), n: NumberLong('9')}"#,
//! )?;
//! assert_eq!(doc.get("at"), Some(&Value::Date(95)));
//! assert_eq!(doc.get("n"), Some(&Value::NumberLong(9)));
//! # Ok::<(), extjson::ParseError>(())
//! ```
//!
//! Input is classified by a byte-at-a-time scanner with no look-ahead, so
//! the same machinery drives both whole-buffer decoding ([`from_slice`]) and
//! decoding a sequence of values from a reader ([`Decoder`]).

#![allow(missing_docs)]

mod macros;

mod classify;
mod convert;
mod decode;
mod error;
mod literal_buffer;
mod options;
mod scanner;
mod stream;
mod unescape;
mod value;

#[cfg(any(test, feature = "fuzzing"))]
#[doc(hidden)]
pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub(crate) use macros::{debug, trace};

pub use error::{ArgSpec, ErrorKind, ParseError};
pub use options::DecodeOptions;
pub use stream::Decoder;
pub use value::{Array, Binary, DbPointer, DbRef, Document, Number, ObjectId, Regex, Timestamp, Value};

pub type Result<T> = core::result::Result<T, ParseError>;

/// Decodes the single value held by `data`.
///
/// Leading and trailing whitespace is allowed; anything else after the
/// value is a syntax error.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is malformed, truncated, or holds
/// a constructor call with invalid arguments.
pub fn from_slice(data: &[u8]) -> Result<Value> {
    from_slice_with_options(data, &DecodeOptions::default())
}

/// # Errors
///
/// See [`from_slice`].
pub fn from_str(data: &str) -> Result<Value> {
    from_slice(data.as_bytes())
}

/// [`from_slice`] with explicit [`DecodeOptions`].
///
/// # Errors
///
/// See [`from_slice`].
pub fn from_slice_with_options(data: &[u8], options: &DecodeOptions) -> Result<Value> {
    trace!(len = data.len(), "decoding buffer");
    decode::unmarshal(data, options)
}

/// # Errors
///
/// See [`from_slice`].
pub fn from_str_with_options(data: &str, options: &DecodeOptions) -> Result<Value> {
    from_slice_with_options(data.as_bytes(), options)
}

/// Decodes a top-level object into its entries.
///
/// ```
/// let doc = extjson::from_slice_document(b"{a: 1, a: 2}")?;
/// assert_eq!(doc.len(), 2);
/// assert!(extjson::from_slice_document(b"[1]").is_err());
/// # Ok::<(), extjson::ParseError>(())
/// ```
///
/// # Errors
///
/// As [`from_slice`], plus [`ParseError::Type`] when the top-level value is
/// not an object.
pub fn from_slice_document(data: &[u8]) -> Result<Document> {
    Document::try_from(from_slice(data)?)
}

/// Whether `data` is syntactically valid, without building a value.
///
/// Constructor arguments are not checked, so `ObjectId("x")` is valid here
/// even though decoding it fails.
#[must_use]
pub fn is_valid(data: &[u8]) -> bool {
    scanner::check_valid(data).is_ok()
}
