use core::fmt;
use std::io;

use thiserror::Error;

/// Coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The scanner rejected a byte.
    Syntax,
    /// A constructor was called with the wrong number of arguments.
    Arity,
    /// A constructor argument had the wrong kind.
    Type,
    /// A well-typed argument carried an invalid payload.
    Validation,
    /// The input ended in the middle of a value.
    Truncated,
    /// The underlying byte source failed.
    Io,
}

/// Number of arguments a constructor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSpec {
    Exact(usize),
    Between(usize, usize),
    /// Any count; the converter decides which arguments it looks at.
    FreeForm,
}

impl ArgSpec {
    pub(crate) fn accepts(self, got: usize) -> bool {
        match self {
            ArgSpec::Exact(n) => got == n,
            ArgSpec::Between(lo, hi) => (lo..=hi).contains(&got),
            ArgSpec::FreeForm => true,
        }
    }
}

impl fmt::Display for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgSpec::Exact(n) => write!(f, "{n}"),
            ArgSpec::Between(lo, hi) => write!(f, "{lo} to {hi}"),
            ArgSpec::FreeForm => f.write_str("any number of"),
        }
    }
}

/// Error returned by every decoding entry point.
///
/// All variants are terminal for the value being decoded: no partial
/// document is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid character {} {context} at offset {offset}", QuotedByte(*byte))]
    Syntax {
        byte: u8,
        context: String,
        offset: usize,
    },

    #[error("expected {expected} argument(s) for {ctor} constructor, but got {got}")]
    Arity {
        ctor: &'static str,
        expected: ArgSpec,
        got: usize,
    },

    #[error("{context} expects {expected}, found {found}")]
    Type {
        /// Constructor name, or target type for conversions.
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid {ctor}: {reason}")]
    Validation { ctor: &'static str, reason: String },

    #[error("unexpected end of input at offset {offset}")]
    Truncated { offset: usize },

    #[error("read failed: {message}")]
    Io { kind: io::ErrorKind, message: String },
}

impl ParseError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::Arity { .. } => ErrorKind::Arity,
            ParseError::Type { .. } => ErrorKind::Type,
            ParseError::Validation { .. } => ErrorKind::Validation,
            ParseError::Truncated { .. } => ErrorKind::Truncated,
            ParseError::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn syntax(byte: u8, context: impl Into<String>, offset: usize) -> Self {
        ParseError::Syntax {
            byte,
            context: context.into(),
            offset,
        }
    }

    pub(crate) fn validation(ctor: &'static str, reason: impl Into<String>) -> Self {
        ParseError::Validation {
            ctor,
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Renders a byte the way error messages quote it: `'a'`, `'\''`, `'\n'`,
/// `'\xff'`.
struct QuotedByte(u8);

impl fmt::Display for QuotedByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b'\'' => f.write_str("'\\''"),
            b'"' => f.write_str("'\"'"),
            b'\n' => f.write_str("'\\n'"),
            b'\r' => f.write_str("'\\r'"),
            b'\t' => f.write_str("'\\t'"),
            b'\\' => f.write_str("'\\\\'"),
            c if c.is_ascii_graphic() || c == b' ' => write!(f, "'{}'", c as char),
            c => write!(f, "'\\x{c:02x}'"),
        }
    }
}
