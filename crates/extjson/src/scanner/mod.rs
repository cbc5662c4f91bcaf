//! Scanner: a byte-at-a-time state machine that delimits extended JSON values.
//!
//! What it does
//! - Consumes one byte per [`Scanner::step`] call and reports what that byte
//!   means structurally as a [`ScanAction`]. No look-ahead and no
//!   backtracking: every transition is a function of the current [`State`]
//!   and the byte.
//! - Tracks object, array and constructor nesting on an explicit stack so a
//!   caller can tell when a top-level value is complete.
//! - Validates keywords through [`ExpectedLiteralBuffer`] and reports the
//!   first mismatching byte.
//!
//! Scope
//! - The scanner never builds values. [`crate::decode`] rescans a validated
//!   span and converts the literal spans the scanner delimited.
//!
//! Invariants
//! - Once an error is recorded every further step returns
//!   [`ScanAction::Error`] and the error is preserved.
//! - A close bracket that finishes the top-level value is reported as
//!   `EndObject`/`EndArray`/`EndCtor`; `End` itself arrives with the next
//!   byte. [`Scanner::eof`] feeds a synthetic space to flush it.
//! - [`Scanner::undo`] holds at most one action.

use crate::{
    error::ParseError,
    literal_buffer::{ExpectedLiteralBuffer, Follow, Step},
};


/// Deepest nesting of objects, arrays and argument lists accepted.
pub(crate) const MAX_DEPTH: usize = 256;

/// What a single byte meant to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanAction {
    Continue,
    BeginLiteral,
    BeginObject,
    /// `:` after an object key.
    ObjectKey,
    /// `,` after an object value.
    ObjectValue,
    EndObject,
    BeginArray,
    /// `,` after an array element.
    ArrayValue,
    EndArray,
    /// `(` opening a constructor argument list.
    BeginCtor,
    /// `,` between constructor arguments.
    CtorArg,
    EndCtor,
    SkipSpace,
    /// The top-level value ended before this byte.
    End,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nesting {
    ObjectKey,
    ObjectValue,
    Array,
    CtorArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeginValue,
    /// After `[`.
    BeginValueOrEmpty,
    /// After `{`.
    BeginKeyOrEmpty,
    /// After `,` inside an object.
    BeginKey,
    /// Unquoted object key.
    Key,
    /// Unquoted string value.
    BareWord,
    EndValue,
    EndTop,
    String { quote: u8 },
    StringEscape { quote: u8 },
    StringUnicode { quote: u8, digits: u8 },
    Sign,
    Zero,
    Integer,
    LeadingDot,
    Dot,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
    HexPrefix,
    Hex,
    Literal,
    Constructor,
    OptionalConstructor,
    AfterNew,
    NewSpace,
    /// After `(`.
    CtorArgOrEnd,
    RegexPattern,
    RegexEscape,
    RegexOptions,
    Error,
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

#[derive(Debug, Clone)]
pub(crate) struct Scanner {
    state: State,
    stack: Vec<Nesting>,
    literal: ExpectedLiteralBuffer,
    /// Bytes stepped so far, plus the offset the scanner was reset to.
    bytes: usize,
    err: Option<ParseError>,
    end_top: bool,
    redo: Option<ScanAction>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub(crate) fn new() -> Self {
        Self {
            state: State::BeginValue,
            stack: Vec::new(),
            literal: ExpectedLiteralBuffer::none(),
            bytes: 0,
            err: None,
            end_top: false,
            redo: None,
        }
    }

    /// Prepares to scan a new value whose first byte sits at `offset` in the
    /// overall input.
    pub(crate) fn reset_at(&mut self, offset: usize) {
        self.state = State::BeginValue;
        self.stack.clear();
        self.literal = ExpectedLiteralBuffer::none();
        self.bytes = offset;
        self.err = None;
        self.end_top = false;
        self.redo = None;
    }

    /// Offset of the next byte to be stepped.
    pub(crate) fn offset(&self) -> usize {
        self.bytes
    }

    /// Whether the top-level value is known to be complete.
    pub(crate) fn end_top(&self) -> bool {
        self.end_top
    }

    /// The recorded error, or a generic one if the caller saw an action the
    /// scanner never produces on valid input.
    pub(crate) fn error(&self) -> ParseError {
        self.err
            .clone()
            .unwrap_or_else(|| ParseError::syntax(0, "unexpected token", self.bytes))
    }

    /// Consumes one byte.
    pub(crate) fn step(&mut self, b: u8) -> ScanAction {
        if let Some(action) = self.redo.take() {
            return action;
        }
        let action = self.dispatch(b);
        self.bytes += 1;
        action
    }

    /// Makes the next [`step`](Self::step) return `action` without consuming
    /// its byte. The state reached by the undone byte is kept.
    pub(crate) fn undo(&mut self, action: ScanAction) {
        debug_assert!(self.redo.is_none(), "undo called twice");
        self.redo = Some(action);
    }

    /// Signals the end of input. Returns [`ScanAction::End`] when the
    /// top-level value is complete, otherwise records a truncation error.
    pub(crate) fn eof(&mut self) -> ScanAction {
        if let Some(action) = self.redo.take() {
            return action;
        }
        if self.err.is_some() {
            return ScanAction::Error;
        }
        if self.end_top {
            return ScanAction::End;
        }
        if self.state == State::OptionalConstructor && self.stack.is_empty() {
            self.state = State::EndTop;
            self.end_top = true;
            return ScanAction::End;
        }
        self.dispatch(b' ');
        if self.end_top {
            return ScanAction::End;
        }
        self.err = Some(ParseError::Truncated { offset: self.bytes });
        self.state = State::Error;
        ScanAction::Error
    }

    fn error_at(&mut self, b: u8, context: impl Into<String>) -> ScanAction {
        self.err = Some(ParseError::syntax(b, context, self.bytes));
        self.state = State::Error;
        ScanAction::Error
    }

    fn push(&mut self, b: u8, nesting: Nesting) -> Option<ScanAction> {
        if self.stack.len() >= MAX_DEPTH {
            return Some(self.error_at(b, "exceeding max nesting depth"));
        }
        self.stack.push(nesting);
        None
    }

    fn pop(&mut self) {
        self.stack.pop();
        if self.stack.is_empty() {
            self.state = State::EndTop;
            self.end_top = true;
        } else {
            self.state = State::EndValue;
        }
    }

    #[allow(clippy::too_many_lines)]
    fn dispatch(&mut self, b: u8) -> ScanAction {
        use State::*;
        match self.state {
            Error => ScanAction::Error,
            BeginValue => self.begin_value(b),
            BeginValueOrEmpty => {
                if b == b']' {
                    self.pop();
                    ScanAction::EndArray
                } else {
                    self.begin_value(b)
                }
            }
            BeginKeyOrEmpty => {
                if b == b'}' {
                    self.pop();
                    ScanAction::EndObject
                } else {
                    self.begin_key(b)
                }
            }
            BeginKey => self.begin_key(b),
            CtorArgOrEnd => {
                if b == b')' {
                    self.pop();
                    ScanAction::EndCtor
                } else {
                    self.begin_value(b)
                }
            }
            Key | BareWord => {
                if is_ident(b) {
                    ScanAction::Continue
                } else {
                    self.end_value(b)
                }
            }
            EndValue => self.end_value(b),
            EndTop => self.end_top_step(b),

            // -------------------------- STRINGS -----------------------------
            String { quote } => match b {
                _ if b == quote => {
                    self.state = EndValue;
                    ScanAction::Continue
                }
                b'\\' => {
                    self.state = StringEscape { quote };
                    ScanAction::Continue
                }
                0..0x20 => self.error_at(b, "in string literal"),
                _ => ScanAction::Continue,
            },
            StringEscape { quote } => match b {
                b'b' | b'f' | b'n' | b'r' | b't' | b'\\' | b'/' => {
                    self.state = String { quote };
                    ScanAction::Continue
                }
                b'u' => {
                    self.state = StringUnicode { quote, digits: 0 };
                    ScanAction::Continue
                }
                _ if b == quote => {
                    self.state = String { quote };
                    ScanAction::Continue
                }
                _ => self.error_at(b, "in string escape code"),
            },
            StringUnicode { quote, digits } => {
                if !b.is_ascii_hexdigit() {
                    return self.error_at(b, "in \\u hexadecimal character escape");
                }
                self.state = if digits == 3 {
                    String { quote }
                } else {
                    StringUnicode {
                        quote,
                        digits: digits + 1,
                    }
                };
                ScanAction::Continue
            }

            // -------------------------- NUMBERS -----------------------------
            Sign => match b {
                b'0' => self.go(Zero),
                b'1'..=b'9' => self.go(Integer),
                b'.' => self.go(LeadingDot),
                b'N' | b'I' => {
                    self.literal = ExpectedLiteralBuffer::signed(b);
                    self.go(Literal)
                }
                _ => self.error_at(b, "in numeric literal"),
            },
            Zero => match b {
                b'x' | b'X' => self.go(HexPrefix),
                b'.' => self.go(Dot),
                b'e' | b'E' => self.go(Exponent),
                _ => self.end_value(b),
            },
            Integer => match b {
                b'0'..=b'9' => ScanAction::Continue,
                b'.' => self.go(Dot),
                b'e' | b'E' => self.go(Exponent),
                _ => self.end_value(b),
            },
            LeadingDot | Dot => match b {
                b'0'..=b'9' => self.go(Fraction),
                _ => self.error_at(b, "after decimal point in numeric literal"),
            },
            Fraction => match b {
                b'0'..=b'9' => ScanAction::Continue,
                b'e' | b'E' => self.go(Exponent),
                _ => self.end_value(b),
            },
            Exponent => match b {
                b'+' | b'-' => self.go(ExponentSign),
                b'0'..=b'9' => self.go(ExponentDigits),
                _ => self.error_at(b, "in exponent of numeric literal"),
            },
            ExponentSign => match b {
                b'0'..=b'9' => self.go(ExponentDigits),
                _ => self.error_at(b, "in exponent of numeric literal"),
            },
            ExponentDigits => match b {
                b'0'..=b'9' => ScanAction::Continue,
                _ => self.end_value(b),
            },
            HexPrefix => {
                if b.is_ascii_hexdigit() {
                    self.go(Hex)
                } else {
                    self.error_at(b, "in hexadecimal numeric literal")
                }
            }
            Hex => {
                if b.is_ascii_hexdigit() {
                    ScanAction::Continue
                } else {
                    self.end_value(b)
                }
            }

            // -------------------------- LITERALS ----------------------------
            Literal => match self.literal.step(b) {
                Step::NeedMore => ScanAction::Continue,
                Step::Done(keyword) => {
                    self.state = match keyword.follow() {
                        Follow::End => EndValue,
                        Follow::Ctor => Constructor,
                        Follow::OptionalCtor => OptionalConstructor,
                        Follow::New => AfterNew,
                    };
                    ScanAction::Continue
                }
                Step::Reject => {
                    let context = self.literal.describe();
                    self.error_at(b, context)
                }
            },
            Constructor => match b {
                _ if is_space(b) => ScanAction::SkipSpace,
                b'(' => self.open_ctor(b),
                _ => self.error_at(b, "after constructor name (expecting '(')"),
            },
            OptionalConstructor => match b {
                _ if is_space(b) => ScanAction::SkipSpace,
                b'(' => self.open_ctor(b),
                _ => self.end_value(b),
            },
            AfterNew => {
                if is_space(b) {
                    self.go(NewSpace)
                } else {
                    self.error_at(b, "after new (expecting whitespace)")
                }
            }
            NewSpace => {
                if is_space(b) {
                    return ScanAction::Continue;
                }
                let literal = ExpectedLiteralBuffer::new(b);
                if b.is_ascii_uppercase() && literal.is_active() {
                    self.literal = literal;
                    self.go(Literal)
                } else {
                    self.error_at(b, "after new (expecting constructor name)")
                }
            }

            // -------------------------- REGEX -------------------------------
            RegexPattern => match b {
                b'/' => self.go(RegexOptions),
                b'\\' => self.go(RegexEscape),
                0..0x20 => self.error_at(b, "in regular expression literal"),
                _ => ScanAction::Continue,
            },
            RegexEscape => match b {
                0..0x20 => self.error_at(b, "in regular expression literal"),
                _ => self.go(RegexPattern),
            },
            RegexOptions => {
                if b.is_ascii_alphabetic() {
                    ScanAction::Continue
                } else {
                    self.end_value(b)
                }
            }
        }
    }

    fn go(&mut self, state: State) -> ScanAction {
        self.state = state;
        ScanAction::Continue
    }

    fn begin_literal(&mut self, state: State) -> ScanAction {
        self.state = state;
        ScanAction::BeginLiteral
    }

    fn begin_value(&mut self, b: u8) -> ScanAction {
        if is_space(b) {
            return ScanAction::SkipSpace;
        }
        match b {
            b'{' => {
                if let Some(err) = self.push(b, Nesting::ObjectKey) {
                    return err;
                }
                self.state = State::BeginKeyOrEmpty;
                ScanAction::BeginObject
            }
            b'[' => {
                if let Some(err) = self.push(b, Nesting::Array) {
                    return err;
                }
                self.state = State::BeginValueOrEmpty;
                ScanAction::BeginArray
            }
            b'"' | b'\'' => self.begin_literal(State::String { quote: b }),
            b'+' | b'-' => self.begin_literal(State::Sign),
            b'0' => self.begin_literal(State::Zero),
            b'1'..=b'9' => self.begin_literal(State::Integer),
            b'.' => self.begin_literal(State::LeadingDot),
            b'/' => self.begin_literal(State::RegexPattern),
            _ => {
                let literal = ExpectedLiteralBuffer::new(b);
                if literal.is_active() {
                    self.literal = literal;
                    self.begin_literal(State::Literal)
                } else if is_ident_start(b) {
                    self.begin_literal(State::BareWord)
                } else {
                    self.error_at(b, "looking for beginning of value")
                }
            }
        }
    }

    fn begin_key(&mut self, b: u8) -> ScanAction {
        match b {
            _ if is_space(b) => ScanAction::SkipSpace,
            b'"' | b'\'' => self.begin_literal(State::String { quote: b }),
            _ if is_ident_start(b) => self.begin_literal(State::Key),
            _ => self.error_at(b, "looking for beginning of object key string"),
        }
    }

    fn open_ctor(&mut self, b: u8) -> ScanAction {
        if let Some(err) = self.push(b, Nesting::CtorArgs) {
            return err;
        }
        self.state = State::CtorArgOrEnd;
        ScanAction::BeginCtor
    }

    fn end_value(&mut self, b: u8) -> ScanAction {
        let Some(top) = self.stack.last_mut() else {
            self.end_top = true;
            self.state = State::EndTop;
            return self.end_top_step(b);
        };
        if is_space(b) {
            self.state = State::EndValue;
            return ScanAction::SkipSpace;
        }
        match (*top, b) {
            (Nesting::ObjectKey, b':') => {
                *top = Nesting::ObjectValue;
                self.state = State::BeginValue;
                ScanAction::ObjectKey
            }
            (Nesting::ObjectKey, _) => self.error_at(b, "after object key"),
            (Nesting::ObjectValue, b',') => {
                *top = Nesting::ObjectKey;
                self.state = State::BeginKey;
                ScanAction::ObjectValue
            }
            (Nesting::ObjectValue, b'}') => {
                self.pop();
                ScanAction::EndObject
            }
            (Nesting::ObjectValue, _) => self.error_at(b, "after object key:value pair"),
            (Nesting::Array, b',') => {
                self.state = State::BeginValue;
                ScanAction::ArrayValue
            }
            (Nesting::Array, b']') => {
                self.pop();
                ScanAction::EndArray
            }
            (Nesting::Array, _) => self.error_at(b, "after array element"),
            (Nesting::CtorArgs, b',') => {
                self.state = State::BeginValue;
                ScanAction::CtorArg
            }
            (Nesting::CtorArgs, b')') => {
                self.pop();
                ScanAction::EndCtor
            }
            (Nesting::CtorArgs, _) => {
                self.error_at(b, "after constructor argument (expecting ')' or ',')")
            }
        }
    }

    fn end_top_step(&mut self, b: u8) -> ScanAction {
        if !is_space(b) {
            // Reported on the next call; this byte already starts another
            // value as far as a stream is concerned.
            self.err = Some(ParseError::syntax(b, "after top-level value", self.bytes));
            self.state = State::Error;
        }
        ScanAction::End
    }
}

/// Runs a fresh scanner over `data` and reports the first error, if any.
pub(crate) fn check_valid(data: &[u8]) -> Result<(), ParseError> {
    let mut scan = Scanner::new();
    for &b in data {
        if scan.step(b) == ScanAction::Error {
            return Err(scan.error());
        }
    }
    if scan.eof() == ScanAction::Error {
        return Err(scan.error());
    }
    Ok(())
}
