//! Value builder.
//!
//! [`DecodeState`] drives a fresh [`Scanner`] over a span that one scanner
//! pass already accepted, building objects, arrays and constructor calls
//! recursively. When a literal span completes it is classified and handed to
//! the matching converter.
use crate::{
    classify::{Literal, classify},
    convert::{self, number, regexp},
    error::ParseError,
    literal_buffer::{Follow, Keyword},
    options::DecodeOptions,
    scanner::{ScanAction, Scanner, check_valid},
    unescape,
    value::{Document, Number, Value},
};

mod ctor;

/// Validates `data` and decodes the single value it holds.
pub(crate) fn unmarshal(data: &[u8], options: &DecodeOptions) -> Result<Value, ParseError> {
    check_valid(data)?;
    decode_valid(data, options)
}

/// Decodes a span the caller has already validated.
pub(crate) fn decode_valid(data: &[u8], options: &DecodeOptions) -> Result<Value, ParseError> {
    DecodeState::new(data, options).value()
}

pub(crate) struct DecodeState<'a> {
    data: &'a [u8],
    off: usize,
    scan: Scanner,
    options: &'a DecodeOptions,
}

impl<'a> DecodeState<'a> {
    fn new(data: &'a [u8], options: &'a DecodeOptions) -> Self {
        Self {
            data,
            off: 0,
            scan: Scanner::new(),
            options,
        }
    }

    /// Steps bytes until the scanner reports something other than `op`.
    ///
    /// Past the end of the data the scanner is sent EOF and `off` is parked
    /// one beyond the end, so that backing up one byte lands on the end.
    fn scan_while(&mut self, op: ScanAction) -> ScanAction {
        loop {
            let next = if let Some(&b) = self.data.get(self.off) {
                self.off += 1;
                self.scan.step(b)
            } else {
                self.off = self.data.len() + 1;
                self.scan.eof()
            };
            if next != op {
                return next;
            }
        }
    }

    /// Pushes back the byte that produced `op`.
    fn back_up(&mut self, op: ScanAction) {
        self.off -= 1;
        self.scan.undo(op);
    }

    /// Error for an action that validated input never produces here.
    fn unexpected(&self) -> ParseError {
        let byte = self
            .data
            .get(self.off.saturating_sub(1))
            .copied()
            .unwrap_or(b' ');
        ParseError::syntax(byte, "unexpected token", self.off.saturating_sub(1))
    }

    pub(crate) fn value(&mut self) -> Result<Value, ParseError> {
        match self.scan_while(ScanAction::SkipSpace) {
            ScanAction::BeginArray => self.array(),
            ScanAction::BeginObject => self.object(),
            ScanAction::BeginLiteral => {
                let start = self.off - 1;
                let op = self.scan_while(ScanAction::Continue);
                self.back_up(op);
                self.literal(start)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn array(&mut self) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        loop {
            let op = self.scan_while(ScanAction::SkipSpace);
            if op == ScanAction::EndArray {
                break;
            }
            self.back_up(op);
            items.push(self.value()?);

            match self.scan_while(ScanAction::SkipSpace) {
                ScanAction::EndArray => break,
                ScanAction::ArrayValue => {}
                _ => return Err(self.unexpected()),
            }
        }
        Ok(Value::Array(items))
    }

    fn object(&mut self) -> Result<Value, ParseError> {
        let mut entries: Document = Vec::new();
        loop {
            match self.scan_while(ScanAction::SkipSpace) {
                ScanAction::EndObject => break,
                ScanAction::BeginLiteral => {}
                _ => return Err(self.unexpected()),
            }
            let start = self.off - 1;
            let mut op = self.scan_while(ScanAction::Continue);
            let data: &'a [u8] = self.data;
            let key = self.key(&data[start..self.off - 1])?;
            if op == ScanAction::SkipSpace {
                op = self.scan_while(ScanAction::SkipSpace);
            }
            if op != ScanAction::ObjectKey {
                return Err(self.unexpected());
            }

            let value = self.value()?;
            entries.push((key, value));

            match self.scan_while(ScanAction::SkipSpace) {
                ScanAction::EndObject => break,
                ScanAction::ObjectValue => {}
                _ => return Err(self.unexpected()),
            }
        }
        Ok(Value::Object(entries))
    }

    fn key(&self, span: &[u8]) -> Result<String, ParseError> {
        match span.first() {
            Some(b'"' | b'\'') => unescape::unquote(span).ok_or_else(|| self.unexpected()),
            _ => core::str::from_utf8(span)
                .map(str::to_owned)
                .map_err(|_| self.unexpected()),
        }
    }

    /// Converts the literal span starting at `start` and ending at `off`.
    fn literal(&mut self, start: usize) -> Result<Value, ParseError> {
        let data: &'a [u8] = self.data;
        let span = &data[start..self.off];
        let Some(kind) = classify(span) else {
            return Err(self.unexpected());
        };
        match kind {
            Literal::Quoted => unescape::unquote(span)
                .map(Value::String)
                .ok_or_else(|| self.unexpected()),
            Literal::BareWord(word) => Ok(Value::String(word.to_owned())),
            Literal::Number => core::str::from_utf8(span)
                .ok()
                .and_then(|text| number::parse_literal(text, self.options.use_number))
                .map(Value::Number)
                .ok_or_else(|| self.unexpected()),
            Literal::Regex => regexp::from_literal(span).ok_or_else(|| self.unexpected()),
            Literal::Keyword(keyword) => self.keyword(keyword),
            Literal::New(keyword) if keyword.is_constructor() => self.constructor(keyword),
            Literal::New(keyword) => Err(ParseError::Type {
                context: "new",
                expected: "a constructor name",
                found: keyword.text(),
            }),
        }
    }

    fn keyword(&mut self, keyword: Keyword) -> Result<Value, ParseError> {
        match keyword {
            Keyword::Null => Ok(Value::Null),
            Keyword::True => Ok(Value::Bool(true)),
            Keyword::False => Ok(Value::Bool(false)),
            Keyword::NaN => Ok(Value::Number(Number::Float64(f64::NAN))),
            Keyword::Infinity => Ok(Value::Number(Number::Float64(f64::INFINITY))),
            _ if keyword.follow() == Follow::New => Err(self.unexpected()),
            _ => self.constructor(keyword),
        }
    }

    fn constructor(&mut self, keyword: Keyword) -> Result<Value, ParseError> {
        let args = self.ctor_args(keyword)?;
        convert::construct(keyword, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Binary, ObjectId, Regex, Timestamp};

    fn decode(input: &str) -> Result<Value, ParseError> {
        unmarshal(input.as_bytes(), &DecodeOptions::default())
    }

    fn oid(hex: &str) -> Value {
        Value::ObjectId(ObjectId::parse(hex).unwrap())
    }

    #[test]
    fn nested_containers() {
        assert_eq!(
            decode(r#"{ "a" : [1, {b: 'x'}], c: null }"#),
            Ok(Value::Object(vec![
                (
                    "a".into(),
                    Value::Array(vec![
                        Value::from(1i64),
                        Value::Object(vec![("b".into(), Value::from("x"))]),
                    ])
                ),
                ("c".into(), Value::Null),
            ]))
        );
    }

    #[test]
    fn keys_are_never_keywords() {
        assert_eq!(
            decode("{null: true, Date: false, new: NaN}").map(|v| {
                v.as_document()
                    .unwrap()
                    .iter()
                    .map(|(k, _)| k.clone())
                    .collect::<Vec<_>>()
            }),
            Ok(vec!["null".to_owned(), "Date".into(), "new".into()])
        );
    }

    #[test]
    fn constructors_in_containers() {
        assert_eq!(
            decode(r#"[Date(1), ObjectId("507f1f77bcf86cd799439011"), MinKey, MaxKey()]"#),
            Ok(Value::Array(vec![
                Value::Date(1),
                oid("507f1f77bcf86cd799439011"),
                Value::MinKey,
                Value::MaxKey,
            ]))
        );
    }

    #[test]
    fn constructor_whitespace_and_new() {
        assert_eq!(
            decode("{ts: new Timestamp ( 1 , 2 ), b: BinData(0, 'AQ==')}"),
            Ok(Value::Object(vec![
                (
                    "ts".into(),
                    Value::Timestamp(Timestamp {
                        seconds: 1,
                        increment: 2,
                    })
                ),
                (
                    "b".into(),
                    Value::Binary(Binary {
                        subtype: 0,
                        payload: vec![1],
                    })
                ),
            ]))
        );
        assert_eq!(
            decode("new NaN"),
            Err(ParseError::Type {
                context: "new",
                expected: "a constructor name",
                found: "NaN",
            })
        );
    }

    #[test]
    fn top_level_optional_constructors() {
        assert_eq!(decode("MinKey"), Ok(Value::MinKey));
        assert_eq!(decode("undefined  "), Ok(Value::Undefined));
        assert_eq!(decode("MaxKey ( )"), Ok(Value::MaxKey));
        assert_eq!(
            decode("MinKey(1)"),
            Err(ParseError::Arity {
                ctor: "MinKey",
                expected: crate::ArgSpec::Exact(0),
                got: 1,
            })
        );
    }

    #[test]
    fn regex_literal_equals_constructor() {
        let expected = Value::Regex(Regex {
            pattern: "a/b".into(),
            options: "i".into(),
        });
        assert_eq!(decode(r"/a\/b/i"), Ok(expected.clone()));
        assert_eq!(decode(r#"RegExp("a/b", "i")"#), Ok(expected));
    }

    #[test]
    fn nested_boolean() {
        assert_eq!(decode("Boolean(Boolean(Boolean(0)))"), Ok(Value::Bool(false)));
        assert_eq!(decode("Boolean(Boolean(5))"), Ok(Value::Bool(true)));
        assert_eq!(decode("Boolean(true, false)"), Ok(Value::Bool(true)));
        assert_eq!(decode("Boolean()"), Ok(Value::Bool(false)));
    }

    #[test]
    fn bare_words_and_specials() {
        assert_eq!(
            decode("[abc, -Infinity, +0x10]"),
            Ok(Value::Array(vec![
                Value::from("abc"),
                Value::from(f64::NEG_INFINITY),
                Value::from(16i64),
            ]))
        );
    }

    #[test]
    fn converter_errors_abort_the_decode() {
        assert_eq!(
            decode(r#"{a: [1, Date("123")]}"#),
            Err(ParseError::Type {
                context: "Date",
                expected: "a number",
                found: "string",
            })
        );
    }

    #[test]
    fn use_number_threads_through() {
        let options = DecodeOptions::new().with_use_number(true);
        assert_eq!(
            unmarshal(b"[1, Date(0x10)]", &options),
            Ok(Value::Array(vec![
                Value::Number(Number::Text("1".into())),
                Value::Date(16),
            ]))
        );
    }
}
