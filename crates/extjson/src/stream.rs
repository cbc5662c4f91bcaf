//! Streaming decoder over any [`Read`] source.
//!
//! [`Decoder`] pulls bytes into a growable buffer until its scanner has
//! delimited one complete top-level value, decodes that span, and drops it
//! from the buffer. Values may be separated by whitespace or simply
//! concatenated where the grammar allows it (`{}{}`).
//!
//! Scanner, truncation and I/O errors leave the stream position unknown and
//! are returned again by every later call. Converter errors (a bad
//! `ObjectId` payload, a wrong argument count) are not: the offending value
//! has been consumed and decoding can continue with the next one.
use std::io::{self, Read};

use crate::{
    decode,
    error::ParseError,
    options::DecodeOptions,
    scanner::{ScanAction, Scanner},
    value::Value,
};

/// Smallest number of bytes requested from the reader at a time.
const MIN_READ: usize = 512;

/// Decodes a sequence of extended JSON values from a byte stream.
///
/// # Examples
///
/// ```
/// use extjson::{Decoder, Value};
///
/// let input: &[u8] = b"{a: 1} Date(5)\n[true]";
/// let mut decoder = Decoder::new(input);
/// assert_eq!(
///     decoder.decode_next().unwrap(),
///     Some(Value::Object(vec![("a".into(), Value::from(1i64))]))
/// );
/// assert_eq!(decoder.decode_next().unwrap(), Some(Value::Date(5)));
/// assert_eq!(decoder.decode_next().unwrap(), Some(Value::Array(vec![Value::Bool(true)])));
/// assert_eq!(decoder.decode_next().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
    options: DecodeOptions,
    /// Unconsumed bytes; `buf[0]` sits at stream offset `base`.
    buf: Vec<u8>,
    base: usize,
    scan: Scanner,
    eof: bool,
    err: Option<ParseError>,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self {
            reader,
            options,
            buf: Vec::new(),
            base: 0,
            scan: Scanner::new(),
            eof: false,
            err: None,
        }
    }

    /// Decodes the next value.
    ///
    /// Returns `Ok(None)` once the stream holds nothing but whitespace.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] for the value that failed. Syntax,
    /// truncation and I/O errors are returned again by every later call.
    pub fn decode_next(&mut self) -> Result<Option<Value>, ParseError> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }
        let len = match self.read_value() {
            Ok(Some(len)) => len,
            Ok(None) => return Ok(None),
            Err(err) => {
                crate::debug!(error = %err, "stream failed");
                self.err = Some(err.clone());
                return Err(err);
            }
        };

        crate::trace!(offset = self.base, len, "decoding value");
        let result = decode::decode_valid(&self.buf[..len], &self.options);
        self.buf.drain(..len);
        self.base += len;
        result.map(Some)
    }

    /// Bytes read from the source but not yet consumed by a decoded value.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the underlying reader. Buffered bytes are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Scans forward until one complete value sits at the front of the
    /// buffer and returns its length, or `None` at a clean end of stream.
    fn read_value(&mut self) -> Result<Option<usize>, ParseError> {
        self.scan.reset_at(self.base);
        let mut scanp = 0;
        loop {
            while let Some(&b) = self.buf.get(scanp) {
                let action = self.scan.step(b);
                scanp += 1;
                match action {
                    // The byte that ended the value belongs to whatever
                    // follows it.
                    ScanAction::End => return Ok(Some(scanp - 1)),
                    // Don't block on the next read just to learn the
                    // value ended at this close bracket.
                    ScanAction::EndObject | ScanAction::EndArray | ScanAction::EndCtor
                        if self.scan.end_top() =>
                    {
                        return Ok(Some(scanp));
                    }
                    ScanAction::Error => return Err(self.scan.error()),
                    _ => {}
                }
            }

            if self.eof {
                if self.buf.iter().all(|b| b.is_ascii_whitespace()) {
                    crate::trace!(offset = self.base, "end of stream");
                    return Ok(None);
                }
                return match self.scan.eof() {
                    ScanAction::End => Ok(Some(scanp)),
                    _ => Err(self.scan.error()),
                };
            }
            self.refill()?;
        }
    }

    fn refill(&mut self) -> Result<(), ParseError> {
        let len = self.buf.len();
        let want = MIN_READ.max(self.buf.capacity() - len);
        self.buf.resize(len + want, 0);
        let read = loop {
            match self.reader.read(&mut self.buf[len..]) {
                Ok(n) => break n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.buf.truncate(len);
                    return Err(err.into());
                }
            }
        };
        self.buf.truncate(len + read);
        if read == 0 {
            self.eof = true;
        }
        crate::trace!(read, buffered = self.buf.len(), eof = self.eof, "refilled buffer");
        Ok(())
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Value, ParseError>;

    /// Yields each value, then `None`. After a syntax, truncation or I/O
    /// error has been yielded once the iterator is fused.
    fn next(&mut self) -> Option<Self::Item> {
        if self.err.is_some() {
            return None;
        }
        self.decode_next().transpose()
    }
}
