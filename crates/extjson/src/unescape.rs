//! Decoding of quoted string and regex literal spans.
//!
//! Both decoders assume the scanner already accepted the span. Invalid UTF-8
//! and unpaired surrogate escapes decode to U+FFFD rather than failing.
use bstr::ByteSlice;

const REPLACEMENT: char = '\u{FFFD}';

/// Reads the four hex digits of a `\uXXXX` escape starting at `digits[0]`.
fn hex4(digits: &[u8]) -> Option<u16> {
    let digits = digits.get(..4)?;
    digits.iter().try_fold(0u16, |acc, b| {
        let nibble = char::from(*b).to_digit(16)?;
        #[allow(clippy::cast_possible_truncation)]
        Some((acc << 4) | nibble as u16)
    })
}

/// Decodes the escape whose `u` sits at `rest[0]`, consuming a following
/// low surrogate escape when the first one is a high surrogate.
///
/// Returns the character and the number of bytes consumed after the
/// backslash.
fn unicode_escape(rest: &[u8]) -> Option<(char, usize)> {
    let first = hex4(&rest[1..])?;
    if !(0xD800..0xE000).contains(&first) {
        return Some((char::from_u32(u32::from(first))?, 5));
    }
    if first < 0xDC00 && rest.get(5..7) == Some(&b"\\u"[..]) {
        if let Some(second) = hex4(&rest[7..]) {
            if (0xDC00..0xE000).contains(&second) {
                let code = 0x10000
                    + ((u32::from(first) - 0xD800) << 10)
                    + (u32::from(second) - 0xDC00);
                return Some((char::from_u32(code).unwrap_or(REPLACEMENT), 11));
            }
        }
    }
    Some((REPLACEMENT, 5))
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut tmp = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
}

/// Unquotes a `"…"` or `'…'` span, resolving every escape.
pub(crate) fn unquote(span: &[u8]) -> Option<String> {
    let (&quote, rest) = span.split_first()?;
    let body = rest.strip_suffix(&[quote])?;
    if !body.contains(&b'\\') {
        return Some(body.to_str_lossy().into_owned());
    }

    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        let b = body[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }
        let escaped = *body.get(i + 1)?;
        i += 2;
        match escaped {
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'\\' | b'/' | b'"' | b'\'' => out.push(escaped),
            b'u' => {
                let (c, used) = unicode_escape(&body[i - 1..])?;
                push_char(&mut out, c);
                i += used - 1;
            }
            _ => return None,
        }
    }
    Some(out.to_str_lossy().into_owned())
}

/// Decodes the pattern of a `/pattern/` literal.
///
/// `\/` becomes `/` and `\uXXXX` is resolved; every other escape is kept
/// verbatim for the regex engine.
pub(crate) fn regex_pattern(raw: &[u8]) -> String {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let b = raw[i];
        if b != b'\\' || i + 1 == raw.len() {
            out.push(b);
            i += 1;
            continue;
        }
        match raw[i + 1] {
            b'/' => {
                out.push(b'/');
                i += 2;
            }
            b'u' => match unicode_escape(&raw[i + 1..]) {
                Some((c, used)) => {
                    push_char(&mut out, c);
                    i += 1 + used;
                }
                None => {
                    out.extend_from_slice(&raw[i..i + 2]);
                    i += 2;
                }
            },
            other => {
                out.push(b'\\');
                out.push(other);
                i += 2;
            }
        }
    }
    out.to_str_lossy().into_owned()
}
