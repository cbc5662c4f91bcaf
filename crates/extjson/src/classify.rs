//! First-byte dispatch of a literal span the scanner delimited.
use crate::literal_buffer::Keyword;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal<'a> {
    /// `"…"` or `'…'`.
    Quoted,
    /// Decimal, hex, or signed `NaN`/`Infinity`.
    Number,
    /// `/pattern/options`.
    Regex,
    Keyword(Keyword),
    /// `new` followed by whitespace and a keyword.
    New(Keyword),
    /// Unquoted string value.
    BareWord(&'a str),
}

/// Classifies `span`. Returns `None` for spans the scanner never produces.
pub(crate) fn classify(span: &[u8]) -> Option<Literal<'_>> {
    let first = *span.first()?;
    match first {
        b'"' | b'\'' => Some(Literal::Quoted),
        b'+' | b'-' | b'.' | b'0'..=b'9' => Some(Literal::Number),
        b'/' => Some(Literal::Regex),
        _ => {
            if let Some(keyword) = Keyword::from_text(span) {
                return Some(Literal::Keyword(keyword));
            }
            if let Some(rest) = span.strip_prefix(b"new") {
                let name = rest.trim_ascii_start();
                if name.len() < rest.len() {
                    return Keyword::from_text(name).map(Literal::New);
                }
            }
            if span
                .iter()
                .all(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$')
            {
                return core::str::from_utf8(span).ok().map(Literal::BareWord);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_first_byte() {
        assert_eq!(classify(b"'a'"), Some(Literal::Quoted));
        assert_eq!(classify(b"-0x1f"), Some(Literal::Number));
        assert_eq!(classify(b"-Infinity"), Some(Literal::Number));
        assert_eq!(classify(b".5"), Some(Literal::Number));
        assert_eq!(classify(b"/a/i"), Some(Literal::Regex));
        assert_eq!(classify(b"NaN"), Some(Literal::Keyword(Keyword::NaN)));
        assert_eq!(classify(b"Date"), Some(Literal::Keyword(Keyword::Date)));
    }

    #[test]
    fn new_prefix() {
        assert_eq!(classify(b"new Date"), Some(Literal::New(Keyword::Date)));
        assert_eq!(
            classify(b"new \t ObjectId"),
            Some(Literal::New(Keyword::ObjectId))
        );
        assert_eq!(classify(b"new NaN"), Some(Literal::New(Keyword::NaN)));
        assert_eq!(classify(b"newish"), Some(Literal::BareWord("newish")));
    }

    #[test]
    fn bare_words() {
        assert_eq!(classify(b"abc_1$"), Some(Literal::BareWord("abc_1$")));
        assert_eq!(classify(b""), None);
        assert_eq!(classify(b"a b"), None);
    }
}
