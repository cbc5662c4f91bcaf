use std::fmt::Write;

/// A named literal the scanner recognises in value position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Null,
    New,
    Undefined,
    True,
    False,
    BinData,
    Boolean,
    Date,
    DbRef,
    DbPointer,
    Infinity,
    IsoDate,
    MinKey,
    MaxKey,
    NaN,
    NumberInt,
    NumberLong,
    ObjectId,
    RegExp,
    Timestamp,
}

/// What the scanner accepts once a keyword has been fully matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Follow {
    /// The keyword is a complete value.
    End,
    /// An argument list must follow.
    Ctor,
    /// An argument list may follow.
    OptionalCtor,
    /// Whitespace and a constructor name must follow.
    New,
}

const KEYWORDS: [Keyword; 20] = [
    Keyword::Null,
    Keyword::New,
    Keyword::Undefined,
    Keyword::True,
    Keyword::False,
    Keyword::BinData,
    Keyword::Boolean,
    Keyword::Date,
    Keyword::DbRef,
    Keyword::DbPointer,
    Keyword::Infinity,
    Keyword::IsoDate,
    Keyword::MinKey,
    Keyword::MaxKey,
    Keyword::NaN,
    Keyword::NumberInt,
    Keyword::NumberLong,
    Keyword::ObjectId,
    Keyword::RegExp,
    Keyword::Timestamp,
];

impl Keyword {
    pub(crate) const fn text(self) -> &'static str {
        match self {
            Keyword::Null => "null",
            Keyword::New => "new",
            Keyword::Undefined => "undefined",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::BinData => "BinData",
            Keyword::Boolean => "Boolean",
            Keyword::Date => "Date",
            Keyword::DbRef => "DBRef",
            Keyword::DbPointer => "DBPointer",
            Keyword::Infinity => "Infinity",
            Keyword::IsoDate => "ISODate",
            Keyword::MinKey => "MinKey",
            Keyword::MaxKey => "MaxKey",
            Keyword::NaN => "NaN",
            Keyword::NumberInt => "NumberInt",
            Keyword::NumberLong => "NumberLong",
            Keyword::ObjectId => "ObjectId",
            Keyword::RegExp => "RegExp",
            Keyword::Timestamp => "Timestamp",
        }
    }

    pub(crate) const fn follow(self) -> Follow {
        match self {
            Keyword::Null | Keyword::True | Keyword::False | Keyword::NaN | Keyword::Infinity => {
                Follow::End
            }
            Keyword::Undefined | Keyword::MinKey | Keyword::MaxKey => Follow::OptionalCtor,
            Keyword::New => Follow::New,
            _ => Follow::Ctor,
        }
    }

    pub(crate) const fn is_constructor(self) -> bool {
        matches!(self.follow(), Follow::Ctor | Follow::OptionalCtor)
    }

    pub(crate) fn from_text(text: &[u8]) -> Option<Self> {
        KEYWORDS
            .iter()
            .copied()
            .find(|k| k.text().as_bytes() == text)
    }
}

/// What happened after feeding one more byte into the literal matcher?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but no keyword is finished yet.
    NeedMore,
    /// Byte matched *and* completed a keyword.
    Done(Keyword),
    /// Byte did **not** match any remaining candidate.
    Reject,
}

/// Matches a keyword one byte at a time.
///
/// `candidates` is a bit set over [`KEYWORDS`] holding every keyword whose
/// first `matched` bytes agree with the input so far. No keyword is a prefix
/// of another, so a fully matched candidate is always the only one left.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer {
    candidates: u32,
    matched: usize,
}

impl ExpectedLiteralBuffer {
    /// No literal is in flight.
    pub(crate) fn none() -> Self {
        Self::default()
    }

    /// Start matching after the *first* byte of a value.
    ///
    /// The result is inactive when no keyword starts with `first`.
    pub(crate) fn new(first: u8) -> Self {
        Self::filtered(first, |_| true)
    }

    /// Start matching after a sign, where only `NaN` and `Infinity` may
    /// follow.
    pub(crate) fn signed(first: u8) -> Self {
        Self::filtered(first, |k| matches!(k, Keyword::NaN | Keyword::Infinity))
    }

    fn filtered(first: u8, keep: impl Fn(Keyword) -> bool) -> Self {
        let candidates = KEYWORDS
            .iter()
            .enumerate()
            .filter(|(_, k)| k.text().as_bytes()[0] == first && keep(**k))
            .fold(0u32, |set, (i, _)| set | (1 << i));
        Self {
            candidates,
            matched: 1,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.candidates != 0
    }

    fn candidates(&self) -> impl Iterator<Item = Keyword> + '_ {
        KEYWORDS
            .iter()
            .enumerate()
            .filter(|(i, _)| self.candidates & (1 << *i) != 0)
            .map(|(_, k)| *k)
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub(crate) fn step(&mut self, b: u8) -> Step {
        let mut next = 0u32;
        for (i, keyword) in KEYWORDS.iter().enumerate() {
            if self.candidates & (1 << i) != 0
                && keyword.text().as_bytes().get(self.matched) == Some(&b)
            {
                next |= 1 << i;
            }
        }
        if next == 0 {
            // Keep the candidates around so the error can name them.
            return Step::Reject;
        }

        self.candidates = next;
        self.matched += 1;
        let finished = self
            .candidates()
            .find(|k| k.text().len() == self.matched);
        match finished {
            Some(keyword) => {
                *self = Self::none();
                Step::Done(keyword)
            }
            None => Step::NeedMore,
        }
    }

    /// Error context for a rejected byte: `in literal true (expecting 'r')`.
    pub(crate) fn describe(&self) -> String {
        let mut out = String::from("in literal ");
        let mut expected: Vec<u8> = Vec::new();
        for (i, keyword) in self.candidates().enumerate() {
            if i > 0 {
                out.push_str(" or ");
            }
            out.push_str(keyword.text());
            if let Some(&b) = keyword.text().as_bytes().get(self.matched) {
                if !expected.contains(&b) {
                    expected.push(b);
                }
            }
        }
        out.push_str(" (expecting ");
        for (i, b) in expected.iter().enumerate() {
            if i > 0 {
                out.push_str(" or ");
            }
            let _ = write!(out, "'{}'", *b as char);
        }
        out.push(')');
        out
    }
}
