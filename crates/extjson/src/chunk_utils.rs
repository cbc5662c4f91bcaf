use std::io::{self, Read};

/// A reader that hands out its payload in pieces of at most `chunk` bytes,
/// so that every read boundary a decoder might see can be exercised.
#[derive(Debug, Clone)]
pub struct ChunkedReader<'a> {
    rest: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkedReader<'a> {
    /// # Panics
    ///
    /// Panics if `chunk` is zero.
    #[must_use]
    pub fn new(payload: &'a [u8], chunk: usize) -> Self {
        assert!(chunk > 0);
        Self {
            rest: payload,
            chunk,
        }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.rest.len());
        let (head, tail) = self.rest.split_at(n);
        buf[..n].copy_from_slice(head);
        self.rest = tail;
        Ok(n)
    }
}
