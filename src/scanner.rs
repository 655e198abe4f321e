use std::ops::Range;

use crate::{
    error::{Error, ParseErrorKind, Result},
    swar::ByteSearch,
};

/// One line of input, borrowed from the mapped buffer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Record<'a> {
    /// Absolute byte offset of the first byte of the line.
    pub offset: usize,
    pub name: &'a [u8],
    pub temperature: &'a [u8],
}

/// Lazily splits one byte range into records without copying.
///
/// The range is expected to start on a line boundary; the partitioner
/// guarantees that. A final line without `\n` is closed by the end of the
/// range.
#[derive(Clone, Debug)]
pub struct Section<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Section<'a> {
    pub fn new(buf: &'a [u8], range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end && range.end <= buf.len());
        Self {
            buf,
            pos: range.start,
            end: range.end,
        }
    }

    pub fn whole(buf: &'a [u8]) -> Self {
        Self::new(buf, 0..buf.len())
    }
}

impl<'a> Iterator for Section<'a> {
    type Item = Result<Record<'a>>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }

        let offset = self.pos;
        let rest = &self.buf[offset..self.end];
        let line_len = rest.position_of(b'\n').unwrap_or(rest.len());
        self.pos = offset + line_len + 1;

        let line = match &rest[..line_len] {
            [line @ .., b'\r'] => line,
            line => line,
        };
        if line.is_empty() {
            return Some(Err(Error::parse(offset, ParseErrorKind::EmptyLine)));
        }

        let Some(semi) = line.position_of(b';') else {
            return Some(Err(Error::parse(offset, ParseErrorKind::MissingDelimiter)));
        };

        Some(Ok(Record {
            offset,
            name: &line[..semi],
            temperature: &line[semi + 1..],
        }))
    }
}
