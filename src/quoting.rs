//! Strict quote checking in front of the CSV reader.
//!
//! The `csv` crate accepts stray quotes and unterminated quoted fields. This
//! reader rejects them as the bytes go past, so the CSV reader sees an I/O error
//! instead of quietly producing mangled fields.

use std::io::{self, Read};

const BARE_QUOTE: &str = "bare \" in non-quoted field";
const EXTRANEOUS_QUOTE: &str = "extraneous or missing \" in quoted field";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    RecordStart,
    FieldStart,
    Unquoted,
    Quoted,
    /// A `"` seen inside a quoted field: either an escaped quote or the close.
    QuoteInQuoted,
    Comment,
}

/// Wraps a reader and fails on malformed quoting.
///
/// `#` at the start of a record opens a comment line, matching the reader's
/// `comment(Some(b'#'))` setting, and quotes inside comments are ignored.
pub struct QuoteCheck<R> {
    inner: R,
    state: State,
    line: u64,
    pending: Option<io::Error>,
}

impl<R: Read> QuoteCheck<R> {
    pub fn new(inner: R) -> Self {
        QuoteCheck {
            inner,
            state: State::RecordStart,
            line: 1,
            pending: None,
        }
    }

    fn error(&self, message: &str) -> io::Error {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("line {}: {}", self.line, message),
        )
    }

    fn step(&mut self, byte: u8) -> io::Result<()> {
        self.state = match (self.state, byte) {
            (State::Comment, b'\n') => State::RecordStart,
            (State::Comment, _) => State::Comment,
            (State::RecordStart, b'#') => State::Comment,
            (State::RecordStart | State::FieldStart, b'"') => State::Quoted,
            (State::Quoted, b'"') => State::QuoteInQuoted,
            (State::Quoted, _) => State::Quoted,
            (State::QuoteInQuoted, b'"') => State::Quoted,
            (State::Unquoted, b'"') => return Err(self.error(BARE_QUOTE)),
            (_, b',') => State::FieldStart,
            (_, b'\n' | b'\r') => State::RecordStart,
            (State::QuoteInQuoted, _) => return Err(self.error(EXTRANEOUS_QUOTE)),
            (_, _) => State::Unquoted,
        };
        if byte == b'\n' {
            self.line += 1;
        }
        Ok(())
    }
}

impl<R: Read> Read for QuoteCheck<R> {
    /// Hands out the bytes before a quoting error first, then the error itself.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(err) = self.pending.take() {
            return Err(err);
        }
        let n = self.inner.read(buf)?;
        if n == 0 && self.state == State::Quoted {
            return Err(self.error(EXTRANEOUS_QUOTE));
        }
        for (i, &byte) in buf[..n].iter().enumerate() {
            if let Err(err) = self.step(byte) {
                if i == 0 {
                    return Err(err);
                }
                self.pending = Some(err);
                return Ok(i);
            }
        }
        Ok(n)
    }
}
