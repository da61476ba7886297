//! Numbered line reader shared by every command.

use crate::bed::{BedError, Result};
use crate::streaming::buffers::{DEFAULT_INPUT_BUFFER, DEFAULT_LINE_BUFFER};
use std::io::{BufRead, BufReader, Read};

/// Reads lines into a reused buffer, tracking 1-based line numbers.
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(DEFAULT_INPUT_BUFFER, reader)
    }

    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            buffer: Vec::with_capacity(DEFAULT_LINE_BUFFER),
            line_number: 0,
        }
    }

    /// Next `(line_number, line)` with the terminator (`\n` or `\r\n`) removed.
    ///
    /// A line that is not valid UTF-8 is a parse error naming that line.
    pub fn next_line(&mut self) -> Result<Option<(usize, &str)>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut bytes = self.buffer.as_slice();
        if let Some(rest) = bytes.strip_suffix(b"\n") {
            bytes = rest;
        }
        if let Some(rest) = bytes.strip_suffix(b"\r") {
            bytes = rest;
        }
        let line = std::str::from_utf8(bytes).map_err(|e| BedError::Parse {
            line: self.line_number,
            message: format!("invalid UTF-8 at byte {}", e.valid_up_to()),
        })?;
        Ok(Some((self.line_number, line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_terminators_and_counts() {
        let mut reader = LineReader::new("a\tb\r\n\nlast".as_bytes());
        assert_eq!(reader.next_line().unwrap(), Some((1, "a\tb")));
        assert_eq!(reader.next_line().unwrap(), Some((2, "")));
        assert_eq!(reader.next_line().unwrap(), Some((3, "last")));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_names_line() {
        let input: &[u8] = b"chr1\t0\t10\t1\nchr\xff\t0\t10\t1\n";
        let mut reader = LineReader::new(input);
        assert!(reader.next_line().unwrap().is_some());
        match reader.next_line().unwrap_err() {
            BedError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("UTF-8"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
