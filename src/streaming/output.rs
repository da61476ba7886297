//! Buffered output for coverage records.
//!
//! Integers are formatted with itoa to keep the emit loop free of
//! per-record allocation.

use crate::bed::BedError;
use crate::streaming::buffers::DEFAULT_OUTPUT_BUFFER;
use std::io::{BufWriter, Write};

/// Tab-delimited output writer.
pub struct BedWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> BedWriter<W> {
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write `chrom\tstart\tend\tvalue\n`.
    #[inline]
    pub fn write_bedgraph_line<I: itoa::Integer>(
        &mut self,
        chrom: &[u8],
        start: u64,
        end: u64,
        value: I,
    ) -> Result<(), BedError> {
        self.writer.write_all(chrom)?;
        self.writer.write_all(b"\t")?;
        self.write_int(start)?;
        self.writer.write_all(b"\t")?;
        self.write_int(end)?;
        self.writer.write_all(b"\t")?;
        self.write_int(value)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write fields joined by `sep`, followed by a newline.
    #[inline]
    pub fn write_joined<S: AsRef<[u8]>>(&mut self, fields: &[S], sep: u8) -> Result<(), BedError> {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(&[sep])?;
            }
            self.writer.write_all(field.as_ref())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write a full line as-is with newline.
    #[inline]
    pub fn write_line(&mut self, line: &[u8]) -> Result<(), BedError> {
        self.writer.write_all(line)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BedError> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    #[inline]
    pub fn write_tab(&mut self) -> Result<(), BedError> {
        self.writer.write_all(b"\t")?;
        Ok(())
    }

    /// Write an integer using itoa.
    #[inline]
    pub fn write_int<I: itoa::Integer>(&mut self, n: I) -> Result<(), BedError> {
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), BedError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bedgraph_line() {
        let mut output = Vec::new();
        {
            let mut writer = BedWriter::new(&mut output);
            writer.write_bedgraph_line(b"chr1", 100, 200, -3i64).unwrap();
            writer.write_bedgraph_line(b"chr2", 0, 1, 2usize).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, b"chr1\t100\t200\t-3\nchr2\t0\t1\t2\n");
    }

    #[test]
    fn test_write_joined() {
        let mut output = Vec::new();
        {
            let mut writer = BedWriter::new(&mut output);
            writer.write_joined(&["chr1", "10", "20", "5"], b'\t').unwrap();
            writer.write_joined(&["a", "b"], b' ').unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, b"chr1\t10\t20\t5\na b\n");
    }

    #[test]
    fn test_write_int_then_tab() {
        let mut output = Vec::new();
        {
            let mut writer = BedWriter::new(&mut output);
            writer.write_int(7u32).unwrap();
            writer.write_tab().unwrap();
            writer.write_line(b"chrX").unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, b"7\tchrX\n");
    }
}
