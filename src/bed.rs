//! Streaming BEDGRAPH record reader.
//!
//! Accepts the three record shapes produced by coverage tools:
//!
//! - BED3: `chrom start end` (value 1)
//! - BEDGRAPH: `chrom start end value`
//! - BED6: `chrom start end name value strand` (value from the score column)

use crate::interval::CoverageInterval;
use crate::streaming::parsing::{parse_i64_fast, parse_u64_fast, tab_fields};
use crate::streaming::LineReader;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by every covkit command.
#[derive(Error, Debug)]
pub enum BedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Malformed record at line {line}: expected {expected} fields, got {fields}: '{content}'")]
    MalformedRecord {
        line: usize,
        fields: usize,
        expected: &'static str,
        content: String,
    },

    #[error("Could not read genome file '{}': {source}", .path.display())]
    GenomeFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed genome file '{}' at line {line}: {message}", .path.display())]
    GenomeFormat {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl BedError {
    /// True when the error is the downstream reader closing the pipe.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, BedError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

pub type Result<T> = std::result::Result<T, BedError>;

/// Open `path` for reading, or stdin when the path is absent or `-`.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(p) if p != Path::new("-") => Ok(Box::new(File::open(p)?)),
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// A streaming BEDGRAPH reader.
pub struct BedGraphReader<R: Read> {
    lines: LineReader<R>,
}

impl<R: Read> BedGraphReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
        }
    }

    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            lines: LineReader::with_capacity(capacity, reader),
        }
    }

    /// Read the next coverage record, skipping blank lines.
    ///
    /// Every other line is a record; header lines are rejected like any
    /// other malformed input.
    pub fn read_record(&mut self) -> Result<Option<CoverageInterval>> {
        while let Some((line_number, line)) = self.lines.next_line()? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return parse_record(line, line_number).map(Some);
        }
        Ok(None)
    }

    pub fn records(self) -> BedGraphRecordIter<R> {
        BedGraphRecordIter { reader: self }
    }
}

/// Parse one trimmed, non-empty BEDGRAPH line.
///
/// Numeric fields may carry surrounding spaces.
pub fn parse_record(line: &str, line_number: usize) -> Result<CoverageInterval> {
    let fields = tab_fields(line);

    let value_field = match fields.len() {
        3 => None,
        4 => Some(fields[3]),
        6 => Some(fields[4]),
        n => {
            return Err(BedError::MalformedRecord {
                line: line_number,
                fields: n,
                expected: "3, 4 or 6",
                content: line.to_string(),
            })
        }
    };

    let start = parse_position(fields[1], "start", line_number)?;
    let end = parse_position(fields[2], "end", line_number)?;
    let value = match value_field {
        Some(v) => parse_i64_fast(v.trim().as_bytes()).ok_or_else(|| BedError::Parse {
            line: line_number,
            message: format!("Invalid coverage value: '{}'", v),
        })?,
        None => 1,
    };

    Ok(CoverageInterval::new(fields[0], start, end, i128::from(value)))
}

fn parse_position(s: &str, field_name: &str, line_number: usize) -> Result<u64> {
    parse_u64_fast(s.trim().as_bytes()).ok_or_else(|| BedError::Parse {
        line: line_number,
        message: format!("Invalid {} position: '{}'", field_name, s),
    })
}

/// Iterator over BEDGRAPH records.
pub struct BedGraphRecordIter<R: Read> {
    reader: BedGraphReader<R>,
}

impl<R: Read> Iterator for BedGraphRecordIter<R> {
    type Item = Result<CoverageInterval>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Parse coverage records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<CoverageInterval>> {
    BedGraphReader::new(content.as_bytes()).records().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bed3_defaults_to_one() {
        let records = parse_records("chr1\t0\t10\n").unwrap();
        assert_eq!(records, vec![CoverageInterval::new("chr1", 0, 10, 1)]);
    }

    #[test]
    fn test_parse_bedgraph() {
        let records = parse_records("chr1\t10\t20\t-7\n").unwrap();
        assert_eq!(records[0].value, -7);
    }

    #[test]
    fn test_parse_bed6_takes_score_column() {
        let records = parse_records("chr1\t5\t15\tfeatA\t2\t+\n").unwrap();
        assert_eq!(records, vec![CoverageInterval::new("chr1", 5, 15, 2)]);
    }

    #[test]
    fn test_skip_blank_lines() {
        let content = "\n  \nchr1\t1\t2\t3\r\n\n";
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, 3);
    }

    #[test]
    fn test_header_lines_are_rejected() {
        let err = parse_records("#chrom\tstart\tend\tvalue\nchr1\t0\t10\t1\n").unwrap_err();
        assert!(matches!(err, BedError::Parse { line: 1, .. }));

        let err = parse_records("track type=bedGraph\nchr1\t0\t10\t1\n").unwrap_err();
        assert!(matches!(err, BedError::MalformedRecord { line: 1, fields: 1, .. }));
    }

    #[test]
    fn test_header_like_chromosome_names_are_records() {
        let records = parse_records("tracking_contig\t0\t10\t4\nbrowser_scaffold\t0\t5\n").unwrap();
        assert_eq!(
            records,
            vec![
                CoverageInterval::new("tracking_contig", 0, 10, 4),
                CoverageInterval::new("browser_scaffold", 0, 5, 1),
            ]
        );
    }

    #[test]
    fn test_numeric_fields_may_be_padded() {
        let records = parse_records("chr1\t 5\t15 \t +2 \n").unwrap();
        assert_eq!(records, vec![CoverageInterval::new("chr1", 5, 15, 2)]);
    }

    #[test]
    fn test_extreme_values_parse() {
        let records = parse_records("chr1\t0\t10\t-9223372036854775808\n").unwrap();
        assert_eq!(records[0].value, i128::from(i64::MIN));
        assert!(parse_records("chr1\t0\t10\t9223372036854775808\n").is_err());
    }

    #[test]
    fn test_five_fields_is_malformed() {
        let err = parse_records("chr1\t1\t2\n\nchr1\t1\t2\tx\t5\n").unwrap_err();
        match err {
            BedError::MalformedRecord { line, fields, .. } => {
                assert_eq!(line, 3);
                assert_eq!(fields, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_float_value_is_parse_error() {
        let err = parse_records("chr1\t1\t2\t1.5\n").unwrap_err();
        assert!(matches!(err, BedError::Parse { line: 1, .. }));
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_negative_start_is_parse_error() {
        let err = parse_records("chr1\t-1\t2\n").unwrap_err();
        assert!(err.to_string().contains("Invalid start position"));
    }

    #[test]
    fn test_broken_pipe_detection() {
        let err = BedError::Io(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(err.is_broken_pipe());
        let err = BedError::Io(io::Error::from(io::ErrorKind::NotFound));
        assert!(!err.is_broken_pipe());
    }
}
