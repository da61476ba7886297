//! Merge command implementation.
//!
//! Collapses runs of sorted BEDGRAPH records that share a chromosome and a
//! value and touch end-to-start into one record.
//!
//! # Algorithm
//!
//! Single pass, O(1) memory: keep the current run, extend its end while the
//! next record continues it, otherwise write it and start a new run.
//!
//! Fields are compared as text, exactly as they appear in the input, so
//! `5` and `05` are different values.

use crate::bed::{open_input, BedError};
use crate::streaming::{BedWriter, LineReader};
use std::io::{Read, Write};
use std::path::Path;

/// A run of touching records, stored as its input text.
#[derive(Debug, Clone)]
struct Run {
    chrom: String,
    start: String,
    end: String,
    value: String,
}

impl Run {
    fn from_fields(fields: &[&str]) -> Self {
        Self {
            chrom: fields[0].to_string(),
            start: fields[1].to_string(),
            end: fields[2].to_string(),
            value: fields[3].to_string(),
        }
    }

    #[inline]
    fn continues_with(&self, fields: &[&str]) -> bool {
        self.chrom == fields[0] && self.end == fields[1] && self.value == fields[3]
    }
}

/// Adjacent-interval merge command.
#[derive(Debug, Clone, Default)]
pub struct MergeCommand;

impl MergeCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn run<W: Write>(
        &self,
        input: Option<&Path>,
        output: &mut W,
    ) -> Result<MergeStats, BedError> {
        self.run_streaming(open_input(input)?, output)
    }

    pub fn run_streaming<R: Read, W: Write>(
        &self,
        input: R,
        output: &mut W,
    ) -> Result<MergeStats, BedError> {
        let mut stats = MergeStats::default();
        let mut lines = LineReader::new(input);
        let mut writer = BedWriter::new(output);
        let mut current: Option<Run> = None;

        while let Some((line_number, line)) = lines.next_line()? {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 4 {
                return Err(BedError::MalformedRecord {
                    line: line_number,
                    fields: fields.len(),
                    expected: "4",
                    content: line.to_string(),
                });
            }
            stats.intervals_read += 1;

            let continues = matches!(current, Some(ref run) if run.continues_with(&fields));
            if continues {
                if let Some(run) = current.as_mut() {
                    run.end.clear();
                    run.end.push_str(fields[2]);
                }
            } else if let Some(run) = current.replace(Run::from_fields(&fields)) {
                write_run(&mut writer, &run)?;
                stats.intervals_written += 1;
            }
        }

        if let Some(run) = current {
            write_run(&mut writer, &run)?;
            stats.intervals_written += 1;
        }

        writer.flush()?;
        Ok(stats)
    }
}

#[inline]
fn write_run<W: Write>(writer: &mut BedWriter<W>, run: &Run) -> Result<(), BedError> {
    writer.write_joined(&[&run.chrom, &run.start, &run.end, &run.value], b'\t')
}

/// Statistics from a merge run.
#[derive(Debug, Clone, Default)]
pub struct MergeStats {
    /// Number of records read
    pub intervals_read: usize,
    /// Number of merged records written
    pub intervals_written: usize,
}

impl MergeStats {
    /// Input records per output record.
    pub fn compression_ratio(&self) -> f64 {
        if self.intervals_written == 0 {
            0.0
        } else {
            self.intervals_read as f64 / self.intervals_written as f64
        }
    }
}

impl std::fmt::Display for MergeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Read: {}, Written: {}, Compression: {:.2}x",
            self.intervals_read,
            self.intervals_written,
            self.compression_ratio()
        )
    }
}
