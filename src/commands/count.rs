//! Count command implementation.
//!
//! Turns multi-sample `samtools depth` output into per-position counts of
//! samples with nonzero depth.
//!
//! Input:  `chrom  pos  depth_1  depth_2 ...` (1-based `pos`)
//! Output: `chrom  pos-1  pos  samples_with_coverage` (0-based, half-open)
//!
//! Positions where no sample has coverage are not written. Adjacent
//! positions are not merged here; pipe through `merge` for that.

use crate::bed::{open_input, BedError};
use crate::streaming::{parse_i64_fast, parse_u64_fast, tab_fields, BedWriter, LineReader};
use std::io::{Read, Write};
use std::path::Path;

/// Per-position sample coverage counter.
#[derive(Debug, Clone, Default)]
pub struct CountCommand;

impl CountCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn run<W: Write>(
        &self,
        input: Option<&Path>,
        output: &mut W,
    ) -> Result<CountStats, BedError> {
        self.run_streaming(open_input(input)?, output)
    }

    pub fn run_streaming<R: Read, W: Write>(
        &self,
        input: R,
        output: &mut W,
    ) -> Result<CountStats, BedError> {
        let mut stats = CountStats::default();
        let mut lines = LineReader::new(input);
        let mut writer = BedWriter::new(output);

        while let Some((line_number, line)) = lines.next_line()? {
            let line = line.trim();
            // samtools depth -H header
            if line.starts_with('#') {
                continue;
            }
            stats.positions_read += 1;

            let fields = tab_fields(line);
            if fields.len() < 2 {
                return Err(BedError::MalformedRecord {
                    line: line_number,
                    fields: fields.len(),
                    expected: "at least 2",
                    content: line.to_string(),
                });
            }

            let mut covered = 0u64;
            for depth in &fields[2..] {
                let depth = parse_i64_fast(depth.trim().as_bytes()).ok_or_else(|| BedError::Parse {
                    line: line_number,
                    message: format!("non-integer sample depth: '{}'", depth),
                })?;
                if depth != 0 {
                    covered += 1;
                }
            }
            if covered == 0 {
                continue;
            }

            let pos = parse_u64_fast(fields[1].trim().as_bytes())
                .filter(|&p| p >= 1)
                .ok_or_else(|| BedError::Parse {
                    line: line_number,
                    message: format!("invalid 1-based position: '{}'", fields[1]),
                })?;

            writer.write_bedgraph_line(fields[0].as_bytes(), pos - 1, pos, covered)?;
            stats.positions_written += 1;
        }

        writer.flush()?;
        Ok(stats)
    }
}

/// Statistics from a count run.
#[derive(Debug, Clone, Default)]
pub struct CountStats {
    /// Depth lines read
    pub positions_read: usize,
    /// Positions with at least one covered sample
    pub positions_written: usize,
}

impl std::fmt::Display for CountStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Read: {}, Covered: {}",
            self.positions_read, self.positions_written
        )
    }
}
