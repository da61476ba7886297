//! Chroms command implementation.
//!
//! Lists reference sequence names from a SAM header
//! (`samtools view -H in.bam | covkit chroms`). Every `SN:` field of an
//! `@SQ` line is written, one name per line. Reading stops at the first
//! line that does not start with `@`.

use crate::bed::{open_input, BedError};
use crate::streaming::{tab_fields, BedWriter, LineReader};
use std::io::{Read, Write};
use std::path::Path;

const SEQUENCE_RECORD: &str = "@SQ";
const SEQUENCE_NAME_TAG: &str = "SN:";

/// Header chromosome extractor.
#[derive(Debug, Clone, Default)]
pub struct ChromsCommand;

impl ChromsCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn run<W: Write>(&self, input: Option<&Path>, output: &mut W) -> Result<usize, BedError> {
        self.run_streaming(open_input(input)?, output)
    }

    /// Returns the number of names written.
    pub fn run_streaming<R: Read, W: Write>(
        &self,
        input: R,
        output: &mut W,
    ) -> Result<usize, BedError> {
        let mut lines = LineReader::new(input);
        let mut writer = BedWriter::new(output);
        let mut written = 0;

        while let Some((_, line)) = lines.next_line()? {
            if !line.starts_with('@') {
                break;
            }
            if !line.starts_with(SEQUENCE_RECORD) {
                continue;
            }
            for field in tab_fields(line.trim()) {
                if let Some(name) = field.strip_prefix(SEQUENCE_NAME_TAG) {
                    writer.write_line(name.as_bytes())?;
                    written += 1;
                }
            }
        }

        writer.flush()?;
        Ok(written)
    }
}
