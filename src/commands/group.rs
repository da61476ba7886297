//! Group command implementation.
//!
//! Collects `key\tvalue` lines by key and writes one line per key:
//! `index\tkey\tvalue1 value2 ...`, keys in lexicographic order, index from 1.
//! Values keep their input order. Lines with fewer than two fields are
//! ignored.

use crate::bed::{open_input, BedError};
use crate::streaming::{tab_fields, BedWriter, LineReader};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

/// Key-grouping command.
#[derive(Debug, Clone, Default)]
pub struct GroupCommand;

impl GroupCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn run<W: Write>(
        &self,
        input: Option<&Path>,
        output: &mut W,
    ) -> Result<GroupStats, BedError> {
        self.run_streaming(open_input(input)?, output)
    }

    /// Read every `key\tvalue` pair into an ordered map.
    pub fn collect<R: Read>(&self, input: R) -> Result<BTreeMap<String, Vec<String>>, BedError> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut lines = LineReader::new(input);

        while let Some((_, line)) = lines.next_line()? {
            let fields = tab_fields(line.trim());
            if fields.len() < 2 {
                continue;
            }
            match groups.get_mut(fields[0]) {
                Some(values) => values.push(fields[1].to_string()),
                None => {
                    groups.insert(fields[0].to_string(), vec![fields[1].to_string()]);
                }
            }
        }

        Ok(groups)
    }

    pub fn run_streaming<R: Read, W: Write>(
        &self,
        input: R,
        output: &mut W,
    ) -> Result<GroupStats, BedError> {
        let groups = self.collect(input)?;
        let mut stats = GroupStats::default();
        let mut writer = BedWriter::new(output);

        for (index, (key, values)) in groups.iter().enumerate() {
            writer.write_int(index + 1)?;
            writer.write_tab()?;
            writer.write_bytes(key.as_bytes())?;
            writer.write_tab()?;
            writer.write_joined(values, b' ')?;

            stats.keys += 1;
            stats.values += values.len();
        }

        writer.flush()?;
        Ok(stats)
    }
}

/// Statistics from a group run.
#[derive(Debug, Clone, Default)]
pub struct GroupStats {
    /// Distinct keys written
    pub keys: usize,
    /// Values across all keys
    pub values: usize,
}

impl std::fmt::Display for GroupStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Keys: {}, Values: {}", self.keys, self.values)
    }
}
