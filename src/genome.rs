//! Genome length table.
//!
//! Parses `.genome` / `.fai`-style files (tab-delimited: chrom\tlength).
//! Columns after the second are ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::bed::BedError;
use crate::streaming::parsing::{parse_u64_fast, tab_fields};

/// Chromosome lengths, in file order.
#[derive(Debug, Clone, Default)]
pub struct Genome {
    sizes: HashMap<String, u64>,
    order: Vec<String>,
}

impl Genome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a genome file. Any read failure names the path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BedError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BedError::GenomeFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    /// Parse a genome table from any reader; `path` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self, BedError> {
        let mut genome = Self::new();

        for (line_num, line_result) in BufReader::new(reader).lines().enumerate() {
            let line = line_result.map_err(|source| BedError::GenomeFile {
                path: path.to_path_buf(),
                source,
            })?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields = tab_fields(line);
            if fields.len() < 2 {
                return Err(BedError::GenomeFormat {
                    path: path.to_path_buf(),
                    line: line_num + 1,
                    message: format!("expected chrom and length columns: '{}'", line),
                });
            }

            let size = parse_u64_fast(fields[1].trim().as_bytes()).ok_or_else(|| {
                BedError::GenomeFormat {
                    path: path.to_path_buf(),
                    line: line_num + 1,
                    message: format!("invalid chromosome length: '{}'", fields[1]),
                }
            })?;

            genome.insert(fields[0].to_string(), size);
        }

        Ok(genome)
    }

    /// Iterate `(chrom, length)` in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order
            .iter()
            .map(move |chrom| (chrom.as_str(), self.sizes[chrom]))
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Insert a chromosome length. A repeated name keeps its first position
    /// and takes the last length.
    pub fn insert(&mut self, chrom: String, size: u64) {
        if !self.sizes.contains_key(&chrom) {
            self.order.push(chrom.clone());
        }
        self.sizes.insert(chrom, size);
    }
}
