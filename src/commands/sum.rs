//! Sum command implementation.
//!
//! Aggregates BEDGRAPH-like intervals into merged, non-overlapping
//! intervals carrying the total coverage of every overlapping input.
//!
//! # Algorithm
//!
//! 1. Fold each record into its chromosome's sparse delta map
//!    (`+value` at start, `-value` at end)
//! 2. Optionally seed coordinates 0 and length from a genome file
//! 3. Per chromosome, in lexicographic order: drop zero deltas, sort the
//!    coordinates and sweep a running sum, writing every nonzero stretch
//!
//! # Memory Complexity
//!
//! O(distinct interval boundaries). Input does not need to be sorted.

use crate::bed::{open_input, BedError, BedGraphReader};
use crate::coverage_map::{CoverageAggregator, Sweep};
use crate::genome::Genome;
use crate::streaming::{BedWriter, DEFAULT_INPUT_BUFFER};
use log::debug;
use std::io::{Read, Write};
use std::path::Path;

/// Coverage summation command.
#[derive(Debug, Clone, Default)]
pub struct SumCommand {
    /// Chromosome lengths used to seed boundary coordinates
    pub genome: Option<Genome>,
}

impl SumCommand {
    pub fn new() -> Self {
        Self { genome: None }
    }

    pub fn with_genome(mut self, genome: Genome) -> Self {
        self.genome = Some(genome);
        self
    }

    /// Aggregate a file, or stdin when `input` is None.
    pub fn run<W: Write>(&self, input: Option<&Path>, output: &mut W) -> Result<SumStats, BedError> {
        let reader = BedGraphReader::with_capacity(open_input(input)?, DEFAULT_INPUT_BUFFER);
        self.run_streaming(reader, output)
    }

    /// Ingest every record, then apply genome boundaries.
    ///
    /// Any malformed record aborts before anything is written.
    pub fn aggregate<R: Read>(
        &self,
        reader: BedGraphReader<R>,
    ) -> Result<CoverageAggregator, BedError> {
        let mut aggregator = CoverageAggregator::new();
        for result in reader.records() {
            aggregator.add(&result?);
        }
        if let Some(ref genome) = self.genome {
            aggregator.extend_boundaries(genome);
        }
        Ok(aggregator)
    }

    pub fn run_streaming<R: Read, W: Write>(
        &self,
        reader: BedGraphReader<R>,
        output: &mut W,
    ) -> Result<SumStats, BedError> {
        let aggregator = self.aggregate(reader)?;

        let mut stats = SumStats {
            records_read: aggregator.records(),
            chromosomes: aggregator.chromosomes().len(),
            coordinates: aggregator.coordinates(),
            ..Default::default()
        };

        let mut writer = BedWriter::new(output);
        for (chrom, map) in aggregator.into_sorted() {
            let events = map.into_events();
            stats.events += events.len();

            let mut written = 0usize;
            for (start, end, coverage) in Sweep::new(events.into_iter()) {
                writer.write_bedgraph_line(chrom.as_bytes(), start, end, coverage)?;
                written += 1;
            }
            debug!("{}: {} intervals", chrom, written);
            stats.intervals_written += written;
        }

        writer.flush()?;
        Ok(stats)
    }
}

/// Statistics from a sum run.
#[derive(Debug, Clone, Default)]
pub struct SumStats {
    /// Input records accumulated
    pub records_read: usize,
    /// Chromosomes registered (input plus genome file)
    pub chromosomes: usize,
    /// Distinct coordinates before zero-delta pruning
    pub coordinates: usize,
    /// Coordinates left after pruning
    pub events: usize,
    /// Merged intervals written
    pub intervals_written: usize,
}

impl std::fmt::Display for SumStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Read: {}, Chromosomes: {}, Coordinates: {} ({} after pruning), Written: {}",
            self.records_read,
            self.chromosomes,
            self.coordinates,
            self.events,
            self.intervals_written
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_sum(cmd: &SumCommand, content: &str) -> Result<(String, SumStats), BedError> {
        let reader = BedGraphReader::new(content.as_bytes());
        let mut output = Vec::new();
        let stats = cmd.run_streaming(reader, &mut output)?;
        Ok((String::from_utf8(output).unwrap(), stats))
    }

    #[test]
    fn test_merges_adjacent_equal_values() {
        let (out, stats) = run_sum(
            &SumCommand::new(),
            "chr1\t10\t20\t5\nchr1\t20\t30\t5\nchr1\t30\t40\t3\n",
        )
        .unwrap();
        assert_eq!(out, "chr1\t10\t30\t5\nchr1\t30\t40\t3\n");
        assert_eq!(stats.records_read, 3);
        assert_eq!(stats.coordinates, 4);
        assert_eq!(stats.events, 3);
        assert_eq!(stats.intervals_written, 2);
    }

    #[test]
    fn test_bed3_and_bed6_inputs() {
        let (out, _) = run_sum(&SumCommand::new(), "chr1\t0\t10\n").unwrap();
        assert_eq!(out, "chr1\t0\t10\t1\n");

        let (out, _) = run_sum(&SumCommand::new(), "chr1\t5\t15\tfeatA\t2\t+\n").unwrap();
        assert_eq!(out, "chr1\t5\t15\t2\n");
    }

    #[test]
    fn test_mixed_shapes_accumulate() {
        let content = "chr1\t0\t10\nchr1\t5\t15\t4\nchr1\t0\t15\tx\t-1\t-\n";
        let (out, _) = run_sum(&SumCommand::new(), content).unwrap();
        assert_eq!(out, "chr1\t5\t10\t4\nchr1\t10\t15\t3\n");
    }

    #[test]
    fn test_same_coordinates_on_different_chromosomes() {
        let (out, _) =
            run_sum(&SumCommand::new(), "chr2\t0\t10\t1\nchr1\t0\t10\t1\n").unwrap();
        assert_eq!(out, "chr1\t0\t10\t1\nchr2\t0\t10\t1\n");
    }

    #[test]
    fn test_genome_only_chromosome_emits_nothing() {
        let mut genome = Genome::new();
        genome.insert("chr2".to_string(), 1000);
        let cmd = SumCommand::new().with_genome(genome);

        let (out, stats) = run_sum(&cmd, "chr1\t0\t10\t1\n").unwrap();
        assert_eq!(out, "chr1\t0\t10\t1\n");
        assert_eq!(stats.chromosomes, 2);
    }

    #[test]
    fn test_malformed_record_writes_nothing() {
        let cmd = SumCommand::new();
        let reader = BedGraphReader::new("chr1\t0\t10\nchr1\t1\t2\ta\t5\n".as_bytes());
        let mut output = Vec::new();
        let err = cmd.run_streaming(reader, &mut output).unwrap_err();
        assert!(matches!(err, BedError::MalformedRecord { fields: 5, line: 2, .. }));
        assert!(output.is_empty());
    }

    #[test]
    fn test_cancelling_intervals() {
        let (out, _) = run_sum(&SumCommand::new(), "chr1\t0\t10\t2\nchr1\t0\t10\t-2\n").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let (out, stats) = run_sum(&SumCommand::new(), "").unwrap();
        assert!(out.is_empty());
        assert_eq!(stats.records_read, 0);
    }

    #[test]
    fn test_extreme_values_sum_exactly() {
        let (out, _) = run_sum(&SumCommand::new(), "chr1\t0\t10\t-9223372036854775808\n").unwrap();
        assert_eq!(out, "chr1\t0\t10\t-9223372036854775808\n");

        let content = "chr1\t0\t10\t9223372036854775807\nchr1\t5\t20\t9223372036854775807\n";
        let (out, _) = run_sum(&SumCommand::new(), content).unwrap();
        assert_eq!(
            out,
            "chr1\t0\t5\t9223372036854775807\n\
             chr1\t5\t10\t18446744073709551614\n\
             chr1\t10\t20\t9223372036854775807\n"
        );
    }

    #[test]
    fn test_header_like_contigs_are_aggregated() {
        let (out, _) = run_sum(
            &SumCommand::new(),
            "tracking_contig\t0\t10\t4\nbrowser_scaffold\t0\t5\n",
        )
        .unwrap();
        assert_eq!(out, "browser_scaffold\t0\t5\t1\ntracking_contig\t0\t10\t4\n");
    }

    #[test]
    fn test_comment_header_aborts() {
        let reader = BedGraphReader::new("#chrom\tstart\tend\tvalue\nchr1\t0\t10\t1\n".as_bytes());
        let mut output = Vec::new();
        let err = SumCommand::new().run_streaming(reader, &mut output).unwrap_err();
        assert!(matches!(err, BedError::Parse { line: 1, .. }));
        assert!(output.is_empty());
    }
}
