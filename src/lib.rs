//! covkit: coverage stream filters
//!
//! Small tools for `samtools depth` and BEDGRAPH streams. The central piece is
//! coverage summation: arbitrary, unsorted intervals are folded into a sparse
//! per-chromosome difference array and swept into merged, non-overlapping
//! intervals with accumulated totals.
//!
//! # Example
//!
//! ```rust
//! use covkit::bed::BedGraphReader;
//! use covkit::commands::SumCommand;
//!
//! let input = "chr1\t10\t20\t5\nchr1\t20\t30\t5\nchr1\t30\t40\t3\n";
//! let mut out = Vec::new();
//! SumCommand::new()
//!     .run_streaming(BedGraphReader::new(input.as_bytes()), &mut out)
//!     .unwrap();
//! assert_eq!(out, b"chr1\t10\t30\t5\nchr1\t30\t40\t3\n");
//! ```

pub mod bed;
pub mod commands;
pub mod coverage_map;
pub mod genome;
pub mod interval;
pub mod streaming;

// Re-export commonly used types
pub use bed::{parse_records, BedError, BedGraphReader};
pub use coverage_map::{CoverageAggregator, DeltaMap, Sweep};
pub use genome::Genome;
pub use interval::CoverageInterval;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_sum_then_merge_is_stable() {
        use crate::bed::BedGraphReader;
        use crate::commands::{MergeCommand, SumCommand};

        let input = "chr1\t0\t10\t2\nchr1\t5\t20\t1\nchr1\t20\t30\t1\n";
        let mut summed = Vec::new();
        SumCommand::new()
            .run_streaming(BedGraphReader::new(input.as_bytes()), &mut summed)
            .unwrap();

        let mut merged = Vec::new();
        MergeCommand::new()
            .run_streaming(summed.as_slice(), &mut merged)
            .unwrap();

        assert_eq!(merged, summed);
    }

    #[test]
    fn test_count_then_merge_workflow() {
        use crate::commands::{CountCommand, MergeCommand};

        let depth = "chrM\t1\t0\t5\nchrM\t2\t3\t5\nchrM\t3\t1\t1\nchrM\t4\t0\t0\nchrM\t5\t0\t2\n";
        let mut counted = Vec::new();
        CountCommand::new()
            .run_streaming(depth.as_bytes(), &mut counted)
            .unwrap();

        let mut merged = Vec::new();
        MergeCommand::new()
            .run_streaming(counted.as_slice(), &mut merged)
            .unwrap();

        assert_eq!(
            String::from_utf8(merged).unwrap(),
            "chrM\t0\t1\t1\nchrM\t1\t3\t2\nchrM\t4\t5\t1\n"
        );
    }
}
