//! Coverage interval type.

use std::fmt;

/// A genomic interval carrying a signed coverage value.
/// Uses 0-based, half-open coordinates (BED format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoverageInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    /// Parsed as `i64`; widened so that sums of many records fit.
    pub value: i128,
}

impl CoverageInterval {
    #[inline]
    pub fn new(chrom: impl Into<String>, start: u64, end: u64, value: i128) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            value,
        }
    }
}

impl fmt::Display for CoverageInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bedgraph() {
        let iv = CoverageInterval::new("chr1", 10, 30, -5);
        assert_eq!(iv.to_string(), "chr1\t10\t30\t-5");
    }

    #[test]
    fn test_display_wide_value() {
        let iv = CoverageInterval::new("chr1", 0, 1, 2 * i128::from(i64::MAX));
        assert_eq!(iv.to_string(), "chr1\t0\t1\t18446744073709551614");
    }
}
