//! Sparse difference-array coverage aggregation.
//!
//! Every interval `[start, end)` with value `v` contributes `+v` at `start`
//! and `-v` at `end` of its chromosome's [`DeltaMap`]. Summing the deltas in
//! coordinate order reconstructs the aggregate coverage as a step function,
//! so memory grows with the number of interval boundaries rather than with
//! chromosome length.
//!
//! Input values are `i64`; deltas and running sums are kept in `i128`, which
//! cannot overflow for any realistic number of records.
//!
//! # Example
//!
//! ```
//! use covkit::coverage_map::CoverageAggregator;
//!
//! let mut agg = CoverageAggregator::new();
//! agg.add_interval("chr1", 10, 20, 5);
//! agg.add_interval("chr1", 20, 30, 5);
//! agg.add_interval("chr1", 30, 40, 3);
//!
//! let out: Vec<String> = agg.into_intervals().iter().map(|iv| iv.to_string()).collect();
//! assert_eq!(out, vec!["chr1\t10\t30\t5", "chr1\t30\t40\t3"]);
//! ```

use crate::genome::Genome;
use crate::interval::CoverageInterval;
use rustc_hash::FxHashMap;

/// Coordinate -> signed coverage delta for one chromosome.
#[derive(Debug, Clone, Default)]
pub struct DeltaMap {
    deltas: FxHashMap<u64, i128>,
}

impl DeltaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` at `pos`, starting from 0 if the coordinate is new.
    #[inline]
    pub fn add(&mut self, pos: u64, delta: i128) {
        *self.deltas.entry(pos).or_insert(0) += delta;
    }

    /// Fold one interval into the map.
    #[inline]
    pub fn add_interval(&mut self, start: u64, end: u64, value: i128) {
        self.add(start, value);
        self.add(end, -value);
    }

    /// Make sure `pos` has an entry, leaving any existing delta untouched.
    #[inline]
    pub fn seed(&mut self, pos: u64) {
        self.deltas.entry(pos).or_insert(0);
    }

    pub fn get(&self, pos: u64) -> Option<i128> {
        self.deltas.get(&pos).copied()
    }

    /// Number of distinct coordinates, zero deltas included.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Sum of every delta. Zero for any map built from whole intervals.
    pub fn total(&self) -> i128 {
        self.deltas.values().sum()
    }

    /// Drop coordinates whose contributions cancelled out, then return the
    /// remaining `(pos, delta)` events in ascending coordinate order.
    pub fn into_events(mut self) -> Vec<(u64, i128)> {
        self.deltas.retain(|_, delta| *delta != 0);
        let mut events: Vec<(u64, i128)> = self.deltas.into_iter().collect();
        events.sort_unstable_by_key(|&(pos, _)| pos);
        events
    }
}

/// Sweep over sorted `(pos, delta)` events, yielding `(start, end, coverage)`
/// for every stretch between consecutive events with nonzero coverage.
///
/// Nothing is yielded after the last event.
pub struct Sweep<I> {
    events: I,
    running_sum: i128,
    prev_pos: Option<u64>,
}

impl<I: Iterator<Item = (u64, i128)>> Sweep<I> {
    pub fn new(events: I) -> Self {
        Self {
            events,
            running_sum: 0,
            prev_pos: None,
        }
    }
}

impl<I: Iterator<Item = (u64, i128)>> Iterator for Sweep<I> {
    type Item = (u64, u64, i128);

    fn next(&mut self) -> Option<Self::Item> {
        for (pos, delta) in self.events.by_ref() {
            let emitted = match self.prev_pos {
                Some(prev) if self.running_sum != 0 => Some((prev, pos, self.running_sum)),
                _ => None,
            };
            self.running_sum += delta;
            self.prev_pos = Some(pos);
            if emitted.is_some() {
                return emitted;
            }
        }
        None
    }
}

/// Per-chromosome delta maps for one run.
///
/// Built up during ingestion, optionally extended with genome boundaries,
/// then consumed chromosome by chromosome in lexicographic order.
#[derive(Debug, Default)]
pub struct CoverageAggregator {
    chroms: FxHashMap<String, DeltaMap>,
    records: usize,
}

impl CoverageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn chrom_map(&mut self, chrom: &str) -> &mut DeltaMap {
        self.chroms.entry(chrom.to_string()).or_default()
    }

    /// Accumulate one interval.
    #[inline]
    pub fn add_interval(&mut self, chrom: &str, start: u64, end: u64, value: i128) {
        self.chrom_map(chrom).add_interval(start, end, value);
        self.records += 1;
    }

    #[inline]
    pub fn add(&mut self, interval: &CoverageInterval) {
        self.add_interval(&interval.chrom, interval.start, interval.end, interval.value);
    }

    /// Register every genome chromosome and seed coordinates 0 and length.
    pub fn extend_boundaries(&mut self, genome: &Genome) {
        for (chrom, length) in genome.iter() {
            let map = self.chrom_map(chrom);
            map.seed(0);
            map.seed(length);
        }
    }

    /// Number of intervals accumulated.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Registered chromosome names in lexicographic order.
    pub fn chromosomes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.chroms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn delta_map(&self, chrom: &str) -> Option<&DeltaMap> {
        self.chroms.get(chrom)
    }

    /// Total distinct coordinates across all chromosomes.
    pub fn coordinates(&self) -> usize {
        self.chroms.values().map(DeltaMap::len).sum()
    }

    /// Consume the registry, returning `(chrom, map)` in lexicographic order.
    pub fn into_sorted(self) -> Vec<(String, DeltaMap)> {
        let mut chroms: Vec<(String, DeltaMap)> = self.chroms.into_iter().collect();
        chroms.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        chroms
    }

    /// Run the full sweep and collect the merged intervals.
    pub fn into_intervals(self) -> Vec<CoverageInterval> {
        let mut out = Vec::new();
        for (chrom, map) in self.into_sorted() {
            for (start, end, coverage) in Sweep::new(map.into_events().into_iter()) {
                out.push(CoverageInterval::new(chrom.as_str(), start, end, coverage));
            }
        }
        out
    }
}
