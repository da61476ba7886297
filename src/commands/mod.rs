//! Command implementations for covkit.

pub mod chroms;
pub mod count;
pub mod group;
pub mod merge;
pub mod sum;

pub use chroms::ChromsCommand;
pub use count::{CountCommand, CountStats};
pub use group::{GroupCommand, GroupStats};
pub use merge::{MergeCommand, MergeStats};
pub use sum::{SumCommand, SumStats};
