//! Shared streaming utilities for covkit commands.
//!
//! - Numbered line reading with a reused buffer
//! - Integer and field parsing straight from line bytes
//! - Buffered, itoa-backed output formatting
//! - Buffer size constants

pub mod buffers;
pub mod lines;
pub mod output;
pub mod parsing;

pub use buffers::{DEFAULT_INPUT_BUFFER, DEFAULT_LINE_BUFFER, DEFAULT_OUTPUT_BUFFER};
pub use lines::LineReader;
pub use output::BedWriter;
pub use parsing::{parse_i64_fast, parse_u64_fast, tab_fields};
