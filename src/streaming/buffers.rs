//! Buffer size constants for streaming commands.

/// Output buffer size (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Input buffer size (256 KB).
pub const DEFAULT_INPUT_BUFFER: usize = 256 * 1024;

/// Initial line buffer capacity.
pub const DEFAULT_LINE_BUFFER: usize = 1024;
