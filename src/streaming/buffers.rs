//! Buffer size constants for streaming operations.

/// Default output buffer size (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Default input buffer size (256 KB).
/// Good balance for reading sorted record streams.
pub const DEFAULT_INPUT_BUFFER: usize = 256 * 1024;

/// Default line buffer capacity (1 KB).
/// GFF attribute columns can be long; the buffer grows as needed.
pub const DEFAULT_LINE_BUFFER: usize = 1024;

/// Capacity of each bounded queue between concurrent pipeline stages.
pub const STAGE_QUEUE_CAPACITY: usize = 256;
