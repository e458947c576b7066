/// Default number of bytes requested from the stream per read.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 256;

/// Configuration for [`FrameReader`](crate::FrameReader).
///
/// Capacity is not part of the configuration: it is the `N` of the
/// [`Framer`](crate::Framer) the adapter is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// When true, malformed frames are logged and dropped instead of being
    /// returned as errors.
    pub skip_malformed: bool,
    /// Bytes requested from the underlying stream per read. Default: 256.
    pub read_chunk_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            skip_malformed: false,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}
