/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The raw payload exceeds the framer capacity.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An unescaped header byte appeared inside a frame.
    #[error("framing violation (unescaped header inside a frame)")]
    FramingViolation,

    /// The decoded payload would exceed the framer capacity.
    #[error("decoded payload overflows capacity ({max} bytes)")]
    BufferOverflow { max: usize },

    /// The input ended before a terminated frame was seen.
    #[error("incomplete frame (input ended before footer)")]
    Incomplete,

    /// An I/O error occurred while reading or writing frames.
    #[cfg(feature = "std")]
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// Returns true if the decoder discarded a partial frame and is waiting
    /// for the next header.
    pub fn is_resync(&self) -> bool {
        matches!(
            self,
            FrameError::FramingViolation | FrameError::BufferOverflow { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, FrameError>;
