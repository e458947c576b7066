use std::io::{ErrorKind, Read};

use bytes::{Buf, Bytes, BytesMut};
use tracing::warn;

use crate::config::FrameConfig;
use crate::error::{FrameError, Result};
use crate::framer::Framer;

/// Reads decoded payloads from any `Read` byte stream.
///
/// Handles partial reads and noise between frames internally: callers always
/// get whole payloads of at most `N` bytes.
pub struct FrameReader<T, const N: usize> {
    inner: T,
    pending: BytesMut,
    framer: Framer<N>,
    config: FrameConfig,
}

impl<T: Read, const N: usize> FrameReader<T, N> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            pending: BytesMut::with_capacity(config.read_chunk_size),
            framer: Framer::new(),
            config,
        }
    }

    /// Read the next decoded payload (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached. A
    /// malformed frame is returned as its error unless
    /// [`FrameConfig::skip_malformed`] is set; either way the next call picks
    /// up with the bytes that follow it.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        loop {
            if let Some(payload) = self.drain_pending()? {
                return Ok(payload);
            }

            if self.fill()? == 0 {
                return Err(FrameError::ConnectionClosed);
            }
        }
    }

    fn drain_pending(&mut self) -> Result<Option<Bytes>> {
        while self.pending.has_remaining() {
            let byte = self.pending.get_u8();
            match self.framer.decode_byte(byte) {
                Ok(()) if self.framer.is_completed() => {
                    let payload = Bytes::copy_from_slice(self.framer.as_slice());
                    self.framer.reset();
                    return Ok(Some(payload));
                }
                Ok(()) => {}
                Err(err) if self.config.skip_malformed => {
                    warn!(error = %err, "dropping malformed frame");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(None)
    }

    /// Refill `pending` from the stream. Only called once it is drained.
    fn fill(&mut self) -> Result<usize> {
        self.pending.resize(self.config.read_chunk_size.max(1), 0);

        let result = loop {
            match self.inner.read(&mut self.pending) {
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                other => break other,
            }
        };

        self.pending.truncate(*result.as_ref().unwrap_or(&0));
        result.map_err(FrameError::Io)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    ///
    /// Bytes already read from the stream but not yet decoded are lost.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Switch between returning and dropping malformed frames.
    pub fn set_skip_malformed(&mut self, skip_malformed: bool) {
        self.config.skip_malformed = skip_malformed;
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
