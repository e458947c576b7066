//! `tokio-util` codec over the framer.
//!
//! Note that `FramedRead` stops at the first decode error. Over a lossy link
//! use [`FrameCodec::with_skip_malformed`] so corrupted frames are dropped
//! and the stream keeps going.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::error::{FrameError, Result};
use crate::framer::{DecodeState, Framer};

/// Codec yielding one decoded payload per frame.
///
/// Decoding and encoding use separate framers, so a `Framed` stream can read
/// and write concurrently.
#[derive(Debug, Clone, Default)]
pub struct FrameCodec<const N: usize> {
    decoder: Framer<N>,
    encoder: Framer<N>,
    skip_malformed: bool,
}

impl<const N: usize> FrameCodec<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and drop malformed frames instead of returning an error.
    pub fn with_skip_malformed(mut self, skip_malformed: bool) -> Self {
        self.skip_malformed = skip_malformed;
        self
    }
}

impl<const N: usize> Decoder for FrameCodec<N> {
    type Item = Bytes;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>> {
        while src.has_remaining() {
            let byte = src.get_u8();
            match self.decoder.decode_byte(byte) {
                Ok(()) if self.decoder.is_completed() => {
                    let payload = Bytes::copy_from_slice(self.decoder.as_slice());
                    self.decoder.reset();
                    return Ok(Some(payload));
                }
                Ok(()) => {}
                Err(err) if self.skip_malformed => {
                    warn!(error = %err, "dropping malformed frame");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>> {
        if let Some(payload) = self.decode(src)? {
            return Ok(Some(payload));
        }

        let truncated = self.decoder.state() != DecodeState::WaitHeader;
        self.decoder.reset();

        if truncated && !self.skip_malformed {
            return Err(FrameError::ConnectionClosed);
        }
        if truncated {
            warn!("dropping frame truncated by end of stream");
        }
        Ok(None)
    }
}

impl<'a, const N: usize> Encoder<&'a [u8]> for FrameCodec<N> {
    type Error = FrameError;

    fn encode(&mut self, item: &'a [u8], dst: &mut BytesMut) -> Result<()> {
        let frame = self.encoder.encode(item)?;
        dst.reserve(frame.len());
        dst.put_slice(frame);
        Ok(())
    }
}

impl<const N: usize> Encoder<Bytes> for FrameCodec<N> {
    type Error = FrameError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<()> {
        Encoder::<&[u8]>::encode(self, item.as_ref(), dst)
    }
}
