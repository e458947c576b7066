use core::fmt;

use tracing::{debug, trace};

use crate::error::{FrameError, Result};
use crate::special::{escape, special_name, unescape, ESC, FTR, HDR};

/// Largest supported raw payload length.
pub const MAX_CAPACITY: usize = 126;

/// Encoded size of a full [`MAX_CAPACITY`] payload, and the default buffer
/// length of a [`Framer`].
pub const MAX_FRAME_LEN: usize = max_encoded_len(MAX_CAPACITY);

/// Worst-case encoded size of a payload: every byte escaped, plus header and
/// footer.
pub const fn max_encoded_len(payload_len: usize) -> usize {
    2 * payload_len + 2
}

/// Position of the decoder within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeState {
    /// Outside a frame. Every byte other than `HDR` is discarded.
    #[default]
    WaitHeader,
    /// Between the header and the footer.
    InMessage,
    /// The previous byte was `ESC`.
    AfterEscape,
}

/// Frame encoder and decoder sharing one fixed buffer.
///
/// `N` is the largest raw payload the framer accepts (`1..=126`, checked at
/// compile time). `M` is the length of the inline buffer. It defaults to
/// [`MAX_FRAME_LEN`] so that `Framer<N>` works for any `N`; memory-constrained
/// targets can pass `M = 2 * N + 2` explicitly. Anything smaller than that is
/// rejected at compile time. The buffer holds either the last encoded frame or the
/// payload being decoded, never both: starting an encode discards a decoded
/// payload and vice versa. Use one framer per direction if both are needed
/// at the same time.
///
/// ```
/// use dlsp_frame::Framer;
///
/// let mut framer = Framer::<5>::new();
/// let frame = framer.encode(&[0x7B, 0x7C]).unwrap().to_vec();
/// assert_eq!(frame, [0x7B, 0x7C, 0x5B, 0x7C, 0x5C, 0x7D]);
///
/// assert_eq!(framer.decode(&frame).unwrap(), &[0x7B, 0x7C]);
///
/// // Buffer sized exactly for five-byte payloads.
/// let mut tight = dlsp_frame::Framer::<5, 12>::new();
/// assert_eq!(tight.encode(&[0x7D; 5]).unwrap().len(), 12);
/// ```
///
/// A capacity of zero does not compile:
///
/// ```compile_fail
/// let _ = dlsp_frame::Framer::<0>::new();
/// ```
///
/// Neither does one above 126:
///
/// ```compile_fail
/// let _ = dlsp_frame::Framer::<127>::new();
/// ```
///
/// Nor a buffer too short for the worst-case frame:
///
/// ```compile_fail
/// let _ = dlsp_frame::Framer::<5, 11>::new();
/// ```
#[derive(Clone)]
pub struct Framer<const N: usize, const M: usize = MAX_FRAME_LEN> {
    buf: [u8; M],
    len: usize,
    state: DecodeState,
    completed: bool,
}

impl<const N: usize, const M: usize> Framer<N, M> {
    /// Largest raw payload this framer encodes or decodes.
    pub const MAX_PAYLOAD: usize = N;

    /// Largest frame this framer produces.
    pub const MAX_ENCODED_LEN: usize = max_encoded_len(N);

    /// Create an empty framer waiting for a header.
    pub const fn new() -> Self {
        const {
            assert!(
                N >= 1 && N <= MAX_CAPACITY,
                "framer capacity must be within 1..=126"
            );
            assert!(
                M >= max_encoded_len(N),
                "framer buffer must hold 2 * N + 2 bytes"
            );
        };

        Self {
            buf: [0; M],
            len: 0,
            state: DecodeState::WaitHeader,
            completed: false,
        }
    }

    /// Encode a raw payload into the internal buffer.
    ///
    /// Wire format:
    /// ```text
    /// ┌───────┬──────────────────────────────────┬───────┐
    /// │ HDR   │ payload, HDR/ESC/FTR replaced by │ FTR   │
    /// │ 0x7B  │ ESC (byte ^ 0x20)                │ 0x7D  │
    /// └───────┴──────────────────────────────────┴───────┘
    /// ```
    ///
    /// On success returns the encoded frame. On failure nothing is written
    /// and the framer is left reset.
    pub fn encode(&mut self, raw: &[u8]) -> Result<&[u8]> {
        self.reset();

        if raw.len() > N {
            debug!(size = raw.len(), max = N, "payload too large to encode");
            return Err(FrameError::PayloadTooLarge {
                size: raw.len(),
                max: N,
            });
        }

        self.append(HDR);
        for &byte in raw {
            match escape(byte) {
                Some([marker, body]) => {
                    self.append(marker);
                    self.append(body);
                }
                None => self.append(byte),
            }
        }
        self.append(FTR);

        self.completed = true;
        Ok(self.as_slice())
    }

    /// Decode a whole encoded frame.
    ///
    /// Succeeds only if the input ends exactly on a frame footer. Bytes before
    /// the header are ignored; bytes after the footer make the call fail with
    /// [`FrameError::Incomplete`]. Use [`decode_byte`](Self::decode_byte) to
    /// pull several frames out of one stream.
    pub fn decode(&mut self, encoded: &[u8]) -> Result<&[u8]> {
        self.reset();

        for &byte in encoded {
            self.decode_byte(byte)?;
        }

        if self.completed {
            Ok(self.as_slice())
        } else {
            Err(FrameError::Incomplete)
        }
    }

    /// Feed one byte to the decoder.
    ///
    /// Check [`is_completed`](Self::is_completed) after every byte: once it
    /// returns true the buffer holds one decoded payload, and the framer must
    /// be [`reset`](Self::reset) before the next frame's bytes are fed.
    ///
    /// An error means the partial frame was dropped. The framer is already
    /// back in [`DecodeState::WaitHeader`], so feeding can continue.
    pub fn decode_byte(&mut self, byte: u8) -> Result<()> {
        match self.state {
            DecodeState::WaitHeader => {
                self.reset();
                if byte == HDR {
                    self.state = DecodeState::InMessage;
                } else {
                    trace!(
                        byte,
                        name = special_name(byte).unwrap_or("data"),
                        "discarding byte outside frame"
                    );
                }
                Ok(())
            }
            DecodeState::InMessage => match byte {
                FTR => {
                    self.state = DecodeState::WaitHeader;
                    self.completed = true;
                    Ok(())
                }
                ESC => {
                    self.state = DecodeState::AfterEscape;
                    Ok(())
                }
                HDR => {
                    self.reset();
                    debug!("unescaped header inside frame, resynchronizing");
                    Err(FrameError::FramingViolation)
                }
                _ => self.push(byte),
            },
            DecodeState::AfterEscape => {
                self.state = DecodeState::InMessage;
                self.push(unescape(byte))
            }
        }
    }

    /// Return to [`DecodeState::WaitHeader`] with an empty, incomplete buffer.
    ///
    /// Buffer contents are not cleared; only the cursor moves.
    pub fn reset(&mut self) {
        self.len = 0;
        self.state = DecodeState::WaitHeader;
        self.completed = false;
    }

    /// True once the buffer holds a complete encoded frame or decoded payload.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Current decoder state.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Number of valid bytes in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid bytes of the buffer: the encoded frame after
    /// [`encode`](Self::encode), the (partial) payload while decoding.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn push(&mut self, byte: u8) -> Result<()> {
        if self.len >= N {
            self.reset();
            debug!(max = N, "decoded payload overflows capacity, resynchronizing");
            return Err(FrameError::BufferOverflow { max: N });
        }

        self.append(byte);
        Ok(())
    }

    fn append(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.len += 1;
    }
}

impl<const N: usize, const M: usize> Default for Framer<N, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const M: usize> fmt::Debug for Framer<N, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framer")
            .field("capacity", &N)
            .field("state", &self.state)
            .field("completed", &self.completed)
            .field("buf", &self.as_slice())
            .finish()
    }
}
