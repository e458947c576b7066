//! Byte-stuffing framing for serial data links.
//!
//! dlsp wraps raw payloads in `0x7B … 0x7D` frames with in-band escaping, and
//! recovers them from a byte stream, resynchronizing on the next header after
//! corruption. The core works without `std` or allocation.
//!
//! # Crate Structure
//!
//! - [`frame`] — The framer, special bytes, errors, and (with `std`) stream
//!   adapters and (with `async`) a `tokio-util` codec
//!
//! ```
//! use dlsp::Framer;
//!
//! let mut tx = Framer::<16>::new();
//! let mut rx = Framer::<16>::new();
//!
//! let frame = tx.encode(b"{hi}").unwrap();
//! assert_eq!(rx.decode(frame).unwrap(), b"{hi}");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

/// Re-export frame types.
pub mod frame {
    pub use dlsp_frame::*;
}

pub use dlsp_frame::{DecodeState, FrameError, Framer, Result};
