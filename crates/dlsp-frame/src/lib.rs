//! Byte-stuffing frame codec for serial data links.
//!
//! Every payload is framed as:
//! - A header byte `0x7B`
//! - The payload, with `0x7B`/`0x7C`/`0x7D` sent as `0x7C` + (byte XOR `0x20`)
//! - A footer byte `0x7D`
//!
//! The [`Framer`] does the work with a fixed inline buffer and no allocation,
//! and builds without `std`. With the `std` feature (default), [`FrameReader`]
//! and [`FrameWriter`] run it over any `Read`/`Write` byte stream; the `async`
//! feature adds a `tokio-util` codec.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod error;
pub mod framer;
pub mod special;

#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
pub mod reader;
#[cfg(feature = "std")]
pub mod writer;

#[cfg(feature = "async")]
pub mod codec;

pub use error::{FrameError, Result};
pub use framer::{max_encoded_len, DecodeState, Framer, MAX_CAPACITY, MAX_FRAME_LEN};
pub use special::{ESC, FTR, HDR, XOR_MASK};

#[cfg(feature = "std")]
pub use config::{FrameConfig, DEFAULT_READ_CHUNK_SIZE};
#[cfg(feature = "std")]
pub use reader::FrameReader;
#[cfg(feature = "std")]
pub use writer::FrameWriter;

#[cfg(feature = "async")]
pub use codec::FrameCodec;
