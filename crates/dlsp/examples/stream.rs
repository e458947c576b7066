//! Pull payloads out of a noisy byte stream with `FrameReader`.
//!
//! Run with:
//!   cargo run --example stream

use std::io::Cursor;

use dlsp::frame::{FrameConfig, FrameReader, FrameWriter, HDR};
use tracing::level_filters::LevelFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    let mut writer = FrameWriter::<_, 32>::new(Vec::new());
    writer.send(b"{\"temp\":21}")?;
    writer.send(b"status ok")?;
    let clean = writer.into_inner();

    // Line noise, a frame cut short by a stray header, then the real traffic.
    let mut wire = vec![0x00, 0xFF, 0x13];
    wire.extend_from_slice(&[HDR, b'l', b'o', b's', b't', HDR]);
    wire.extend_from_slice(&clean);
    wire.extend_from_slice(&[0x00, 0x00]);

    let cfg = FrameConfig {
        skip_malformed: true,
        read_chunk_size: 4,
    };
    let mut reader = FrameReader::<_, 32>::with_config(Cursor::new(wire), cfg);

    loop {
        match reader.read_frame() {
            Ok(payload) => println!("payload: {}", String::from_utf8_lossy(&payload)),
            Err(dlsp::FrameError::ConnectionClosed) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
