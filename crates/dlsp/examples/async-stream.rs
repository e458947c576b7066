//! Write and read frames through the `tokio-util` codec.
//!
//! Run with:
//!   cargo run --example async-stream --features async

use dlsp::frame::FrameCodec;
use futures_util::{SinkExt, StreamExt};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    let mut sink = FramedWrite::new(Vec::new(), FrameCodec::<16>::new());
    for payload in [&b"ping"[..], &b"{pong}"[..], &b"|esc|"[..]] {
        sink.send(payload).await?;
    }
    let wire = sink.into_inner();
    eprintln!("wire: {wire:02X?}");

    let mut frames = FramedRead::new(wire.as_slice(), FrameCodec::<16>::new());
    while let Some(payload) = frames.next().await {
        println!("payload: {}", String::from_utf8_lossy(&payload?));
    }

    Ok(())
}
