//! Encode a payload made only of reserved bytes, then decode it byte by byte.
//!
//! Run with:
//!   cargo run --example roundtrip

use dlsp::frame::{ESC, HDR};
use dlsp::Framer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut framer = Framer::<5>::new();
    let payload = [HDR, ESC];

    let frame = framer.encode(&payload)?.to_vec();
    println!("encoded {payload:02X?} -> {frame:02X?}");

    framer.reset();
    for byte in &frame {
        framer.decode_byte(*byte)?;
        if framer.is_completed() {
            println!("decoded {:02X?}", framer.as_slice());
            assert_eq!(framer.as_slice(), payload);
        }
    }

    Ok(())
}
