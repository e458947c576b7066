//! Reserved bytes of the wire format.
//!
//! `HDR`, `ESC` and `FTR` never appear literally inside a frame body. Any
//! occurrence in the payload is sent as `ESC` followed by the byte XOR-ed
//! with [`XOR_MASK`].

/// Mask applied to a reserved byte after an `ESC`.
pub const XOR_MASK: u8 = 0x20;

/// Start of a frame.
pub const HDR: u8 = 0x7B;

/// Escape marker: the next byte is a reserved byte XOR-ed with [`XOR_MASK`].
pub const ESC: u8 = 0x7C;

/// End of a frame.
pub const FTR: u8 = 0x7D;

/// Returns true if `byte` must be escaped inside a frame body.
pub const fn is_special(byte: u8) -> bool {
    matches!(byte, HDR | ESC | FTR)
}

/// The two-byte escape sequence for a reserved byte, or `None` if `byte` is
/// sent as-is.
pub const fn escape(byte: u8) -> Option<[u8; 2]> {
    if is_special(byte) {
        Some([ESC, byte ^ XOR_MASK])
    } else {
        None
    }
}

/// Recover the original byte from the one following an `ESC`.
pub const fn unescape(byte: u8) -> u8 {
    byte ^ XOR_MASK
}

/// Returns a human-readable name for a reserved byte.
pub fn special_name(byte: u8) -> Option<&'static str> {
    match byte {
        HDR => Some("HDR"),
        ESC => Some("ESC"),
        FTR => Some("FTR"),
        _ => None,
    }
}
