//! QR code data mode packers
//!
//! Each packer turns a run of payload bytes into the data bits of one segment:
//! - Numeric: digits 0-9, three per 10 bits
//! - Alphanumeric: 0-9, A-Z, space and `$%*+-./:`, two per 11 bits
//! - Byte: any 8-bit value
//! - Kanji: Shift-JIS double-byte characters, 13 bits each

/// Alphanumeric mode packer
pub mod alphanumeric;
/// Byte mode packer
pub mod byte;
/// Kanji mode packer
pub mod kanji;
/// Numeric mode packer
pub mod numeric;
