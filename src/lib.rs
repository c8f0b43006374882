//! RustQRGen - standards-conformant QR code symbol encoder
//!
//! A pure Rust QR Code Model 2 encoder: optimal mode segmentation, Reed-Solomon
//! error correction, function patterns, data placement and penalty-scored masking.
//! The result is an immutable [`Symbol`] that renderers query module by module.
//!
//! ```
//! use rust_qrgen::{encode, ECLevel};
//!
//! let symbol = encode(b"HELLO WORLD", ECLevel::Q, None).unwrap();
//! assert_eq!(symbol.version().number(), 1);
//! assert_eq!(symbol.side(), 21);
//! assert!(symbol.is_dark(0, 0));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding modules (segmentation, error correction, matrix, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (Symbol, ModuleMatrix, Version, etc.)
pub mod models;
/// WiFi and vCard payload builders
pub mod payload;

pub use encoder::EncodeOptions;
pub use encoder::segment::{Mode, SegmentInfo};
pub use error::{EncodeError, Result};
pub use models::{BitMatrix, ECLevel, MaskPattern, Symbol, Version};

use encoder::qr_encoder::QrEncoder;

/// Encode a payload into a QR symbol
///
/// # Arguments
/// * `payload` - Raw bytes to encode (must not be empty)
/// * `ec_level` - Requested error correction level
/// * `min_version` - Smallest version to use, if the caller wants a larger symbol
///
/// # Returns
/// The smallest symbol (at or above `min_version`) that holds the payload
///
/// # Errors
/// `EmptyPayload`, `InvalidVersion`, or `PayloadTooLarge` when even version 40
/// cannot hold the payload at `ec_level`
pub fn encode(payload: &[u8], ec_level: ECLevel, min_version: Option<u8>) -> Result<Symbol> {
    let mut options = EncodeOptions::new();
    if let Some(version) = min_version {
        options = options.min_version(version);
    }
    encode_with_options(payload, ec_level, &options)
}

/// Encode UTF-8 text (byte mode for anything outside the numeric/alphanumeric sets)
pub fn encode_text(text: &str, ec_level: ECLevel) -> Result<Symbol> {
    encode(text.as_bytes(), ec_level, None)
}

/// Encode with full control over version range, mask, EC boosting, Kanji and ECI
pub fn encode_with_options(
    payload: &[u8],
    ec_level: ECLevel,
    options: &EncodeOptions,
) -> Result<Symbol> {
    QrEncoder::encode(payload, ec_level, options)
}
