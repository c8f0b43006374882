//! Error types for symbol encoding

use crate::models::ECLevel;
use thiserror::Error;

/// Result type alias for encoding operations
pub type Result<T> = std::result::Result<T, EncodeError>;

/// Errors that can occur while encoding a payload into a QR symbol.
///
/// Encoding is all-or-nothing: when any of these is returned no symbol exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The payload has no bytes
    #[error("Payload is empty")]
    EmptyPayload,

    /// The payload does not fit in the largest allowed version at the requested level
    #[error(
        "Payload too large: needs {required_bits} bits, version limit holds {capacity_bits} bits at level {ec_level:?}"
    )]
    PayloadTooLarge {
        /// Bits the best segmentation needs at the largest allowed version
        required_bits: usize,
        /// Data capacity in bits of the largest allowed version
        capacity_bits: usize,
        /// Requested error correction level
        ec_level: ECLevel,
    },

    /// Version outside 1-40
    #[error("Invalid version: {0} (must be in [1, 40])")]
    InvalidVersion(u8),

    /// Minimum version greater than maximum version
    #[error("Invalid version range: min {min} > max {max}")]
    InvalidVersionRange {
        /// Requested minimum version
        min: u8,
        /// Requested maximum version
        max: u8,
    },

    /// Unrecognized error correction level name
    #[error("Invalid error correction level: {0:?} (expected L, M, Q or H)")]
    InvalidEcLevel(String),

    /// Mask id outside 0-7
    #[error("Invalid mask pattern: {0} (must be in [0, 7])")]
    InvalidMask(u8),

    /// ECI assignment number outside 0-999999
    #[error("Invalid ECI designator: {0} (must be in [0, 999999])")]
    InvalidEci(u32),

    /// A payload formatter field holds an unsupported value
    #[error("Invalid payload field: {0}")]
    InvalidPayloadField(String),

    /// Codeword stream does not exactly fill the data region.
    ///
    /// Indicates a defect in the assembler/matrix pairing, never bad input.
    #[error("Capacity mismatch: data region holds {expected} bits, codewords supply {actual}")]
    CapacityMismatch {
        /// Bits the data region of the version holds
        expected: usize,
        /// Bits supplied by the codeword stream
        actual: usize,
    },
}
