//! Error types for CRC parameter validation

use thiserror::Error;

/// Errors raised while building a CRC parameter set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrcError {
    /// Register width outside the supported range
    #[error("Invalid CRC width: {0} (expected 1..=64 bits)")]
    InvalidWidth(u32),

    /// Table index width the table-driven algorithm cannot use
    #[error("Invalid table index width: {0} (only 8 is supported)")]
    InvalidTableIndexWidth(u32),

    /// Even polynomial combined with a non-zero initial value
    #[error(
        "Invalid CRC polynomial {poly:#x} for width {width}: bit 0 must be set when xor_in is non-zero"
    )]
    InvalidPolynomial {
        /// Polynomial after truncation to the register width
        poly: u64,
        /// Register width in bits
        width: u32,
    },

    /// Unknown algorithm name
    #[error("Unknown CRC algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Result type for CRC operations
pub type Result<T> = std::result::Result<T, CrcError>;
