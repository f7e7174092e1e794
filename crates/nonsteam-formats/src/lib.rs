//! Binary formats used by Steam for non-Steam game shortcuts
//!
//! This crate provides symmetric (parser and builder) implementations of:
//!
//! - **Binary VDF**: Valve's tagged key/value format ([`vdf`])
//! - **Shortcuts**: the `shortcuts.vdf` document listing non-Steam games
//!   ([`shortcuts`])
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Strict Decoding**: Truncated or malformed input is an error, never a
//!   partial result
//! - **Round-Trip Guarantee**: parse(build(doc)) == doc for lowercase keys

#![warn(missing_docs)]

/// Steam shortcuts document: parsing, building and upserting shortcuts
pub mod shortcuts;
/// Binary VDF codec
pub mod vdf;

/// Common format trait implemented by every document type
pub trait BinaryFormat: Sized {
    /// Error produced by parsing or building
    type Error: std::error::Error + 'static;

    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self, Self::Error>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>, Self::Error>;

    /// Verify round-trip correctness
    fn verify_round_trip(data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
        let parsed = Self::parse(data)?;
        let rebuilt = parsed.build()?;
        if data != rebuilt.as_slice() {
            return Err("Round-trip verification failed".into());
        }
        Ok(())
    }
}
