//! Binary VDF (Valve Data Format) support
//!
//! Binary VDF is a self-describing, schema-less key/value format. Every entry
//! starts with a one-byte tag:
//!
//! | Tag    | Entry                                                  |
//! |--------|--------------------------------------------------------|
//! | `0x00` | object: key, NUL, child entries, `0x08`                |
//! | `0x01` | string: key, NUL, value, NUL                           |
//! | `0x02` | int32: key, NUL, 4 bytes little-endian signed          |
//! | `0x08` | end of the enclosing object                            |
//!
//! There is no header, length prefix or checksum; a document is the entry
//! list of an unnamed root object followed by its `0x08` terminator.
//!
//! Keys are folded to lowercase (ASCII) when decoding, matching how Steam
//! looks them up. Encoding writes keys unchanged, so callers that need
//! byte-exact round trips should use lowercase keys.
//!
//! # Examples
//!
//! ```
//! use nonsteam_formats::vdf::{VdfDocument, VdfObject};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut game = VdfObject::new();
//! game.insert("appname", "Game");
//! game.insert("ishidden", false);
//!
//! let data = VdfDocument::with_object("shortcuts", game).build()?;
//! let parsed = VdfDocument::parse(&data)?;
//! assert!(parsed.get("shortcuts").is_some());
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod reader;
pub mod value;
pub mod writer;

/// Maximum object nesting accepted by the decoder
pub const MAX_DEPTH: usize = 64;

pub use document::VdfDocument;
pub use error::{Result, VdfError};
pub use reader::VdfReader;
pub use value::{VdfObject, VdfTag, VdfValue};
pub use writer::VdfWriter;
