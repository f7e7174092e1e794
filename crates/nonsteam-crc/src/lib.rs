//! CRC engine and app id derivation for non-Steam shortcuts
//!
//! This crate provides a parameterized CRC implementation and the Steam app
//! id scheme built on top of it.
//!
//! # Components
//!
//! - **Parameters**: [`CrcParams`] validates a Rocksoft-style parameter set
//!   (width 1 to 64 bits) and precomputes the derived constants
//! - **Engine**: [`Crc`] computes the CRC with any of three interchangeable
//!   algorithms selected by [`CrcAlgorithm`]
//! - **App ids**: [`ShortcutAppId`] derives the 64-bit id and
//!   `steam://rungameid/` URL of a shortcut
//!
//! # Examples
//!
//! ## Custom CRC
//!
//! ```
//! use nonsteam_crc::{Crc, CrcAlgorithm, CrcParams};
//!
//! // CRC-16/ARC
//! let params = CrcParams::new(16, 0x8005, true, 0x0000, true, 0x0000)?;
//! let crc = Crc::new(params);
//! for algorithm in CrcAlgorithm::ALL {
//!     assert_eq!(crc.checksum(algorithm, b"123456789"), 0xBB3D);
//! }
//! # Ok::<(), nonsteam_crc::CrcError>(())
//! ```
//!
//! ## Shortcut launch URL
//!
//! ```
//! use nonsteam_crc::ShortcutAppId;
//!
//! let id = ShortcutAppId::from_target("\"C:\\Games\\Foo\\foo.exe\"", "Foo");
//! println!("{}", id.launch_url());
//! ```

#![warn(missing_docs)]

pub mod app_id;
pub mod crc;
pub mod error;
pub mod params;

pub use error::CrcError;

// Re-export commonly used types
pub use app_id::{launch_url, ShortcutAppId};
pub use crc::{reflect, Crc, CrcAlgorithm};
pub use params::CrcParams;
