//! Non-Steam shortcut synchronization.
//!
//! This crate keeps a set of launch targets present as non-Steam shortcuts
//! in a Steam user's `shortcuts.vdf`:
//! - `config`: CLI and environment configuration
//! - `storage`: loading and saving the shortcuts document
//! - `sync`: upserting launch targets and reporting launch URLs
//!
//! # Example
//!
//! ```no_run
//! use nonsteam_sync::{ShortcutEntry, storage, sync};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("/home/me/.steam/steam/userdata/1234/config/shortcuts.vdf");
//!     let mut store = storage::load(path)?;
//!
//!     let entry = ShortcutEntry {
//!         name: "Super Metroid".to_string(),
//!         exe: "/usr/bin/retroarch".to_string(),
//!         launch_options: Some("-L snes9x metroid.sfc".to_string()),
//!         ..ShortcutEntry::default()
//!     };
//!     let report = sync::apply(&mut store, &[entry])?;
//!     storage::save(path, &store)?;
//!
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod config;
pub mod error;
pub mod storage;
pub mod sync;

pub use config::{Command, SyncConfig};
pub use error::{ConfigError, Result, SyncError};
pub use sync::{LaunchUrl, ShortcutEntry, SyncReport};
