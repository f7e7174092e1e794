//! Steam `shortcuts.vdf` document
//!
//! The file is a binary VDF document with one top-level object,
//! `shortcuts`, whose children are the individual shortcuts, keyed
//! `"0"`, `"1"`, ... . In memory this crate identifies shortcuts by display
//! name (`appname`) and writes them back under fresh index keys, so names
//! differing only in case stay distinct.
//!
//! Each shortcut carries at least `appname`, `exe`, `startdir`, `icon` and
//! `launchoptions`. Fields this crate does not know about are preserved
//! across load and save.
//!
//! # Examples
//!
//! ```
//! use nonsteam_formats::shortcuts::{ShortcutFields, ShortcutStore, UpsertOutcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = ShortcutStore::new();
//! let fields = ShortcutFields::new("Foo", r#""C:\Games\Foo\foo.exe""#, "", "", "");
//! let (outcome, shortcut) = store.upsert("Foo", fields);
//! assert_eq!(outcome, UpsertOutcome::Created);
//! assert_eq!(shortcut.launch_url()?, "steam://rungameid/17616083409988222976");
//!
//! let data = store.build()?;
//! assert_eq!(ShortcutStore::parse(&data)?, store);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod record;
pub mod store;

pub use error::{Result, ShortcutsError};
pub use record::{Shortcut, ShortcutFields, default_fields};
pub use store::{SHORTCUTS_CONTAINER, ShortcutStore, UpsertOutcome};
