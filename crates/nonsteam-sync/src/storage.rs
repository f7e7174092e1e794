//! Loading and saving the shortcuts document.
//!
//! The document path is always passed in explicitly; see
//! [`SyncConfig::shortcuts_path`](crate::SyncConfig::shortcuts_path).
//! Backups of the previous document are left to the caller.

use crate::error::{Result, SyncError};
use nonsteam_formats::shortcuts::ShortcutStore;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Load the shortcuts document at `path`.
///
/// A missing file is not an error: Steam only creates the document once the
/// first shortcut is added, so an absent file yields an empty store.
///
/// # Errors
///
/// Returns `SyncError` if the file cannot be read or is not a well-formed
/// shortcuts document. No partial store is returned.
pub fn load(path: &Path) -> Result<ShortcutStore> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No shortcuts document at {}, starting empty", path.display());
            return Ok(ShortcutStore::new());
        }
        Err(source) => {
            return Err(SyncError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let store = ShortcutStore::parse(&data).map_err(|source| SyncError::Document {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Loaded {} shortcuts ({} bytes) from {}",
        store.len(),
        data.len(),
        path.display()
    );
    Ok(store)
}

/// Save `store` to `path`, replacing any existing document.
///
/// # Errors
///
/// Returns `SyncError` if the store cannot be encoded or the file cannot be
/// written.
pub fn save(path: &Path, store: &ShortcutStore) -> Result<()> {
    let data = store.build().map_err(|source| SyncError::Document {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, &data).map_err(|source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Saved {} shortcuts ({} bytes) to {}",
        store.len(),
        data.len(),
        path.display()
    );
    Ok(())
}
