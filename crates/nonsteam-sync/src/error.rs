//! Error types for shortcut synchronization.
//!
//! All errors use thiserror for consistent error handling across the codebase.

use nonsteam_formats::shortcuts::ShortcutsError;
use nonsteam_formats::vdf::VdfError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration value
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Userdata directory does not look like a Steam profile
    #[error(
        "Steam userdata not configured: {} has no config directory",
        userdata.display()
    )]
    NotConfigured {
        /// Userdata directory that was given
        userdata: PathBuf,
    },
}

/// Errors raised while loading, updating or saving shortcuts.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Shortcuts document could not be decoded or encoded
    #[error("Invalid shortcuts document {path}: {source}")]
    Document {
        /// Document path
        path: PathBuf,
        /// Underlying format error
        #[source]
        source: ShortcutsError,
    },

    /// Entries file is not valid JSON
    #[error("Invalid entries file {path}: {source}")]
    InvalidJson {
        /// Entries file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// An entry's extra fields cannot be stored in a shortcut
    #[error("Invalid extra fields for '{name}': {source}")]
    InvalidEntry {
        /// Entry name
        name: String,
        /// Underlying conversion error
        #[source]
        source: VdfError,
    },

    /// A stored shortcut cannot produce a launch URL
    #[error("Invalid shortcut '{name}': {source}")]
    InvalidShortcut {
        /// Shortcut name
        name: String,
        /// Underlying shortcut error
        #[source]
        source: ShortcutsError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Type alias for synchronization results
pub type Result<T> = std::result::Result<T, SyncError>;
