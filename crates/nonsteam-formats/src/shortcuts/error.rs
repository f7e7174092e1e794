//! Error types for shortcuts document handling

use crate::vdf::VdfError;
use thiserror::Error;

/// Errors that can occur when decoding, encoding or using shortcuts
#[derive(Error, Debug)]
pub enum ShortcutsError {
    /// Underlying VDF codec failure
    #[error(transparent)]
    Vdf(#[from] VdfError),

    /// Document has no `shortcuts` container
    #[error("Missing '{0}' container in shortcuts document")]
    MissingContainer(&'static str),

    /// Container or entry that should be an object is not one
    #[error("Expected '{key}' to be an object, found {found}")]
    NotAnObject {
        /// Key of the offending entry
        key: String,
        /// Type actually found
        found: &'static str,
    },

    /// Required string field absent from a shortcut
    #[error("Shortcut '{shortcut}' has no string field '{field}'")]
    MissingField {
        /// Container key or display name of the shortcut
        shortcut: String,
        /// Field name
        field: &'static str,
    },

    /// Two shortcuts share a display name
    #[error("Duplicate appname in shortcuts document: {0}")]
    DuplicateAppName(String),
}

impl ShortcutsError {
    /// Whether the error describes a malformed byte stream
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Vdf(e) if e.is_malformed())
    }
}

/// Type alias for shortcuts operation results
pub type Result<T> = std::result::Result<T, ShortcutsError>;
