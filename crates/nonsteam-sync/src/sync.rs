//! Applying launch targets to a shortcut store.
//!
//! A collaborator describes the programs it wants in Steam as
//! [`ShortcutEntry`] values, usually read from a JSON file. [`apply`] upserts
//! each of them and reports what changed together with the launch URL Steam
//! will accept for every entry.

use crate::error::{Result, SyncError};
use crate::storage;
use nonsteam_formats::shortcuts::{Shortcut, ShortcutFields, ShortcutStore, UpsertOutcome};
use nonsteam_formats::vdf::VdfObject;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// One launch target to be present in Steam.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ShortcutEntry {
    /// Display name; shortcuts with the same name are updated in place
    pub name: String,

    /// Executable path, or a URL when `url` is set
    pub exe: String,

    /// Working directory, defaults to the executable's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_dir: Option<String>,

    /// Extra command-line arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_options: Option<String>,

    /// Icon path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// `exe` is a URL handled by another launcher
    ///
    /// Steam still launches these, but its overlay cannot attach.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub url: bool,

    /// Additional shortcut fields (`allowoverlay`, `tags`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ShortcutEntry {
    /// Shortcut fields for this entry, formatted the way Steam stores them
    ///
    /// Extra field names are folded to lowercase; the core fields win over
    /// extra fields of the same name.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::InvalidEntry` if an extra value has no VDF
    /// representation (null, float, array, out-of-range integer).
    pub fn to_fields(&self) -> Result<VdfObject> {
        let launch_options = self.launch_options.clone().unwrap_or_default();
        let icon = self.icon.clone().unwrap_or_default();

        let fields = if self.url {
            ShortcutFields::new(
                &self.name,
                format!("\"{}\"", self.exe),
                "\"\"",
                launch_options,
                icon,
            )
        } else {
            ShortcutFields::for_target(
                &self.name,
                &self.exe,
                self.start_dir.as_deref().unwrap_or_default(),
                launch_options,
                icon,
            )
        };

        let mut object = match &self.extra {
            Some(extra) => {
                let lowered: serde_json::Map<_, _> = extra
                    .iter()
                    .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
                    .collect();
                VdfObject::try_from(lowered).map_err(|source| SyncError::InvalidEntry {
                    name: self.name.clone(),
                    source,
                })?
            }
            None => VdfObject::new(),
        };
        object.merge(fields.into());
        Ok(object)
    }
}

/// Read a JSON array of entries.
///
/// # Errors
///
/// Returns `SyncError` if the file cannot be read or is not valid JSON.
pub fn load_entries(path: &Path) -> Result<Vec<ShortcutEntry>> {
    let data = std::fs::read(path).map_err(|source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<ShortcutEntry> =
        serde_json::from_slice(&data).map_err(|source| SyncError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Launch URL assigned to one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchUrl {
    /// Entry name
    pub name: String,
    /// `steam://rungameid/...` URL
    pub url: String,
}

impl LaunchUrl {
    /// Launch URL of a stored shortcut
    ///
    /// # Errors
    ///
    /// Returns `SyncError::InvalidShortcut` if the shortcut lacks `appname`
    /// or `exe`.
    pub fn for_shortcut(name: &str, shortcut: &Shortcut) -> Result<Self> {
        let url = shortcut
            .launch_url()
            .map_err(|source| SyncError::InvalidShortcut {
                name: name.to_string(),
                source,
            })?;
        Ok(Self {
            name: name.to_string(),
            url,
        })
    }
}

/// Outcome of applying a batch of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Names of newly created shortcuts
    pub created: Vec<String>,
    /// Names of existing shortcuts that were updated
    pub updated: Vec<String>,
    /// Names of entries whose target is a URL
    pub url_targets: Vec<String>,
    /// Launch URL of every applied entry, in input order
    pub launch_urls: Vec<LaunchUrl>,
}

impl SyncReport {
    /// Whether no entry was applied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Please relaunch Steam to update non-Steam shortcuts!")?;
        writeln!(f)?;
        writeln!(f, "Updated {} existing non-Steam shortcuts", self.updated.len())?;
        write!(f, "Created {} new non-Steam shortcuts", self.created.len())?;

        if !self.url_targets.is_empty() {
            write!(
                f,
                "\n\nWarning: Steam will launch the following {} URL target(s), \
                 but the Steam overlay will not function:",
                self.url_targets.len()
            )?;
            for name in &self.url_targets {
                write!(f, "\n{name}")?;
            }
        }

        if !self.launch_urls.is_empty() {
            write!(f, "\n\nLaunch URLs:")?;
            for entry in &self.launch_urls {
                write!(f, "\n{}\t{}", entry.name, entry.url)?;
            }
        }
        Ok(())
    }
}

/// Upsert every entry into `store`.
///
/// Existing shortcuts keep fields the entry does not set; new shortcuts get
/// the default field set. Nothing is written to disk.
///
/// # Errors
///
/// Returns `SyncError::InvalidEntry` on the first entry with unusable extra
/// fields and `SyncError::InvalidShortcut` if an upserted shortcut has no
/// launch URL; entries before it have already been applied.
pub fn apply(store: &mut ShortcutStore, entries: &[ShortcutEntry]) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    for entry in entries {
        let fields = entry.to_fields()?;
        let (outcome, shortcut) = store.upsert(&entry.name, fields);

        match outcome {
            UpsertOutcome::Created => {
                debug!("Created shortcut '{}'", entry.name);
                report.created.push(entry.name.clone());
            }
            UpsertOutcome::Updated => {
                debug!("Updated shortcut '{}'", entry.name);
                report.updated.push(entry.name.clone());
            }
        }

        if entry.url {
            warn!("Shortcut '{}' targets a URL: {}", entry.name, entry.exe);
            report.url_targets.push(entry.name.clone());
        }

        report
            .launch_urls
            .push(LaunchUrl::for_shortcut(&entry.name, shortcut)?);
    }

    info!(
        "Applied {} entries: {} created, {} updated",
        entries.len(),
        report.created.len(),
        report.updated.len()
    );
    Ok(report)
}

/// Load the document at `path`, apply `entries` and save it back.
///
/// With `dry_run` the document is left untouched.
///
/// # Errors
///
/// Returns `SyncError` if loading, applying or saving fails.
pub fn sync_file(path: &Path, entries: &[ShortcutEntry], dry_run: bool) -> Result<SyncReport> {
    let mut store = storage::load(path)?;
    let report = apply(&mut store, entries)?;

    if dry_run {
        info!("Dry run, not writing {}", path.display());
    } else {
        storage::save(path, &store)?;
    }
    Ok(report)
}
