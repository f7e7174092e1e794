//! In-memory shortcut collection and its document mapping

use crate::BinaryFormat;
use crate::shortcuts::error::{Result, ShortcutsError};
use crate::shortcuts::record::{FIELD_APP_NAME, Shortcut, default_fields};
use crate::vdf::{VdfDocument, VdfObject, VdfValue};

/// Top-level key wrapping all shortcuts
pub const SHORTCUTS_CONTAINER: &str = "shortcuts";

/// Whether [`ShortcutStore::upsert`] created or updated a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpsertOutcome {
    /// No shortcut had the name; a new one was created with defaults
    Created,
    /// An existing shortcut was merged with the new fields
    Updated,
}

/// Shortcuts keyed by display name
///
/// Names are unique. Iteration follows document order for loaded shortcuts,
/// then insertion order for new ones; the encoder writes the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutStore {
    entries: Vec<(String, Shortcut)>,
}

impl ShortcutStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shortcuts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no shortcuts
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a shortcut by display name
    pub fn get(&self, name: &str) -> Option<&Shortcut> {
        self.position(name).map(|pos| &self.entries[pos].1)
    }

    /// Whether a shortcut with this display name exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove a shortcut by display name
    pub fn remove(&mut self, name: &str) -> Option<Shortcut> {
        let pos = self.position(name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Iterate over `(name, shortcut)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Shortcut)> {
        self.entries.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Iterate over display names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Create or update the shortcut called `name`
    ///
    /// An existing shortcut has `fields` merged into it: fields present in
    /// `fields` are overwritten, every other field is preserved. A new
    /// shortcut is built from `fields`, then every default field (and
    /// `appname = name`) it lacks is added. Defaults are never applied to
    /// existing shortcuts.
    pub fn upsert(
        &mut self,
        name: &str,
        fields: impl Into<VdfObject>,
    ) -> (UpsertOutcome, &Shortcut) {
        let fields = fields.into();

        if let Some(pos) = self.position(name) {
            self.entries[pos].1.as_object_mut().merge(fields);
            return (UpsertOutcome::Updated, &self.entries[pos].1);
        }

        let mut object = fields;
        object.insert_missing(FIELD_APP_NAME, name);
        for (key, value) in default_fields() {
            object.insert_missing(key, value);
        }

        let pos = self.entries.len();
        self.entries.push((name.to_string(), Shortcut::from_object(object)));
        (UpsertOutcome::Created, &self.entries[pos].1)
    }

    /// Build the store from a decoded document
    ///
    /// Shortcuts are keyed by their `appname` field; the container keys in
    /// the file are ignored. A name that is not valid UTF-8 is keyed by its
    /// lossy form while the record keeps the original bytes.
    ///
    /// # Errors
    /// Returns error if:
    /// - The document has no `shortcuts` object
    /// - An entry is not an object or has no string `appname`
    /// - Two entries share an `appname`
    pub fn from_document(document: VdfDocument) -> Result<Self> {
        let mut root = document.into_root();
        let container = match root.remove(SHORTCUTS_CONTAINER) {
            Some(VdfValue::Object(container)) => container,
            Some(other) => {
                return Err(ShortcutsError::NotAnObject {
                    key: SHORTCUTS_CONTAINER.to_string(),
                    found: other.type_name(),
                });
            }
            None => return Err(ShortcutsError::MissingContainer(SHORTCUTS_CONTAINER)),
        };

        let mut store = Self::new();
        for (key, value) in container {
            let VdfValue::Object(object) = value else {
                return Err(ShortcutsError::NotAnObject {
                    key,
                    found: value.type_name(),
                });
            };
            let Some(app_name) = object
                .get_bytes(FIELD_APP_NAME)
                .map(|name| String::from_utf8_lossy(name).into_owned())
            else {
                return Err(ShortcutsError::MissingField {
                    shortcut: key,
                    field: FIELD_APP_NAME,
                });
            };
            if store.contains(&app_name) {
                return Err(ShortcutsError::DuplicateAppName(app_name));
            }
            store.entries.push((app_name, Shortcut::from_object(object)));
        }

        Ok(store)
    }

    /// Wrap the shortcuts in a document
    ///
    /// Shortcuts are keyed `"0"`, `"1"`, ... in store order, matching the
    /// files Steam writes.
    pub fn to_document(&self) -> VdfDocument {
        let container: VdfObject = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, (_, shortcut))| (index.to_string(), shortcut.as_object().clone()))
            .collect();
        VdfDocument::with_object(SHORTCUTS_CONTAINER, container)
    }

    /// Parse a `shortcuts.vdf` document
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::from_document(VdfDocument::parse(data)?)
    }

    /// Serialize to a `shortcuts.vdf` document
    pub fn build(&self) -> Result<Vec<u8>> {
        Ok(self.to_document().build()?)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}

impl BinaryFormat for ShortcutStore {
    type Error = ShortcutsError;

    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }

    fn build(&self) -> Result<Vec<u8>> {
        self.build()
    }
}
