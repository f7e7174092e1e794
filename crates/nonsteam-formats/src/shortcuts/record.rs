//! Shortcut records

use crate::shortcuts::error::{Result, ShortcutsError};
use crate::vdf::{VdfObject, VdfValue};
use nonsteam_crc::ShortcutAppId;
use std::borrow::Cow;
use std::path::Path;

/// Field holding the display name
pub const FIELD_APP_NAME: &str = "appname";
/// Field holding the quoted executable path
pub const FIELD_EXE: &str = "exe";
/// Field holding the quoted start directory
pub const FIELD_START_DIR: &str = "startdir";
/// Field holding extra command-line arguments
pub const FIELD_LAUNCH_OPTIONS: &str = "launchoptions";
/// Field holding the icon path
pub const FIELD_ICON: &str = "icon";
/// Field holding the user's collections
pub const FIELD_TAGS: &str = "tags";
/// Field holding the last launch time (Unix seconds)
pub const FIELD_LAST_PLAY_TIME: &str = "lastplaytime";
/// Field marking the shortcut as hidden
pub const FIELD_IS_HIDDEN: &str = "ishidden";

/// Fields added to newly created shortcuts
///
/// Existing shortcuts never receive these; values the user changed in Steam
/// are left alone.
pub fn default_fields() -> VdfObject {
    let mut defaults = VdfObject::new();
    defaults.insert("allowoverlay", 1);
    defaults.insert("allowdesktopconfig", 1);
    defaults.insert("shortcutpath", "");
    defaults.insert(FIELD_IS_HIDDEN, 0);
    defaults.insert("openvr", 0);
    defaults.insert(FIELD_TAGS, VdfObject::new());
    defaults.insert(FIELD_LAST_PLAY_TIME, 0);
    defaults.insert("devkit", 0);
    defaults.insert("devkitgameid", "");
    defaults
}

/// Attributes of a launch target supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutFields {
    /// Display name
    pub app_name: String,
    /// Executable, as stored (usually quoted)
    pub exe: String,
    /// Working directory, as stored (usually quoted)
    pub start_dir: String,
    /// Extra command-line arguments
    pub launch_options: String,
    /// Icon path, empty for none
    pub icon: String,
}

impl ShortcutFields {
    /// Create fields from already formatted values
    pub fn new(
        app_name: impl Into<String>,
        exe: impl Into<String>,
        start_dir: impl Into<String>,
        launch_options: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            exe: exe.into(),
            start_dir: start_dir.into(),
            launch_options: launch_options.into(),
            icon: icon.into(),
        }
    }

    /// Create fields for a program on disk, formatted the way Steam stores them
    ///
    /// An empty `start_dir` becomes the executable's parent directory, and a
    /// relative executable is resolved against `start_dir`. Both paths are
    /// then wrapped in double quotes.
    pub fn for_target(
        app_name: impl Into<String>,
        exe: &str,
        start_dir: &str,
        launch_options: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        let exe = unquote(exe);
        let mut start_dir = unquote(start_dir).to_string();
        if start_dir.is_empty() {
            start_dir = Path::new(exe)
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        let exe_path = Path::new(exe);
        let exe = if exe_path.is_relative() && !start_dir.is_empty() {
            Path::new(&start_dir).join(exe_path).to_string_lossy().into_owned()
        } else {
            exe.to_string()
        };

        Self {
            app_name: app_name.into(),
            exe: quote(&exe),
            start_dir: quote(&start_dir),
            launch_options: launch_options.into(),
            icon: icon.into(),
        }
    }

    /// App id Steam will assign to a shortcut with these fields
    pub fn app_id(&self) -> ShortcutAppId {
        ShortcutAppId::from_target(&self.exe, &self.app_name)
    }
}

impl From<ShortcutFields> for VdfObject {
    fn from(fields: ShortcutFields) -> Self {
        let mut object = Self::new();
        object.insert(FIELD_ICON, fields.icon);
        object.insert(FIELD_EXE, fields.exe);
        object.insert(FIELD_START_DIR, fields.start_dir);
        object.insert(FIELD_APP_NAME, fields.app_name);
        object.insert(FIELD_LAUNCH_OPTIONS, fields.launch_options);
        object
    }
}

fn quote(path: &str) -> String {
    format!("\"{path}\"")
}

fn unquote(path: &str) -> &str {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path)
}

/// One shortcut entry of `shortcuts.vdf`
///
/// A thin typed view over the underlying object. Fields this crate does not
/// know about are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shortcut(VdfObject);

impl Shortcut {
    /// Wrap a decoded object
    pub fn from_object(object: VdfObject) -> Self {
        Self(object)
    }

    /// Underlying object
    pub fn as_object(&self) -> &VdfObject {
        &self.0
    }

    /// Mutable underlying object
    pub fn as_object_mut(&mut self) -> &mut VdfObject {
        &mut self.0
    }

    /// Take the underlying object
    pub fn into_object(self) -> VdfObject {
        self.0
    }

    /// Display name, if it is valid UTF-8
    pub fn app_name(&self) -> Option<&str> {
        self.0.get_str(FIELD_APP_NAME)
    }

    /// Display name with invalid UTF-8 replaced
    pub fn display_name(&self) -> Option<Cow<'_, str>> {
        self.0.get_bytes(FIELD_APP_NAME).map(String::from_utf8_lossy)
    }

    /// Executable
    pub fn exe(&self) -> Option<&str> {
        self.0.get_str(FIELD_EXE)
    }

    /// Working directory
    pub fn start_dir(&self) -> Option<&str> {
        self.0.get_str(FIELD_START_DIR)
    }

    /// Extra command-line arguments
    pub fn launch_options(&self) -> Option<&str> {
        self.0.get_str(FIELD_LAUNCH_OPTIONS)
    }

    /// Icon path
    pub fn icon(&self) -> Option<&str> {
        self.0.get_str(FIELD_ICON)
    }

    /// Collections the shortcut belongs to
    pub fn tags(&self) -> Option<&VdfObject> {
        self.0.get_object(FIELD_TAGS)
    }

    /// Last launch time in Unix seconds
    pub fn last_play_time(&self) -> Option<i32> {
        self.0.get_i32(FIELD_LAST_PLAY_TIME)
    }

    /// Whether the shortcut is hidden in the library
    pub fn is_hidden(&self) -> bool {
        self.0.get_i32(FIELD_IS_HIDDEN).is_some_and(|v| v != 0)
    }

    /// Look up any field
    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        self.0.get(key)
    }

    /// Steam app id derived from the stored bytes of `exe` and `appname`
    ///
    /// # Errors
    /// Returns [`ShortcutsError::MissingField`] if either field is absent or
    /// not a string.
    pub fn app_id(&self) -> Result<ShortcutAppId> {
        let app_name = self.required(FIELD_APP_NAME)?;
        let exe = self.required(FIELD_EXE)?;
        Ok(ShortcutAppId::from_target_bytes(exe, app_name))
    }

    /// `steam://rungameid/` URL launching this shortcut through Steam
    pub fn launch_url(&self) -> Result<String> {
        Ok(self.app_id()?.launch_url())
    }

    fn required(&self, field: &'static str) -> Result<&[u8]> {
        self.0
            .get_bytes(field)
            .ok_or_else(|| ShortcutsError::MissingField {
                shortcut: self.display_name().unwrap_or_default().into_owned(),
                field,
            })
    }
}

impl From<VdfObject> for Shortcut {
    fn from(object: VdfObject) -> Self {
        Self(object)
    }
}

impl From<ShortcutFields> for Shortcut {
    fn from(fields: ShortcutFields) -> Self {
        Self(fields.into())
    }
}
