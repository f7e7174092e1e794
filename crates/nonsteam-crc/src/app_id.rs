//! Steam app ids for non-Steam shortcuts
//!
//! Steam identifies a non-Steam shortcut by a 64-bit number. The high 32 bits
//! are the CRC-32 of the shortcut's target followed by its name, with the top
//! bit forced high. The low 32 bits are always `0x02000000`.

use crate::crc::Crc;
use crate::params::CrcParams;
use std::fmt;

/// Low 32 bits shared by every non-Steam shortcut id
pub const SHORTCUT_ID_LOW: u64 = 0x0200_0000;

/// Flag forced into the CRC half of the id
pub const SHORTCUT_ID_HIGH_BIT: u32 = 0x8000_0000;

/// URL scheme prefix for launching by app id
pub const RUN_GAME_URL_PREFIX: &str = "steam://rungameid/";

/// 64-bit Steam app id of a non-Steam shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortcutAppId(u64);

impl ShortcutAppId {
    /// Derive the id from the shortcut's executable and display name
    ///
    /// The two strings are concatenated without a separator, `exe` first,
    /// exactly as stored in the shortcut record (including any quotes).
    ///
    /// # Examples
    ///
    /// ```
    /// use nonsteam_crc::ShortcutAppId;
    ///
    /// let a = ShortcutAppId::from_target("\"/usr/bin/game\"", "Game");
    /// let b = ShortcutAppId::from_target("\"/usr/bin/game\"", "Game");
    /// assert_eq!(a, b);
    /// assert!(a.launch_url().starts_with("steam://rungameid/"));
    /// ```
    pub fn from_target(exe: &str, app_name: &str) -> Self {
        Self::from_target_bytes(exe.as_bytes(), app_name.as_bytes())
    }

    /// Derive the id from raw field bytes
    ///
    /// Shortcut files do not guarantee UTF-8, so ids of stored records are
    /// computed over the bytes as written.
    pub fn from_target_bytes(exe: &[u8], app_name: &[u8]) -> Self {
        let mut input = Vec::with_capacity(exe.len() + app_name.len());
        input.extend_from_slice(exe);
        input.extend_from_slice(app_name);

        let crc = Crc::new(CrcParams::crc32()).bit_by_bit(&input) as u32;
        Self::from_crc(crc)
    }

    /// Build the id from a precomputed CRC-32
    pub fn from_crc(crc: u32) -> Self {
        let high = u64::from(crc | SHORTCUT_ID_HIGH_BIT);
        Self((high << 32) | SHORTCUT_ID_LOW)
    }

    /// Wrap a raw 64-bit id
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The full 64-bit id
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// High 32 bits: the CRC with its top bit set
    pub fn crc(&self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// `steam://rungameid/<id>` URL that launches this shortcut
    pub fn launch_url(&self) -> String {
        format!("{RUN_GAME_URL_PREFIX}{}", self.0)
    }
}

impl fmt::Display for ShortcutAppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ShortcutAppId> for u64 {
    fn from(id: ShortcutAppId) -> Self {
        id.0
    }
}

/// Launch URL for a shortcut target
///
/// Shorthand for `ShortcutAppId::from_target(exe, app_name).launch_url()`.
pub fn launch_url(exe: &str, app_name: &str) -> String {
    ShortcutAppId::from_target(exe, app_name).launch_url()
}
