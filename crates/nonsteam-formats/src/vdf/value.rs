//! VDF value model

use crate::vdf::error::{Result, VdfError};
use std::borrow::Cow;
use std::fmt;

/// Wire tag preceding every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VdfTag {
    /// Nested object, terminated by [`VdfTag::End`]
    Object = 0x00,
    /// Null-terminated byte string
    String = 0x01,
    /// Little-endian signed 32-bit integer
    Int32 = 0x02,
    /// End of the enclosing object
    End = 0x08,
}

impl VdfTag {
    /// Decode a tag byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Object),
            0x01 => Some(Self::String),
            0x02 => Some(Self::Int32),
            0x08 => Some(Self::End),
            _ => None,
        }
    }

    /// Raw tag byte
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// A single VDF value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VdfValue {
    /// Nested object
    Object(VdfObject),
    /// String value as raw bytes
    ///
    /// Steam writes UTF-8, but older files and other tools may not, so the
    /// bytes are kept exactly as read.
    String(Vec<u8>),
    /// Signed 32-bit integer; booleans are stored as 0 or 1
    Int32(i32),
}

impl VdfValue {
    /// Tag written before this value
    pub fn tag(&self) -> VdfTag {
        match self {
            Self::Object(_) => VdfTag::Object,
            Self::String(_) => VdfTag::String,
            Self::Int32(_) => VdfTag::Int32,
        }
    }

    /// Human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::String(_) => "string",
            Self::Int32(_) => "int32",
        }
    }

    /// String contents, if this is a string holding valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Raw string bytes, if this is a string
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::String(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// String contents with invalid UTF-8 replaced by U+FFFD
    pub fn to_str_lossy(&self) -> Option<Cow<'_, str>> {
        self.as_bytes().map(String::from_utf8_lossy)
    }

    /// Integer value, if this is an integer
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Nested object, if this is an object
    pub fn as_object(&self) -> Option<&VdfObject> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable nested object, if this is an object
    pub fn as_object_mut(&mut self) -> Option<&mut VdfObject> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl From<VdfObject> for VdfValue {
    fn from(value: VdfObject) -> Self {
        Self::Object(value)
    }
}

impl From<String> for VdfValue {
    fn from(value: String) -> Self {
        Self::String(value.into_bytes())
    }
}

impl From<&str> for VdfValue {
    fn from(value: &str) -> Self {
        Self::String(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for VdfValue {
    fn from(value: Vec<u8>) -> Self {
        Self::String(value)
    }
}

impl From<&[u8]> for VdfValue {
    fn from(value: &[u8]) -> Self {
        Self::String(value.to_vec())
    }
}

impl From<i32> for VdfValue {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<bool> for VdfValue {
    fn from(value: bool) -> Self {
        Self::Int32(i32::from(value))
    }
}

impl TryFrom<serde_json::Value> for VdfValue {
    type Error = VdfError;

    /// Convert a dynamic JSON value
    ///
    /// Objects, strings, booleans and integers that fit in `i32` are
    /// accepted. Everything else is rejected rather than coerced.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Object(map) => Ok(Self::Object(VdfObject::try_from(map)?)),
            Value::String(s) => Ok(Self::from(s)),
            Value::Bool(b) => Ok(Self::from(b)),
            Value::Number(n) => n
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(Self::Int32)
                .ok_or_else(|| VdfError::UnsupportedValueType(format!("number {n}"))),
            Value::Null => Err(VdfError::UnsupportedValueType("null".to_string())),
            Value::Array(_) => Err(VdfError::UnsupportedValueType("array".to_string())),
        }
    }
}

impl fmt::Display for VdfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(o) => write!(f, "{{{} entries}}", o.len()),
            Self::String(b) => write!(f, "{:?}", String::from_utf8_lossy(b)),
            Self::Int32(v) => write!(f, "{v}"),
        }
    }
}

/// Ordered collection of key/value entries
///
/// Keys are unique. Inserting an existing key replaces its value in place,
/// so a decoded object keeps the last value seen for a repeated key at the
/// position where the key first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VdfObject {
    entries: Vec<(String, VdfValue)>,
}

impl VdfObject {
    /// Create an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the object has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<VdfValue>) -> Option<VdfValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Insert a value only when the key is absent
    pub fn insert_missing(&mut self, key: impl Into<String>, value: impl Into<VdfValue>) {
        let key = key.into();
        if !self.contains_key(&key) {
            self.entries.push((key, value.into()));
        }
    }

    /// Overwrite entries from `other`, keeping entries `other` does not have
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Remove an entry
    pub fn remove(&mut self, key: &str) -> Option<VdfValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a value mutably
    pub fn get_mut(&mut self, key: &str) -> Option<&mut VdfValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a string value holding valid UTF-8
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(VdfValue::as_str)
    }

    /// Look up the raw bytes of a string value
    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        self.get(key).and_then(VdfValue::as_bytes)
    }

    /// Look up an integer value
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(VdfValue::as_i32)
    }

    /// Look up a nested object
    pub fn get_object(&self, key: &str) -> Option<&VdfObject> {
        self.get(key).and_then(VdfValue::as_object)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VdfValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for VdfObject
where
    K: Into<String>,
    V: Into<VdfValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Self::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl IntoIterator for VdfObject {
    type Item = (String, VdfValue);
    type IntoIter = std::vec::IntoIter<(String, VdfValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for VdfObject {
    type Error = VdfError;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut object = Self::new();
        for (key, value) in map {
            object.insert(key, VdfValue::try_from(value)?);
        }
        Ok(object)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_tag_bytes() {
        for tag in [VdfTag::Object, VdfTag::String, VdfTag::Int32, VdfTag::End] {
            assert_eq!(VdfTag::from_byte(tag.as_byte()), Some(tag));
        }
        assert_eq!(VdfTag::from_byte(0x03), None);
        assert_eq!(VdfTag::from_byte(0x07), None);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut object = VdfObject::new();
        object.insert("a", 1);
        object.insert("b", "x");
        let previous = object.insert("a", 2);

        assert_eq!(previous, Some(VdfValue::Int32(1)));
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(object.get_i32("a"), Some(2));
    }

    #[test]
    fn test_merge_preserves_missing_fields() {
        let mut existing: VdfObject = [("exe", "old"), ("tags", "keep")].into_iter().collect();
        let update: VdfObject = [("exe", "new"), ("icon", "i.png")].into_iter().collect();
        existing.merge(update);

        assert_eq!(existing.get_str("exe"), Some("new"));
        assert_eq!(existing.get_str("tags"), Some("keep"));
        assert_eq!(existing.get_str("icon"), Some("i.png"));
        assert_eq!(existing.keys().collect::<Vec<_>>(), vec!["exe", "tags", "icon"]);
    }

    #[test]
    fn test_insert_missing() {
        let mut object = VdfObject::new();
        object.insert("ishidden", 1);
        object.insert_missing("ishidden", 0);
        object.insert_missing("openvr", 0);
        assert_eq!(object.get_i32("ishidden"), Some(1));
        assert_eq!(object.get_i32("openvr"), Some(0));
    }

    #[test]
    fn test_bool_becomes_int() {
        assert_eq!(VdfValue::from(true), VdfValue::Int32(1));
        assert_eq!(VdfValue::from(false), VdfValue::Int32(0));
    }

    #[test]
    fn test_non_utf8_string() {
        let value = VdfValue::from(&b"Caf\xe9"[..]);
        assert_eq!(value.as_bytes(), Some(&b"Caf\xe9"[..]));
        assert_eq!(value.as_str(), None);
        assert_eq!(value.to_str_lossy().unwrap(), "Caf\u{fffd}");
        assert_eq!(VdfValue::from("Café").as_str(), Some("Café"));
        assert_eq!(VdfValue::Int32(1).as_bytes(), None);
    }

    #[test]
    fn test_remove() {
        let mut object: VdfObject = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(object.remove("a"), Some(VdfValue::Int32(1)));
        assert_eq!(object.remove("a"), None);
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let value = VdfValue::try_from(json!({
            "name": "Game",
            "hidden": true,
            "count": -5,
            "tags": { "0": "favorite" }
        }))
        .unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.get_str("name"), Some("Game"));
        assert_eq!(object.get_i32("hidden"), Some(1));
        assert_eq!(object.get_i32("count"), Some(-5));
        assert_eq!(
            object.get_object("tags").unwrap().get_str("0"),
            Some("favorite")
        );
    }

    #[test]
    fn test_from_json_rejects_unsupported() {
        for value in [
            json!(null),
            json!(1.5),
            json!([1, 2]),
            json!(4_294_967_296_i64),
            json!({ "nested": { "bad": null } }),
        ] {
            assert!(matches!(
                VdfValue::try_from(value),
                Err(VdfError::UnsupportedValueType(_))
            ));
        }
    }
}
