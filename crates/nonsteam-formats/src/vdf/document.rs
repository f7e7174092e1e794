//! Top-level binary VDF documents

use crate::BinaryFormat;
use crate::vdf::error::{Result, VdfError};
use crate::vdf::reader::VdfReader;
use crate::vdf::value::{VdfObject, VdfValue};
use crate::vdf::writer::VdfWriter;
use binrw::io::Cursor;

/// A complete binary VDF document
///
/// The document root is an unnamed object: a list of entries followed by one
/// [`VdfTag::End`](super::VdfTag::End) byte. Persisted files carry a single
/// top-level entry, e.g. `shortcuts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VdfDocument {
    root: VdfObject,
}

impl VdfDocument {
    /// Create a document from its root entries
    pub fn new(root: VdfObject) -> Self {
        Self { root }
    }

    /// Create a document with one top-level object
    pub fn with_object(key: impl Into<String>, object: VdfObject) -> Self {
        let mut root = VdfObject::new();
        root.insert(key, object);
        Self { root }
    }

    /// Parse a document
    ///
    /// # Errors
    /// Returns error if:
    /// - A tag byte is unknown
    /// - The data ends before the root terminator
    /// - A key is not valid UTF-8
    /// - Objects nest deeper than [`MAX_DEPTH`](super::MAX_DEPTH)
    /// - Any bytes follow the root terminator
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = VdfReader::new(Cursor::new(data));
        let root = reader.read_object_body()?;

        let offset = reader.position()?;
        if offset < data.len() as u64 {
            return Err(VdfError::TrailingData { offset });
        }

        Ok(Self { root })
    }

    /// Serialize the document
    ///
    /// # Errors
    /// Returns [`VdfError::EmbeddedNul`] if a key or string contains a NUL byte.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut writer = VdfWriter::new(Cursor::new(Vec::new()));
        writer.write_object_body(&self.root)?;
        Ok(writer.into_inner().into_inner())
    }

    /// Root entries
    pub fn root(&self) -> &VdfObject {
        &self.root
    }

    /// Mutable root entries
    pub fn root_mut(&mut self) -> &mut VdfObject {
        &mut self.root
    }

    /// Take the root entries
    pub fn into_root(self) -> VdfObject {
        self.root
    }

    /// Look up a top-level value
    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        self.root.get(key)
    }
}

impl From<VdfObject> for VdfDocument {
    fn from(root: VdfObject) -> Self {
        Self::new(root)
    }
}

impl BinaryFormat for VdfDocument {
    type Error = VdfError;

    fn parse(data: &[u8]) -> Result<Self> {
        Self::parse(data)
    }

    fn build(&self) -> Result<Vec<u8>> {
        self.build()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_encoding() {
        let object: VdfObject = [("a", 1)].into_iter().collect();
        let document = VdfDocument::with_object("root", object);

        assert_eq!(
            document.build().unwrap(),
            b"\x00root\x00\x02a\x00\x01\x00\x00\x00\x08\x08"
        );
    }

    #[test]
    fn test_parse_exact_encoding() {
        let document = VdfDocument::parse(b"\x00root\x00\x02a\x00\x01\x00\x00\x00\x08\x08").unwrap();
        let root = document.get("root").and_then(VdfValue::as_object).unwrap();
        assert_eq!(root.get_i32("a"), Some(1));
    }

    #[test]
    fn test_empty_document() {
        let document = VdfDocument::parse(b"\x08").unwrap();
        assert!(document.root().is_empty());
        assert_eq!(VdfDocument::default().build().unwrap(), b"\x08");
    }

    #[test]
    fn test_missing_root_terminator() {
        // Inner terminator present, outer one missing
        let err = VdfDocument::parse(b"\x00root\x00\x02a\x00\x01\x00\x00\x00\x08").unwrap_err();
        assert!(matches!(err, VdfError::UnexpectedEof { offset: 14 }), "{err:?}");
    }

    #[test]
    fn test_trailing_data() {
        let err = VdfDocument::parse(b"\x08\x08").unwrap_err();
        assert!(matches!(err, VdfError::TrailingData { offset: 1 }), "{err:?}");
        assert!(err.is_malformed());
    }

    #[test]
    fn test_empty_input() {
        let err = VdfDocument::parse(b"").unwrap_err();
        assert!(matches!(err, VdfError::UnexpectedEof { offset: 0 }), "{err:?}");
    }

    #[test]
    fn test_round_trip_lowercases_keys() {
        let mut inner = VdfObject::new();
        inner.insert("AppName", "Game");
        inner.insert("LastPlayTime", 1_700_000_000);
        let document = VdfDocument::with_object("Shortcuts", inner);

        let parsed = VdfDocument::parse(&document.build().unwrap()).unwrap();
        let shortcuts = parsed.get("shortcuts").and_then(VdfValue::as_object).unwrap();
        assert_eq!(shortcuts.get_str("appname"), Some("Game"));
        assert_eq!(shortcuts.get_i32("lastplaytime"), Some(1_700_000_000));
    }

    #[test]
    fn test_verify_round_trip() {
        let data = b"\x00shortcuts\x00\x00game\x00\x01appname\x00Game\x00\x00tags\x00\x08\x08\x08\x08";
        assert!(<VdfDocument as BinaryFormat>::verify_round_trip(data).is_ok());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// Lowercase keys so decoding reproduces them exactly
        fn key() -> impl Strategy<Value = String> {
            "[a-z0-9_ ]{0,12}"
        }

        fn text() -> impl Strategy<Value = String> {
            "[^\\x00]{0,24}"
        }

        /// Arbitrary non-NUL bytes, not necessarily UTF-8
        fn raw_text() -> impl Strategy<Value = Vec<u8>> {
            prop::collection::vec(1u8..=255, 0..24)
        }

        fn value() -> impl Strategy<Value = VdfValue> {
            let leaf = prop_oneof![
                text().prop_map(VdfValue::from),
                raw_text().prop_map(VdfValue::from),
                any::<i32>().prop_map(VdfValue::Int32),
            ];
            leaf.prop_recursive(4, 48, 6, |inner| {
                prop::collection::vec((key(), inner), 0..6)
                    .prop_map(|entries| VdfValue::Object(entries.into_iter().collect()))
            })
        }

        proptest! {
            /// Parsing a built document reproduces it
            #[test]
            fn vdf_document_round_trip(
                entries in prop::collection::vec((key(), value()), 0..8)
            ) {
                let document = VdfDocument::new(entries.into_iter().collect());
                let data = document.build().unwrap();
                let parsed = VdfDocument::parse(&data).unwrap();
                prop_assert_eq!(parsed, document);
            }

            /// Every strict prefix of a valid document is rejected
            #[test]
            fn vdf_truncation_rejected(
                entries in prop::collection::vec((key(), value()), 1..4)
            ) {
                let document = VdfDocument::new(entries.into_iter().collect());
                let data = document.build().unwrap();
                for len in 0..data.len() {
                    let err = VdfDocument::parse(&data[..len]).unwrap_err();
                    prop_assert!(err.is_malformed(), "prefix {} gave {:?}", len, err);
                }
            }
        }
    }
}
