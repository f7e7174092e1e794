//! Binary VDF encoding

use crate::vdf::error::{Result, VdfError};
use crate::vdf::value::{VdfObject, VdfTag, VdfValue};
use binrw::BinWriterExt;
use std::io::{Seek, Write};

/// Streaming encoder for binary VDF data
///
/// Keys are written exactly as given; no case folding happens on encode.
pub struct VdfWriter<W> {
    writer: W,
}

impl<W: Write + Seek> VdfWriter<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the encoder, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a keyed entry of any type
    pub fn write_entry(&mut self, key: &str, value: &VdfValue) -> Result<()> {
        match value {
            VdfValue::Object(object) => self.write_object(key, object),
            VdfValue::String(s) => self.write_string(key, s),
            VdfValue::Int32(v) => self.write_int32(key, *v),
        }
    }

    /// Write an object entry: tag, key, children, terminator
    pub fn write_object(&mut self, key: &str, object: &VdfObject) -> Result<()> {
        self.write_header(VdfTag::Object, key)?;
        self.write_object_body(object)
    }

    /// Write the children of an object followed by the terminator
    pub fn write_object_body(&mut self, object: &VdfObject) -> Result<()> {
        for (key, value) in object.iter() {
            self.write_entry(key, value)?;
        }
        self.write_end()
    }

    /// Write a string entry; the value bytes are written unchanged
    pub fn write_string(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.write_header(VdfTag::String, key)?;
        self.write_cstring("string value", value)
    }

    /// Write an integer entry as four little-endian bytes
    pub fn write_int32(&mut self, key: &str, value: i32) -> Result<()> {
        self.write_header(VdfTag::Int32, key)?;
        self.writer.write_le(&value)?;
        Ok(())
    }

    /// Write the end-of-object terminator
    pub fn write_end(&mut self) -> Result<()> {
        self.writer.write_all(&[VdfTag::End.as_byte()])?;
        Ok(())
    }

    fn write_header(&mut self, tag: VdfTag, key: &str) -> Result<()> {
        self.writer.write_all(&[tag.as_byte()])?;
        self.write_cstring("key", key.as_bytes())
    }

    fn write_cstring(&mut self, what: &'static str, bytes: &[u8]) -> Result<()> {
        if bytes.contains(&0) {
            return Err(VdfError::EmbeddedNul {
                what,
                text: String::from_utf8_lossy(bytes).into_owned(),
            });
        }
        self.writer.write_all(bytes)?;
        self.writer.write_all(&[0])?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use binrw::io::Cursor;
    use pretty_assertions::assert_eq;

    fn encode_entry(key: &str, value: &VdfValue) -> Result<Vec<u8>> {
        let mut writer = VdfWriter::new(Cursor::new(Vec::new()));
        writer.write_entry(key, value)?;
        Ok(writer.into_inner().into_inner())
    }

    #[test]
    fn test_string_entry() {
        let data = encode_entry("appname", &VdfValue::from("Game")).unwrap();
        assert_eq!(data, b"\x01appname\x00Game\x00");
    }

    #[test]
    fn test_int_entry_little_endian() {
        let data = encode_entry("n", &VdfValue::Int32(0x0102_0304)).unwrap();
        assert_eq!(data, b"\x02n\x00\x04\x03\x02\x01");

        let data = encode_entry("n", &VdfValue::Int32(-2)).unwrap();
        assert_eq!(data, b"\x02n\x00\xfe\xff\xff\xff");
    }

    #[test]
    fn test_bool_entry() {
        let data = encode_entry("openvr", &VdfValue::from(true)).unwrap();
        assert_eq!(data, b"\x02openvr\x00\x01\x00\x00\x00");
    }

    #[test]
    fn test_object_entry() {
        let object: VdfObject = [("a", 1)].into_iter().collect();
        let data = encode_entry("root", &VdfValue::Object(object)).unwrap();
        assert_eq!(data, b"\x00root\x00\x02a\x00\x01\x00\x00\x00\x08");
    }

    #[test]
    fn test_empty_object_entry() {
        let data = encode_entry("tags", &VdfValue::Object(VdfObject::new())).unwrap();
        assert_eq!(data, b"\x00tags\x00\x08");
    }

    #[test]
    fn test_key_case_preserved() {
        let data = encode_entry("AppName", &VdfValue::from("x")).unwrap();
        assert_eq!(data, b"\x01AppName\x00x\x00");
    }

    #[test]
    fn test_embedded_nul_rejected() {
        let err = encode_entry("bad\0key", &VdfValue::Int32(0)).unwrap_err();
        assert!(matches!(err, VdfError::EmbeddedNul { what: "key", .. }));

        let err = encode_entry("k", &VdfValue::from("a\0b")).unwrap_err();
        assert!(matches!(
            err,
            VdfError::EmbeddedNul {
                what: "string value",
                ..
            }
        ));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_non_utf8_value_written_unchanged() {
        let data = encode_entry("appname", &VdfValue::from(&b"Caf\xe9"[..])).unwrap();
        assert_eq!(data, b"\x01appname\x00Caf\xe9\x00");
    }
}
