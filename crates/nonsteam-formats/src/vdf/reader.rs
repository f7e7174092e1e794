//! Binary VDF decoding

use crate::vdf::MAX_DEPTH;
use crate::vdf::error::{Result, VdfError};
use crate::vdf::value::{VdfObject, VdfTag, VdfValue};
use binrw::BinReaderExt;
use std::io::{Read, Seek};

/// Streaming decoder for binary VDF data
pub struct VdfReader<R> {
    reader: R,
}

impl<R: Read + Seek> VdfReader<R> {
    /// Wrap a reader positioned at the start of an entry list
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Consume the decoder, returning the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read entries until the [`VdfTag::End`] terminator of the current level
    ///
    /// This is the body of an object: the caller has already consumed the
    /// object's tag and key. The terminator is consumed.
    pub fn read_object_body(&mut self) -> Result<VdfObject> {
        self.read_body(0)
    }

    /// Read one entry
    ///
    /// Returns `None` when the next tag is [`VdfTag::End`].
    pub fn read_entry(&mut self) -> Result<Option<(String, VdfValue)>> {
        self.read_entry_at(0)
    }

    fn read_body(&mut self, depth: usize) -> Result<VdfObject> {
        let mut object = VdfObject::new();
        while let Some((key, value)) = self.read_entry_at(depth)? {
            object.insert(key, value);
        }
        Ok(object)
    }

    fn read_entry_at(&mut self, depth: usize) -> Result<Option<(String, VdfValue)>> {
        let offset = self.position()?;
        let byte: u8 = self
            .reader
            .read_le()
            .map_err(|e| VdfError::from_binrw(e, offset))?;
        let tag = VdfTag::from_byte(byte).ok_or(VdfError::UnknownTag { tag: byte, offset })?;

        let entry = match tag {
            VdfTag::End => return Ok(None),
            VdfTag::Object => {
                if depth >= MAX_DEPTH {
                    return Err(VdfError::NestingTooDeep {
                        max: MAX_DEPTH,
                        offset,
                    });
                }
                let key = self.read_key()?;
                let body = self.read_body(depth + 1)?;
                (key, VdfValue::Object(body))
            }
            VdfTag::String => {
                let key = self.read_key()?;
                let value = self.read_cstring()?;
                (key, VdfValue::String(value))
            }
            VdfTag::Int32 => {
                let key = self.read_key()?;
                let offset = self.position()?;
                let value: i32 = self
                    .reader
                    .read_le()
                    .map_err(|e| VdfError::from_binrw(e, offset))?;
                (key, VdfValue::Int32(value))
            }
        };
        Ok(Some(entry))
    }

    /// Read a UTF-8 key, folding ASCII letters to lowercase
    fn read_key(&mut self) -> Result<String> {
        let start = self.position()?;
        let mut key = String::from_utf8(self.read_cstring()?).map_err(|source| {
            VdfError::InvalidUtf8 {
                offset: start,
                source,
            }
        })?;
        key.make_ascii_lowercase();
        Ok(key)
    }

    /// Read null-terminated bytes, consuming the terminator
    fn read_cstring(&mut self) -> Result<Vec<u8>> {
        let start = self.position()?;
        let mut bytes = Vec::new();
        loop {
            let offset = start + bytes.len() as u64;
            let byte: u8 = self
                .reader
                .read_le()
                .map_err(|e| VdfError::from_binrw(e, offset))?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        Ok(bytes)
    }

    pub(crate) fn position(&mut self) -> Result<u64> {
        Ok(self.reader.stream_position()?)
    }
}
