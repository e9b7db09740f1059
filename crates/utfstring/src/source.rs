//! Tagged text input covering every supported source encoding.

use core::fmt;

use alloc::vec::Vec;

use crate::{codec, codepage::Codepage, error::ConvertError, validator};

/// A borrowed run of text in one of the supported encodings.
///
/// One canonical decode path replaces per-encoding entry points: anything
/// that builds an [`Utf8String`](crate::Utf8String) routes through
/// [`TextSource::into_utf8`], and the `From` adapters keep the call shapes
/// cheap at the use site.
#[derive(Clone, Copy)]
pub enum TextSource<'a> {
    /// UTF-8 bytes of unknown provenance; they pass the full validator
    /// gate, which also rejects the noncharacters U+FFFE/U+FFFF.
    Utf8(&'a [u8]),
    /// A string slice, structurally sound by type; taken as-is.
    Str(&'a str),
    /// UTF-16 units, possibly containing surrogate pairs.
    Utf16(&'a [u16]),
    /// UTF-32 scalar values.
    Utf32(&'a [u32]),
    /// Legacy single-byte text with the codepage that decodes it.
    Legacy(&'a [u8], &'a dyn Codepage),
}

impl TextSource<'_> {
    /// Decodes the source into owned, well-formed UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Whatever the underlying conversion reports; nothing is returned on
    /// failure, never a partial buffer.
    pub fn into_utf8(self) -> Result<Vec<u8>, ConvertError> {
        match self {
            TextSource::Utf8(bytes) => {
                validator::validate(bytes)?;
                Ok(bytes.to_vec())
            }
            TextSource::Str(text) => Ok(text.as_bytes().to_vec()),
            TextSource::Utf16(units) => codec::utf16_to_utf8(units),
            TextSource::Utf32(units) => codec::utf32_to_utf8(units),
            TextSource::Legacy(bytes, table) => codec::legacy_to_utf8(bytes, table),
        }
    }
}

impl fmt::Debug for TextSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSource::Utf8(bytes) => f.debug_tuple("Utf8").field(bytes).finish(),
            TextSource::Str(text) => f.debug_tuple("Str").field(text).finish(),
            TextSource::Utf16(units) => f.debug_tuple("Utf16").field(units).finish(),
            TextSource::Utf32(units) => f.debug_tuple("Utf32").field(units).finish(),
            TextSource::Legacy(bytes, _) => f.debug_tuple("Legacy").field(bytes).finish(),
        }
    }
}

impl<'a> From<&'a str> for TextSource<'a> {
    fn from(text: &'a str) -> Self {
        TextSource::Str(text)
    }
}

impl<'a> From<&'a [u8]> for TextSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        TextSource::Utf8(bytes)
    }
}

impl<'a> From<&'a [u16]> for TextSource<'a> {
    fn from(units: &'a [u16]) -> Self {
        TextSource::Utf16(units)
    }
}

impl<'a> From<&'a [u32]> for TextSource<'a> {
    fn from(units: &'a [u32]) -> Self {
        TextSource::Utf32(units)
    }
}
