//! Stateless conversion primitives between UTF-8, UTF-16, UTF-32 and a
//! legacy single-byte codepage.
//!
//! Every function here is pure and referentially transparent: no shared
//! state, no partial output. A malformed unit fails the whole conversion
//! with the fault position; the caller decides whether to drop, substitute
//! or abort. The two primitives everything else is composed from are
//! [`sequence_length`] (lead-byte classification) and the per-scalar
//! encode/decode pairs.

#![allow(clippy::cast_possible_truncation)]

use alloc::{vec, vec::Vec};

use crate::{codepage::Codepage, error::ConvertError, validator};

/// Highest scalar value representable in any Unicode transformation format.
pub const MAX_SCALAR: u32 = 0x0010_FFFF;

/// First scalar value of the surrogate range.
pub(crate) const SURROGATE_START: u32 = 0xD800;

/// Lead-byte mask OR'd into the first byte of an encoded sequence, indexed
/// by sequence length.
const LEAD_MASK: [u8; 5] = [0x00, 0x00, 0xC0, 0xE0, 0xF0];

/// True for scalar values in U+D800..=U+DFFF.
#[inline]
#[must_use]
pub(crate) fn is_surrogate(scalar: u32) -> bool {
    scalar.wrapping_sub(SURROGATE_START) < 2048
}

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    unit & 0xFC00 == 0xD800
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    unit & 0xFC00 == 0xDC00
}

/// Classifies a UTF-8 lead byte by its high bits, returning the byte length
/// of the sequence it starts.
///
/// `None` for anything that cannot lead a sequence: continuation bytes
/// (`10xxxxxx`) and the withdrawn 5/6-byte forms (`11111xxx`).
#[inline]
#[must_use]
pub fn sequence_length(lead: u8) -> Option<usize> {
    if lead & 0x80 == 0x00 {
        Some(1)
    } else if lead & 0xE0 == 0xC0 {
        Some(2)
    } else if lead & 0xF0 == 0xE0 {
        Some(3)
    } else if lead & 0xF8 == 0xF0 {
        Some(4)
    } else {
        None
    }
}

/// Decodes one scalar value from `units[index..]`.
///
/// A non-surrogate unit decodes to itself, consuming one unit. A high
/// surrogate must be followed by a low surrogate; the pair is combined as
/// `(high << 10) + low - 0x35FDC00` and consumes two units. Any other
/// surrogate arrangement, including a high surrogate at the end of input,
/// is an error.
///
/// # Panics
///
/// Panics if `index >= units.len()`.
///
/// # Errors
///
/// [`ConvertError::UnpairedSurrogate`] for a lone or mismatched surrogate.
pub fn decode_utf16(units: &[u16], index: usize) -> Result<(u32, usize), ConvertError> {
    let unit = units[index];
    if !is_surrogate(u32::from(unit)) {
        return Ok((u32::from(unit), 1));
    }
    if is_high_surrogate(unit) {
        if let Some(&low) = units.get(index + 1) {
            if is_low_surrogate(low) {
                let scalar = (u32::from(unit) << 10) + u32::from(low) - 0x035F_DC00;
                return Ok((scalar, 2));
            }
        }
    }
    Err(ConvertError::UnpairedSurrogate { unit, index })
}

/// Encodes one scalar value as UTF-8 into `out`, returning the byte count.
///
/// Continuation bytes are filled lowest-six-bits-first OR `0x80`; the lead
/// byte takes the remaining bits OR'd with the per-length mask.
///
/// # Errors
///
/// [`ConvertError::SurrogateScalar`] for U+D800..=U+DFFF and
/// [`ConvertError::ScalarOutOfRange`] above U+10FFFF.
pub fn encode_utf8(scalar: u32, out: &mut [u8; 4]) -> Result<usize, ConvertError> {
    if is_surrogate(scalar) {
        return Err(ConvertError::SurrogateScalar { value: scalar });
    }
    let len = if scalar < 0x80 {
        1
    } else if scalar < 0x800 {
        2
    } else if scalar < 0x1_0000 {
        3
    } else if scalar <= MAX_SCALAR {
        4
    } else {
        return Err(ConvertError::ScalarOutOfRange { value: scalar });
    };

    let mut rest = scalar;
    for slot in out[1..len].iter_mut().rev() {
        *slot = (rest & 0x3F) as u8 | 0x80;
        rest >>= 6;
    }
    out[0] = rest as u8 | LEAD_MASK[len];
    Ok(len)
}

/// Decodes one scalar value from the UTF-8 sequence starting at `offset`.
///
/// The sequence is structurally checked first (see
/// [`validator::check_sequence`]); decoding itself is then a plain bit
/// accumulation over the continuation bytes. The noncharacters
/// U+FFFE/U+FFFF decode like any other scalar: rejecting them is the
/// untrusted-byte gate's job, not the decoder's, and every scalar a codec
/// encoder accepts must round-trip back through it.
///
/// # Errors
///
/// Any structural violation reported by the validator.
pub fn decode_utf8(bytes: &[u8], offset: usize) -> Result<(u32, usize), ConvertError> {
    let len = match validator::check_sequence(bytes, offset) {
        Ok(len) => len,
        // Structurally sound; always three bytes.
        Err(ConvertError::NonCharacter { .. }) => 3,
        Err(fault) => return Err(fault),
    };
    let lead = bytes[offset];
    let mut scalar = match len {
        1 => u32::from(lead),
        2 => u32::from(lead & 0x1F),
        3 => u32::from(lead & 0x0F),
        _ => u32::from(lead & 0x07),
    };
    for &byte in &bytes[offset + 1..offset + len] {
        scalar = (scalar << 6) | u32::from(byte & 0x3F);
    }
    Ok((scalar, len))
}

/// Encodes one scalar value as UTF-16 into `out`, returning the unit count.
///
/// Scalars below U+10000 become one unit; the rest become a surrogate pair.
///
/// # Errors
///
/// [`ConvertError::SurrogateScalar`] and [`ConvertError::ScalarOutOfRange`]
/// as for [`encode_utf8`].
pub fn encode_utf16(scalar: u32, out: &mut [u16; 2]) -> Result<usize, ConvertError> {
    if is_surrogate(scalar) {
        return Err(ConvertError::SurrogateScalar { value: scalar });
    }
    if scalar < 0x1_0000 {
        out[0] = scalar as u16;
        Ok(1)
    } else if scalar <= MAX_SCALAR {
        let bits = scalar - 0x1_0000;
        out[0] = 0xD800 | (bits >> 10) as u16;
        out[1] = 0xDC00 | (bits & 0x3FF) as u16;
        Ok(2)
    } else {
        Err(ConvertError::ScalarOutOfRange { value: scalar })
    }
}

/// Converts UTF-8 bytes to UTF-32 scalar values.
///
/// # Errors
///
/// Fails at the first structural violation in the input.
pub fn utf8_to_utf32(bytes: &[u8]) -> Result<Vec<u32>, ConvertError> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut offset = 0;
    while offset < bytes.len() {
        let (scalar, len) = decode_utf8(bytes, offset)?;
        out.push(scalar);
        offset += len;
    }
    Ok(out)
}

/// Converts UTF-32 scalar values to UTF-8 bytes.
///
/// # Errors
///
/// Fails at the first surrogate or out-of-range scalar.
pub fn utf32_to_utf8(units: &[u32]) -> Result<Vec<u8>, ConvertError> {
    let mut out = Vec::with_capacity(units.len());
    let mut buf = [0u8; 4];
    for &scalar in units {
        let len = encode_utf8(scalar, &mut buf)?;
        out.extend_from_slice(&buf[..len]);
    }
    Ok(out)
}

/// Converts UTF-8 bytes to UTF-16 units, emitting surrogate pairs for
/// scalars above U+FFFF.
///
/// # Errors
///
/// Fails at the first structural violation in the input.
pub fn utf8_to_utf16(bytes: &[u8]) -> Result<Vec<u16>, ConvertError> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut units = [0u16; 2];
    let mut offset = 0;
    while offset < bytes.len() {
        let (scalar, len) = decode_utf8(bytes, offset)?;
        let count = encode_utf16(scalar, &mut units)?;
        out.extend_from_slice(&units[..count]);
        offset += len;
    }
    Ok(out)
}

/// Converts UTF-16 units to UTF-8 bytes.
///
/// # Errors
///
/// Fails at the first lone or mismatched surrogate.
pub fn utf16_to_utf8(units: &[u16]) -> Result<Vec<u8>, ConvertError> {
    let mut out = Vec::with_capacity(units.len());
    let mut buf = [0u8; 4];
    let mut index = 0;
    while index < units.len() {
        let (scalar, consumed) = decode_utf16(units, index)?;
        let len = encode_utf8(scalar, &mut buf)?;
        out.extend_from_slice(&buf[..len]);
        index += consumed;
    }
    Ok(out)
}

/// Converts UTF-16 units to UTF-32 scalar values, composed through the
/// UTF-8 bridge.
///
/// # Errors
///
/// As for [`utf16_to_utf8`].
pub fn utf16_to_utf32(units: &[u16]) -> Result<Vec<u32>, ConvertError> {
    let bytes = utf16_to_utf8(units)?;
    utf8_to_utf32(&bytes)
}

/// Converts UTF-32 scalar values to UTF-16 units, composed through the
/// UTF-8 bridge.
///
/// # Errors
///
/// As for [`utf32_to_utf8`].
pub fn utf32_to_utf16(units: &[u32]) -> Result<Vec<u16>, ConvertError> {
    let bytes = utf32_to_utf8(units)?;
    utf8_to_utf16(&bytes)
}

/// Converts legacy single-byte text to UTF-8 through the supplied codepage.
///
/// # Errors
///
/// [`ConvertError::Unmappable`] for a byte the codepage has no mapping for.
pub fn legacy_to_utf8(bytes: &[u8], table: &dyn Codepage) -> Result<Vec<u8>, ConvertError> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut buf = [0u8; 4];
    for &byte in bytes {
        let scalar = table
            .byte_to_scalar(byte)
            .ok_or(ConvertError::Unmappable { value: u32::from(byte) })?;
        let len = encode_utf8(scalar, &mut buf)?;
        out.extend_from_slice(&buf[..len]);
    }
    Ok(out)
}

/// Converts UTF-8 bytes to legacy single-byte text through the supplied
/// codepage.
///
/// # Errors
///
/// Structural violations in the input, or [`ConvertError::Unmappable`] for
/// a scalar the codepage cannot represent.
pub fn utf8_to_legacy(bytes: &[u8], table: &dyn Codepage) -> Result<Vec<u8>, ConvertError> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut offset = 0;
    while offset < bytes.len() {
        let (scalar, len) = decode_utf8(bytes, offset)?;
        let byte = table
            .scalar_to_byte(scalar)
            .ok_or(ConvertError::Unmappable { value: scalar })?;
        out.push(byte);
        offset += len;
    }
    Ok(out)
}

/// Copies `src` into a fixed-size buffer of exactly `limit` units, zero
/// padding the tail.
///
/// When `src.len() >= limit` the result holds `limit` source units and no
/// zero terminator; callers that need a guaranteed terminator use
/// [`bounded_units_z`]. This distinction is part of the contract.
#[must_use]
pub fn bounded_units<T: Copy + Default>(src: &[T], limit: usize) -> Vec<T> {
    let mut out = vec![T::default(); limit];
    let count = src.len().min(limit);
    out[..count].copy_from_slice(&src[..count]);
    out
}

/// Like [`bounded_units`], but the final unit is always forced to zero, so
/// the result is terminated even when the source fills the whole buffer.
#[must_use]
pub fn bounded_units_z<T: Copy + Default>(src: &[T], limit: usize) -> Vec<T> {
    let mut out = bounded_units(src, limit);
    if let Some(last) = out.last_mut() {
        *last = T::default();
    }
    out
}

/// Unit of the platform-native wide encoding: UTF-16 on Windows, UTF-32
/// elsewhere.
#[cfg(windows)]
pub type WideUnit = u16;

/// Unit of the platform-native wide encoding: UTF-16 on Windows, UTF-32
/// elsewhere.
#[cfg(not(windows))]
pub type WideUnit = u32;

/// Converts UTF-8 bytes to the platform-native wide form.
///
/// A routing convenience over the two explicit families; callers that need
/// a fixed wide encoding use [`utf8_to_utf16`] or [`utf8_to_utf32`]
/// directly.
///
/// # Errors
///
/// As for the routed-to conversion.
pub fn utf8_to_wide(bytes: &[u8]) -> Result<Vec<WideUnit>, ConvertError> {
    #[cfg(windows)]
    {
        utf8_to_utf16(bytes)
    }
    #[cfg(not(windows))]
    {
        utf8_to_utf32(bytes)
    }
}

/// Converts platform-native wide units to UTF-8 bytes.
///
/// # Errors
///
/// As for the routed-to conversion.
pub fn wide_to_utf8(units: &[WideUnit]) -> Result<Vec<u8>, ConvertError> {
    #[cfg(windows)]
    {
        utf16_to_utf8(units)
    }
    #[cfg(not(windows))]
    {
        utf32_to_utf8(units)
    }
}
