//! Well-formedness checking for UTF-8 byte buffers.
//!
//! The scan classifies each lead byte via [`codec::sequence_length`] and then
//! applies the length-specific structural constraints: continuation bytes,
//! overlong starts, the `0xED` surrogate forms, the noncharacters
//! U+FFFE/U+FFFF, and four-byte sequences beyond U+10FFFF. The first fault
//! position is reported; this is the sole gate through which untrusted bytes
//! become an [`Utf8String`](crate::Utf8String).

use crate::{codec, error::ConvertError};

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Checks the structural constraints of the single sequence starting at
/// `offset` and returns its byte length.
///
/// All violations report the lead byte's offset, including faults in a
/// trailing byte.
///
/// # Errors
///
/// One of the `ConvertError` structural variants; see the module docs for
/// the rule set.
pub fn check_sequence(bytes: &[u8], offset: usize) -> Result<usize, ConvertError> {
    let lead = *bytes
        .get(offset)
        .ok_or(ConvertError::Truncated { offset })?;
    let len = codec::sequence_length(lead)
        .ok_or(ConvertError::InvalidLeadByte { byte: lead, offset })?;
    if offset + len > bytes.len() {
        return Err(ConvertError::Truncated { offset });
    }
    if !bytes[offset + 1..offset + len].iter().all(|&b| is_continuation(b)) {
        return Err(ConvertError::InvalidContinuation { offset });
    }
    match len {
        2 => {
            // 1100000x would re-encode U+0000..U+007F.
            if lead & 0xFE == 0xC0 {
                return Err(ConvertError::Overlong { offset });
            }
        }
        3 => {
            let second = bytes[offset + 1];
            if lead == 0xE0 && second & 0xE0 == 0x80 {
                return Err(ConvertError::Overlong { offset });
            }
            if lead == 0xED && second & 0xE0 == 0xA0 {
                return Err(ConvertError::EncodedSurrogate { offset });
            }
            if lead == 0xEF && second == 0xBF && bytes[offset + 2] & 0xFE == 0xBE {
                return Err(ConvertError::NonCharacter { offset });
            }
        }
        4 => {
            let second = bytes[offset + 1];
            if lead == 0xF0 && second & 0xF0 == 0x80 {
                return Err(ConvertError::Overlong { offset });
            }
            if (lead == 0xF4 && second > 0x8F) || lead > 0xF4 {
                return Err(ConvertError::OutOfRangeSequence { offset });
            }
        }
        _ => {}
    }
    Ok(len)
}

/// Scans the whole buffer, failing at the first structural violation.
///
/// # Errors
///
/// The fault, with its lead-byte offset.
pub fn validate(bytes: &[u8]) -> Result<(), ConvertError> {
    let mut offset = 0;
    while offset < bytes.len() {
        offset += check_sequence(bytes, offset)?;
    }
    Ok(())
}

/// Byte position of the first structural violation, or `None` for a
/// well-formed buffer.
#[must_use]
pub fn first_invalid_position(bytes: &[u8]) -> Option<usize> {
    validate(bytes).err().and_then(|fault| fault.position())
}

/// True iff the whole buffer is well-formed under this crate's rules.
///
/// Stricter than plain UTF-8: the noncharacters U+FFFE and U+FFFF are also
/// rejected.
#[must_use]
pub fn is_valid(bytes: &[u8]) -> bool {
    validate(bytes).is_ok()
}
