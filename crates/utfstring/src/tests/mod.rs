mod convert_good;
mod property_roundtrip;

use crate::{Codepage, Utf8String};

/// Partial Windows-1251 table: ASCII, the contiguous Cyrillic block and Ё/ё.
/// Enough coverage to exercise the codepage boundary with a non-identity
/// mapping.
pub(crate) struct Windows1251;

impl Codepage for Windows1251 {
    fn byte_to_scalar(&self, byte: u8) -> Option<u32> {
        match byte {
            0x00..=0x7F => Some(u32::from(byte)),
            0xA8 => Some(0x0401), // Ё
            0xB8 => Some(0x0451), // ё
            0xC0..=0xFF => Some(0x0410 + u32::from(byte) - 0xC0),
            _ => None,
        }
    }

    fn scalar_to_byte(&self, scalar: u32) -> Option<u8> {
        match scalar {
            0x00..=0x7F => Some(scalar as u8),
            0x0401 => Some(0xA8),
            0x0451 => Some(0xB8),
            0x0410..=0x044F => Some((scalar - 0x0410 + 0xC0) as u8),
            _ => None,
        }
    }
}

pub(crate) fn s(text: &str) -> Utf8String {
    text.parse().unwrap()
}
