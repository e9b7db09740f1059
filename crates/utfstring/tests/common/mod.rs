#![allow(dead_code)]

use utfstring::Codepage;

/// Partial Windows-1251 table standing in for the platform codepage
/// service: ASCII, the contiguous Cyrillic block and Ё/ё.
pub struct Windows1251;

impl Codepage for Windows1251 {
    fn byte_to_scalar(&self, byte: u8) -> Option<u32> {
        match byte {
            0x00..=0x7F => Some(u32::from(byte)),
            0xA8 => Some(0x0401),
            0xB8 => Some(0x0451),
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
