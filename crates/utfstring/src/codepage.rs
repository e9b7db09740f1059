//! Legacy single-byte codepage boundary.

/// Table-driven byte ⇄ scalar mapping for one legacy 8-bit encoding.
///
/// The conversion engine calls this as an opaque pair of partial functions
/// and embeds no table of its own; the table lives with the implementor
/// (platform service, static array, generated module). Returning `None`
/// marks a unit unmappable and fails the enclosing conversion with
/// [`ConvertError::Unmappable`](crate::ConvertError::Unmappable).
pub trait Codepage {
    /// Scalar value for a legacy byte, or `None` if the byte is unmapped.
    fn byte_to_scalar(&self, byte: u8) -> Option<u32>;

    /// Legacy byte for a scalar value, or `None` if unrepresentable.
    fn scalar_to_byte(&self, scalar: u32) -> Option<u8>;
}

/// ISO-8859-1, the identity codepage: every byte is its own scalar value.
///
/// Ships as the default collaborator because it needs no table; real
/// deployments supply their platform's table (Windows-1251 and friends)
/// through their own [`Codepage`] impl.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1;

impl Codepage for Latin1 {
    fn byte_to_scalar(&self, byte: u8) -> Option<u32> {
        Some(u32::from(byte))
    }

    fn scalar_to_byte(&self, scalar: u32) -> Option<u8> {
        u8::try_from(scalar).ok()
    }
}
