//! Per-codepoint case conversion boundary.

/// Scalar-to-scalar case mapping service.
///
/// [`Utf8String`](crate::Utf8String) applies this per codepoint after
/// decoding to UTF-32 and before re-encoding to UTF-8. The engine makes no
/// claim about locale tailoring (Turkish dotless-I and the like); it takes
/// whatever the service returns.
pub trait CaseFold {
    /// Lowercase mapping of one scalar value.
    fn lowercase(&self, scalar: u32) -> u32;

    /// Uppercase mapping of one scalar value.
    fn uppercase(&self, scalar: u32) -> u32;
}

/// Case mapping backed by core's character tables.
///
/// The service contract is one scalar in, one scalar out, so full mappings
/// that would expand (U+00DF ß → "SS") leave the scalar unchanged, as do
/// values that are not scalar values at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleCaseFold;

impl CaseFold for SimpleCaseFold {
    fn lowercase(&self, scalar: u32) -> u32 {
        let Some(ch) = char::from_u32(scalar) else {
            return scalar;
        };
        let mut mapped = ch.to_lowercase();
        match (mapped.next(), mapped.next()) {
            (Some(single), None) => u32::from(single),
            _ => scalar,
        }
    }

    fn uppercase(&self, scalar: u32) -> u32 {
        let Some(ch) = char::from_u32(scalar) else {
            return scalar;
        };
        let mut mapped = ch.to_uppercase();
        match (mapped.next(), mapped.next()) {
            (Some(single), None) => u32::from(single),
            _ => scalar,
        }
    }
}
