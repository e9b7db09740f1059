use thiserror::Error;

/// Error produced by encoding conversion and validation.
///
/// A conversion fails on the first malformed unit and never substitutes a
/// replacement character or returns a partial result. Offsets and indices
/// refer to the faulty unit in the *source* sequence: the lead byte of a bad
/// UTF-8 sequence, or the unit index of a bad UTF-16 unit.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    /// A byte that cannot begin a UTF-8 sequence: a stray continuation byte
    /// or one of the withdrawn 5/6-byte lead forms.
    #[error("invalid UTF-8 lead byte {byte:#04x} at offset {offset}")]
    InvalidLeadByte {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the offending byte.
        offset: usize,
    },

    /// Input ended in the middle of a multi-byte sequence.
    #[error("truncated UTF-8 sequence at offset {offset}")]
    Truncated {
        /// Byte offset of the sequence's lead byte.
        offset: usize,
    },

    /// A trailing byte of a multi-byte sequence is not `10xxxxxx`.
    #[error("missing UTF-8 continuation byte in sequence at offset {offset}")]
    InvalidContinuation {
        /// Byte offset of the sequence's lead byte.
        offset: usize,
    },

    /// A sequence using more bytes than the minimal encoding of its scalar
    /// value.
    #[error("overlong UTF-8 encoding at offset {offset}")]
    Overlong {
        /// Byte offset of the sequence's lead byte.
        offset: usize,
    },

    /// A three-byte sequence encoding a scalar in U+D800..=U+DFFF.
    #[error("UTF-8 encoded surrogate at offset {offset}")]
    EncodedSurrogate {
        /// Byte offset of the sequence's lead byte.
        offset: usize,
    },

    /// The three-byte encoding of U+FFFE or U+FFFF.
    #[error("noncharacter U+FFFE/U+FFFF at offset {offset}")]
    NonCharacter {
        /// Byte offset of the sequence's lead byte.
        offset: usize,
    },

    /// A four-byte sequence whose scalar value exceeds U+10FFFF.
    #[error("UTF-8 sequence beyond U+10FFFF at offset {offset}")]
    OutOfRangeSequence {
        /// Byte offset of the sequence's lead byte.
        offset: usize,
    },

    /// A UTF-16 surrogate unit without a valid high+low partner.
    #[error("unpaired UTF-16 surrogate {unit:#06x} at index {index}")]
    UnpairedSurrogate {
        /// The offending unit.
        unit: u16,
        /// Unit index of the offending unit.
        index: usize,
    },

    /// A scalar value in the surrogate range passed to an encoder.
    #[error("scalar value {value:#x} is a surrogate")]
    SurrogateScalar {
        /// The rejected scalar value.
        value: u32,
    },

    /// A scalar value above U+10FFFF passed to an encoder.
    #[error("scalar value {value:#x} exceeds U+10FFFF")]
    ScalarOutOfRange {
        /// The rejected scalar value.
        value: u32,
    },

    /// The legacy codepage has no mapping for the given byte or scalar.
    #[error("no codepage mapping for value {value:#x}")]
    Unmappable {
        /// The byte or scalar value the codepage could not map.
        value: u32,
    },
}

impl ConvertError {
    /// Byte offset or unit index the error refers to, where one exists.
    ///
    /// Encoder-side errors (`SurrogateScalar`, `ScalarOutOfRange`,
    /// `Unmappable`) carry the rejected value instead of a position.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match *self {
            Self::InvalidLeadByte { offset, .. }
            | Self::Truncated { offset }
            | Self::InvalidContinuation { offset }
            | Self::Overlong { offset }
            | Self::EncodedSurrogate { offset }
            | Self::NonCharacter { offset }
            | Self::OutOfRangeSequence { offset } => Some(offset),
            Self::UnpairedSurrogate { index, .. } => Some(index),
            Self::SurrogateScalar { .. }
            | Self::ScalarOutOfRange { .. }
            | Self::Unmappable { .. } => None,
        }
    }
}
