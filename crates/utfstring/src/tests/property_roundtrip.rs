use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use crate::{Codepoint, Utf8String, codec, validator};

#[test]
fn every_scalar_round_trips_in_every_format() {
    let mut utf8 = [0u8; 4];
    let mut utf16 = [0u16; 2];
    for scalar in 0..=codec::MAX_SCALAR {
        if (0xD800..=0xDFFF).contains(&scalar) {
            continue;
        }
        let len = codec::encode_utf8(scalar, &mut utf8).unwrap();
        assert_eq!(codec::decode_utf8(&utf8[..len], 0).unwrap(), (scalar, len));
        // The byte gate accepts everything the encoder emits, except the
        // two noncharacters it refuses by contract.
        let expect_valid = scalar != 0xFFFE && scalar != 0xFFFF;
        assert_eq!(validator::is_valid(&utf8[..len]), expect_valid, "U+{scalar:04X}");

        let count = codec::encode_utf16(scalar, &mut utf16).unwrap();
        assert_eq!(
            codec::decode_utf16(&utf16[..count], 0).unwrap(),
            (scalar, count)
        );
    }
}

#[test]
fn utf16_round_trip_quickcheck() {
    fn prop(text: String) -> bool {
        let units: Vec<u16> = text.encode_utf16().collect();
        match Utf8String::from_utf16(&units) {
            Ok(string) => string.as_str() == text && string.to_utf16() == units,
            Err(_) => false,
        }
    }
    QuickCheck::new().tests(1_000).quickcheck(prop as fn(String) -> bool);
}

#[test]
fn utf32_round_trip_quickcheck() {
    fn prop(text: String) -> bool {
        let scalars: Vec<u32> = text.chars().map(u32::from).collect();
        match Utf8String::from_utf32(&scalars) {
            Ok(string) => string.as_str() == text && string.to_utf32() == scalars,
            Err(_) => false,
        }
    }
    QuickCheck::new().tests(1_000).quickcheck(prop as fn(String) -> bool);
}

#[test]
fn length_never_exceeds_size_quickcheck() {
    fn prop(text: String) -> bool {
        let Ok(string) = text.parse::<Utf8String>() else {
            return false;
        };
        let ascii_only = text.bytes().all(|b| b < 0x80);
        string.length() <= string.size() && (string.length() == string.size()) == ascii_only
    }
    QuickCheck::new().tests(1_000).quickcheck(prop as fn(String) -> bool);
}

#[test]
fn split_join_is_the_identity_quickcheck() {
    fn prop(text: String, delimiter: char) -> bool {
        let Ok(string) = text.parse::<Utf8String>() else {
            return false;
        };
        let delimiter = Codepoint::from(delimiter);
        let mut set = crate::CodepointSet::new();
        set.insert(delimiter);
        // Tokens never contain the delimiter, so join inverts split even
        // when the input contains runs of delimiters or none at all.
        Utf8String::join(&string.split(&set), delimiter) == string
    }
    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(String, char) -> bool);
}

#[test]
fn trim_is_idempotent_quickcheck() {
    fn prop(text: String, pad: char) -> bool {
        let Ok(mut once) = text.parse::<Utf8String>() else {
            return false;
        };
        let pad = Codepoint::from(pad);
        once.trim(pad);
        let mut twice = once.clone();
        twice.trim(pad);
        once == twice
    }
    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(String, char) -> bool);
}

#[test]
fn insert_then_remove_restores_quickcheck() {
    fn prop(text: String, ch: char, index: usize) -> bool {
        let Ok(original) = text.parse::<Utf8String>() else {
            return false;
        };
        let mut edited = original.clone();
        let index = index % (original.length() + 1);
        if !edited.insert_at(index, Codepoint::from(ch)) {
            return false;
        }
        edited.remove_at(index) && edited == original
    }
    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(String, char, usize) -> bool);
}

#[test]
fn substr_halves_rebuild_the_string_quickcheck() {
    fn prop(text: String, at: usize) -> bool {
        let Ok(string) = text.parse::<Utf8String>() else {
            return false;
        };
        let at = at % (string.length() + 1);
        string.substr(0, at) + &string.substr_from(at) == string
    }
    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(String, usize) -> bool);
}

// The byte gate is strictly narrower than str's own rules: anything the
// validator admits must also be admissible as a str.
#[quickcheck]
fn validity_implies_str_validity(bytes: Vec<u8>) -> bool {
    !validator::is_valid(&bytes) || core::str::from_utf8(&bytes).is_ok()
}
