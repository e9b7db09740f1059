use alloc::vec;
use alloc::vec::Vec;

use super::{Windows1251, s};
use crate::{Codepoint, Latin1, TextSource, Utf8String, codec};

// Mixed two-, three- and four-byte territory; used across the suite the way
// a fixture corpus would be.
const CORPUS: &str = "тЕкст1 王明 Mötley Crüe";

fn corpus_utf16() -> Vec<u16> {
    CORPUS.encode_utf16().collect()
}

fn corpus_utf32() -> Vec<u32> {
    CORPUS.chars().map(u32::from).collect()
}

#[test]
fn ascii_a_to_utf32() {
    assert_eq!(s("A").to_utf32(), vec![0x41]);
}

#[test]
fn emoji_surrogate_pair_to_utf8() {
    let built = Utf8String::from_utf16(&[0xD83D, 0xDE00]).unwrap();
    assert_eq!(built.as_bytes(), [0xF0, 0x9F, 0x98, 0x80]);
    assert_eq!(built.length(), 1);
    assert_eq!(built.size(), 4);
}

#[test]
fn every_source_encoding_builds_the_same_string() {
    let from_str = s(CORPUS);
    let from_utf16 = Utf8String::from_utf16(&corpus_utf16()).unwrap();
    let from_utf32 = Utf8String::from_utf32(&corpus_utf32()).unwrap();
    let from_bytes = Utf8String::from_utf8(CORPUS.as_bytes().to_vec()).unwrap();
    assert_eq!(from_str, from_utf16);
    assert_eq!(from_utf16, from_utf32);
    assert_eq!(from_utf32, from_bytes);
}

#[test]
fn source_adapters_route_to_the_same_place() {
    let units = corpus_utf16();
    let via_adapter = Utf8String::from_source(TextSource::from(units.as_slice())).unwrap();
    assert_eq!(via_adapter, s(CORPUS));
}

#[test]
fn conversions_out_round_trip() {
    let string = s(CORPUS);
    assert_eq!(string.to_utf16(), corpus_utf16());
    assert_eq!(string.to_utf32(), corpus_utf32());
    assert_eq!(Utf8String::from_wide(&string.to_wide()).unwrap(), string);
}

#[test]
fn latin1_round_trip() {
    let legacy = [0x63, 0x61, 0x66, 0xE9]; // "café"
    let string = Utf8String::from_legacy(&legacy, &Latin1).unwrap();
    assert_eq!(string, "café");
    assert_eq!(string.to_legacy(&Latin1).unwrap(), legacy);
}

#[test]
fn windows_1251_round_trip() {
    let legacy = b"\xCF\xF0\xE8\xE2\xE5\xF2, \xEC\xE8\xF0";
    let string = Utf8String::from_legacy(legacy, &Windows1251).unwrap();
    assert_eq!(string, "Привет, мир");
    assert_eq!(string.to_legacy(&Windows1251).unwrap(), legacy);
}

#[test]
fn codepoint_from_legacy_matches_string_path() {
    let cp = Codepoint::from_legacy_byte(0xA8, &Windows1251).unwrap();
    assert_eq!(cp, 'Ё');
}

#[test]
fn length_equals_size_only_for_ascii() {
    let ascii = s("plain ascii, 42");
    assert_eq!(ascii.length(), ascii.size());

    let mixed = s(CORPUS);
    assert!(mixed.length() < mixed.size());
    assert_eq!(mixed.length(), CORPUS.chars().count());
    assert_eq!(mixed.size(), CORPUS.len());
}

#[test]
fn wide_codec_families_stay_available() {
    // Both explicit families exist regardless of platform; the wide alias
    // is only a router over them.
    let bytes = CORPUS.as_bytes();
    assert_eq!(codec::utf8_to_utf16(bytes).unwrap(), corpus_utf16());
    assert_eq!(codec::utf8_to_utf32(bytes).unwrap(), corpus_utf32());
    assert_eq!(
        codec::utf16_to_utf32(&corpus_utf16()).unwrap(),
        corpus_utf32()
    );
    assert_eq!(
        codec::utf32_to_utf16(&corpus_utf32()).unwrap(),
        corpus_utf16()
    );
}
