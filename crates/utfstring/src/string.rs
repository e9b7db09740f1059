//! Codepoint-indexed operations over an owned UTF-8 buffer.

#![allow(clippy::must_use_candidate)]

use core::{
    fmt,
    ops::{Add, AddAssign},
    str::FromStr,
};

use alloc::vec::Vec;

use bstr::ByteSlice;

use crate::{
    casefold::CaseFold,
    codec,
    codepage::Codepage,
    codepoint::{Codepoint, CodepointSet},
    error::ConvertError,
    source::TextSource,
    validator,
};

/// Index sentinel accepted by [`Utf8String::insert_at`] meaning "append".
pub const INSERT_AT_END: usize = usize::MAX;

/// An owned UTF-8 byte buffer addressed by codepoint index.
///
/// Two sizes are distinct and both first-class: [`length`](Self::length)
/// counts codepoints, [`size`](Self::size) counts bytes. `length <= size`
/// always, with equality iff the text is pure ASCII.
///
/// Index translation walks the buffer from the start using the lead-byte
/// classifier, so a codepoint-indexed operation costs O(index). No offset
/// cache is kept: one buffer is the whole footprint, and arbitrary single
/// edits need no cache maintenance. Callers doing heavy positional work
/// over long strings should iterate bytes themselves via
/// [`as_bytes`](Self::as_bytes).
///
/// The buffer holds structurally well-formed UTF-8 whenever a public
/// operation returns. Untrusted *bytes* additionally pass the full
/// [`validator`] gate (which also refuses the noncharacters U+FFFE/U+FFFF)
/// unconditionally, in every build; text arriving as `str`, UTF-16, UTF-32
/// or codepoints is sound by conversion. The only opt-out is the `unsafe`
/// [`from_utf8_unchecked`](Self::from_utf8_unchecked) for callers that have
/// already run the gate.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utf8String {
    data: Vec<u8>,
}

impl Utf8String {
    /// An empty string.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Builds from any supported source encoding.
    ///
    /// # Errors
    ///
    /// Whatever the source's conversion reports; see
    /// [`TextSource::into_utf8`].
    pub fn from_source(source: TextSource<'_>) -> Result<Self, ConvertError> {
        Ok(Self { data: source.into_utf8()? })
    }

    /// Takes ownership of UTF-8 bytes after validating them.
    ///
    /// # Errors
    ///
    /// The first structural violation; the bytes are dropped.
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self, ConvertError> {
        validator::validate(&bytes)?;
        Ok(Self { data: bytes })
    }

    /// Takes ownership of UTF-8 bytes without running the validity gate.
    ///
    /// # Safety
    ///
    /// The bytes must be well-formed under [`validator::validate`]. A
    /// buffer that is not silently corrupts length and offset computations
    /// and breaks [`as_str`](Self::as_str).
    #[must_use]
    pub unsafe fn from_utf8_unchecked(bytes: Vec<u8>) -> Self {
        debug_assert!(validator::is_valid(&bytes));
        Self { data: bytes }
    }

    /// Builds from UTF-16 units.
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnpairedSurrogate`] on a lone or mismatched
    /// surrogate.
    pub fn from_utf16(units: &[u16]) -> Result<Self, ConvertError> {
        Self::from_source(TextSource::Utf16(units))
    }

    /// Builds from UTF-32 scalar values.
    ///
    /// # Errors
    ///
    /// Surrogate or out-of-range scalars.
    pub fn from_utf32(units: &[u32]) -> Result<Self, ConvertError> {
        Self::from_source(TextSource::Utf32(units))
    }

    /// Builds from legacy single-byte text through the supplied codepage.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Unmappable`] for bytes the codepage cannot map.
    pub fn from_legacy(bytes: &[u8], table: &dyn Codepage) -> Result<Self, ConvertError> {
        Self::from_source(TextSource::Legacy(bytes, table))
    }

    /// Builds from platform-native wide units.
    ///
    /// # Errors
    ///
    /// As for the routed-to conversion; see [`codec::wide_to_utf8`].
    pub fn from_wide(units: &[codec::WideUnit]) -> Result<Self, ConvertError> {
        Ok(Self { data: codec::wide_to_utf8(units)? })
    }

    /// `n` copies of one codepoint.
    #[must_use]
    pub fn from_codepoint(cp: Codepoint, n: usize) -> Self {
        let mut data = Vec::with_capacity(cp.as_bytes().len() * n);
        for _ in 0..n {
            data.extend_from_slice(cp.as_bytes());
        }
        Self { data }
    }

    /// The buffer as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Valid-UTF-8 invariant; the crate's profile is a subset of str's.
        unsafe { core::str::from_utf8_unchecked(&self.data) }
    }

    /// The raw UTF-8 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the string, returning the byte buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Count of codepoints.
    ///
    /// Returns 0 if a malformed lead byte is encountered before the end of
    /// the buffer: a defensive fallback (only reachable through the
    /// `unsafe` constructor), not a validity claim.
    #[must_use]
    pub fn length(&self) -> usize {
        let mut len = 0;
        let mut offset = 0;
        while offset < self.data.len() {
            match codec::sequence_length(self.data[offset]) {
                Some(n) if offset + n <= self.data.len() => {
                    len += 1;
                    offset += n;
                }
                _ => return 0,
            }
        }
        len
    }

    /// Count of bytes, always exact.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// True iff [`length`](Self::length) is 0.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Byte offset of the `index`-th codepoint, or `None` when out of
    /// range (or when a malformed sequence intervenes).
    #[must_use]
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        let mut remaining = index;
        let mut offset = 0;
        while offset < self.data.len() {
            let n = codec::sequence_length(self.data[offset])?;
            if offset + n > self.data.len() {
                return None;
            }
            if remaining == 0 {
                return Some(offset);
            }
            remaining -= 1;
            offset += n;
        }
        None
    }

    /// Byte width of the `index`-th codepoint, or `None` when out of range.
    #[must_use]
    pub fn size_of(&self, index: usize) -> Option<usize> {
        let offset = self.offset_of(index)?;
        codec::sequence_length(self.data[offset])
    }

    /// A copy of the `index`-th codepoint; empty when out of range.
    #[must_use]
    pub fn char_at(&self, index: usize) -> Codepoint {
        let Some(offset) = self.offset_of(index) else {
            return Codepoint::empty();
        };
        let Some(n) = codec::sequence_length(self.data[offset]) else {
            return Codepoint::empty();
        };
        Codepoint::from_valid_utf8(&self.data[offset..offset + n])
    }

    /// The last codepoint; empty for an empty string.
    #[must_use]
    pub fn last_char(&self) -> Codepoint {
        let len = self.length();
        if len == 0 {
            return Codepoint::empty();
        }
        self.char_at(len - 1)
    }

    /// Inserts before codepoint `index`; `index == length()` (or the
    /// [`INSERT_AT_END`] sentinel) appends. Fails, leaving the string
    /// unchanged, when `index > length()`.
    pub fn insert_at(&mut self, index: usize, cp: Codepoint) -> bool {
        let len = self.length();
        let index = if index == INSERT_AT_END { len } else { index };
        if index > len {
            return false;
        }
        let pos = if index == len {
            self.data.len()
        } else {
            let Some(pos) = self.offset_of(index) else {
                return false;
            };
            pos
        };
        self.data.splice(pos..pos, cp.as_bytes().iter().copied());
        true
    }

    /// Removes the codepoint at `index`. Fails when `index >= length()`.
    pub fn remove_at(&mut self, index: usize) -> bool {
        let Some(pos) = self.offset_of(index) else {
            return false;
        };
        let Some(n) = codec::sequence_length(self.data[pos]) else {
            return false;
        };
        self.data.drain(pos..pos + n);
        true
    }

    /// Replaces the codepoint at `index`. Fails when `index >= length()`.
    pub fn replace_at(&mut self, index: usize, cp: Codepoint) -> bool {
        let Some(pos) = self.offset_of(index) else {
            return false;
        };
        let Some(n) = codec::sequence_length(self.data[pos]) else {
            return false;
        };
        self.data.splice(pos..pos + n, cp.as_bytes().iter().copied());
        true
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Appends one codepoint.
    pub fn push_codepoint(&mut self, cp: Codepoint) {
        self.data.extend_from_slice(cp.as_bytes());
    }

    /// Appends another string.
    pub fn push_string(&mut self, other: &Utf8String) {
        self.data.extend_from_slice(&other.data);
    }

    /// Appends text from any supported source encoding.
    ///
    /// Atomic: on error the buffer is left exactly as it was.
    ///
    /// # Errors
    ///
    /// As for [`TextSource::into_utf8`].
    pub fn push_source(&mut self, source: TextSource<'_>) -> Result<(), ConvertError> {
        let bytes = source.into_utf8()?;
        self.data.extend_from_slice(&bytes);
        Ok(())
    }

    /// Codepoint-range slice: up to `count` codepoints starting at `pos`.
    ///
    /// `pos >= length()` yields an empty string; `count` is clamped to the
    /// available codepoints.
    #[must_use]
    pub fn substr(&self, pos: usize, count: usize) -> Self {
        let len = self.length();
        if pos >= len {
            return Self::new();
        }
        let end = pos.saturating_add(count).min(len);
        let Some(start_byte) = self.offset_of(pos) else {
            return Self::new();
        };
        let end_byte = if end == len {
            self.data.len()
        } else {
            let Some(end_byte) = self.offset_of(end) else {
                return Self::new();
            };
            end_byte
        };
        Self { data: self.data[start_byte..end_byte].to_vec() }
    }

    /// Slice from `pos` to the end.
    #[must_use]
    pub fn substr_from(&self, pos: usize) -> Self {
        self.substr(pos, usize::MAX)
    }

    /// Splits on any codepoint in `delimiters`.
    ///
    /// Every delimiter occurrence terminates the current token, possibly
    /// empty: a leading or trailing delimiter produces an empty token at
    /// that end, an input with no delimiters yields a single-element
    /// result, and an empty input yields one empty token, never zero
    /// elements. [`join`](Self::join) relies on this shape to invert.
    #[must_use]
    pub fn split(&self, delimiters: &CodepointSet) -> Vec<Utf8String> {
        let mut tokens = Vec::new();
        let mut token = Self::new();
        let mut offset = 0;
        while offset < self.data.len() {
            let Some(n) = codec::sequence_length(self.data[offset]) else {
                break;
            };
            let cp = Codepoint::from_valid_utf8(&self.data[offset..offset + n]);
            if delimiters.contains(&cp) {
                tokens.push(core::mem::take(&mut token));
            } else {
                token.data.extend_from_slice(cp.as_bytes());
            }
            offset += n;
        }
        tokens.push(token);
        tokens
    }

    /// Splits on any codepoint of `delimiters`.
    #[must_use]
    pub fn split_str(&self, delimiters: &str) -> Vec<Utf8String> {
        let set: CodepointSet = delimiters.chars().map(Codepoint::from).collect();
        self.split(&set)
    }

    /// Concatenates `tokens` with `delimiter` interposed.
    ///
    /// Inverse of [`split`](Self::split) whenever the delimiter occurs in
    /// no token.
    #[must_use]
    pub fn join(tokens: &[Utf8String], delimiter: Codepoint) -> Utf8String {
        let mut out = Utf8String::new();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                out.push_codepoint(delimiter);
            }
            out.push_string(token);
        }
        out
    }

    /// Removes the maximal prefix of codepoints equal to `pad`.
    ///
    /// A literal-codepoint match, not a whitespace class.
    pub fn trim_start(&mut self, pad: Codepoint) {
        if pad.is_empty() {
            return;
        }
        let unit = pad.as_bytes();
        let mut start = 0;
        while self.data[start..].starts_with(unit) {
            start += unit.len();
        }
        if start > 0 {
            self.data.drain(..start);
        }
    }

    /// Removes the maximal suffix of codepoints equal to `pad`.
    pub fn trim_end(&mut self, pad: Codepoint) {
        if pad.is_empty() {
            return;
        }
        let unit = pad.as_bytes();
        let mut end = self.data.len();
        while self.data[..end].ends_with(unit) {
            end -= unit.len();
        }
        self.data.truncate(end);
    }

    /// [`trim_start`](Self::trim_start) then [`trim_end`](Self::trim_end).
    pub fn trim(&mut self, pad: Codepoint) {
        self.trim_start(pad);
        self.trim_end(pad);
    }

    /// Deletes every occurrence of `cp` in place.
    ///
    /// Single compaction pass: the read cursor skips matches while
    /// everything else shifts left, O(size) overall.
    pub fn remove(&mut self, cp: Codepoint) {
        if cp.is_empty() {
            return;
        }
        let unit = cp.as_bytes();
        let mut read = 0;
        let mut write = 0;
        while read < self.data.len() {
            let Some(n) = codec::sequence_length(self.data[read]) else {
                break;
            };
            if &self.data[read..read + n] == unit {
                read += n;
                continue;
            }
            if write != read {
                self.data.copy_within(read..read + n, write);
            }
            read += n;
            write += n;
        }
        self.data.truncate(write);
    }

    /// Replaces every occurrence of the codepoint `find` with `replace`,
    /// via repeated search-and-replace at codepoint granularity.
    pub fn replace_all(&mut self, find: Codepoint, replace: Codepoint) {
        if find == replace || find.is_empty() {
            return;
        }
        let needle = Utf8String::from_codepoint(find, 1);
        while let Some(index) = self.index_of(&needle, 0) {
            self.replace_at(index, replace);
        }
    }

    /// Replaces every occurrence of the substring `find` with `replace`,
    /// returning whether anything changed.
    ///
    /// The search resumes past each replacement, so a `replace` containing
    /// `find` cannot loop.
    pub fn replace_string(&mut self, find: &Utf8String, replace: &Utf8String) -> bool {
        if find.data.is_empty() {
            return false;
        }
        let mut replaced = false;
        let mut start = 0;
        while let Some(at) = self.index_of(find, start) {
            let rebuilt =
                self.substr(0, at) + replace + &self.substr_from(at + find.length());
            *self = rebuilt;
            start = at + replace.length();
            replaced = true;
        }
        replaced
    }

    /// Codepoint index of the first occurrence of `needle` at or after
    /// codepoint `from`, or `None`.
    ///
    /// The match itself is a byte-level substring search; the found byte
    /// offset is translated back by a forward rescan from the buffer
    /// start, so each call costs O(size) regardless of match position.
    #[must_use]
    pub fn index_of(&self, needle: &Utf8String, from: usize) -> Option<usize> {
        let from_byte = self.index_to_byte_clamped(from);
        let found = self.data[from_byte..].find(&needle.data)? + from_byte;
        self.byte_to_index(found)
    }

    /// Codepoint index of the last occurrence of `needle`, or `None`.
    #[must_use]
    pub fn last_index_of(&self, needle: &Utf8String) -> Option<usize> {
        let found = self.data.rfind(&needle.data)?;
        self.byte_to_index(found)
    }

    /// True iff the buffer begins with `needle`.
    #[must_use]
    pub fn starts_with(&self, needle: &Utf8String) -> bool {
        self.data.starts_with(&needle.data)
    }

    /// True iff the buffer ends with `needle`.
    #[must_use]
    pub fn ends_with(&self, needle: &Utf8String) -> bool {
        self.data.ends_with(&needle.data)
    }

    /// True iff `needle` occurs at or after codepoint `from`.
    ///
    /// `from >= length()` is always false, even for an empty needle.
    #[must_use]
    pub fn includes(&self, needle: &Utf8String, from: usize) -> bool {
        if from >= self.length() {
            return false;
        }
        let from_byte = self.index_to_byte_clamped(from);
        self.data[from_byte..].contains_str(&needle.data)
    }

    /// Lowercases in place through the supplied case-folding service,
    /// round-tripping codepoints via UTF-32.
    ///
    /// Atomic: if the service maps any codepoint to an unencodable scalar
    /// the buffer is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Surrogate or out-of-range scalars coming back from the service.
    pub fn make_lowercase(&mut self, service: &dyn CaseFold) -> Result<(), ConvertError> {
        self.remap(|scalar| service.lowercase(scalar))
    }

    /// Uppercases in place; see [`make_lowercase`](Self::make_lowercase).
    ///
    /// # Errors
    ///
    /// As for [`make_lowercase`](Self::make_lowercase).
    pub fn make_uppercase(&mut self, service: &dyn CaseFold) -> Result<(), ConvertError> {
        self.remap(|scalar| service.uppercase(scalar))
    }

    /// Case-insensitive equality under the supplied service.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &Utf8String, service: &dyn CaseFold) -> bool {
        let fold = |s: &Utf8String| -> Vec<u32> {
            s.to_utf32().iter().map(|&scalar| service.lowercase(scalar)).collect()
        };
        fold(self) == fold(other)
    }

    /// The buffer converted to UTF-16 units.
    ///
    /// An internally inconsistent buffer (only reachable through the
    /// `unsafe` constructor) converts to an empty result.
    #[must_use]
    pub fn to_utf16(&self) -> Vec<u16> {
        codec::utf8_to_utf16(&self.data).unwrap_or_default()
    }

    /// The buffer converted to UTF-32 scalar values.
    #[must_use]
    pub fn to_utf32(&self) -> Vec<u32> {
        codec::utf8_to_utf32(&self.data).unwrap_or_default()
    }

    /// The buffer converted through the supplied codepage.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Unmappable`] for codepoints outside the codepage.
    pub fn to_legacy(&self, table: &dyn Codepage) -> Result<Vec<u8>, ConvertError> {
        codec::utf8_to_legacy(&self.data, table)
    }

    /// The buffer converted to platform-native wide units.
    #[must_use]
    pub fn to_wide(&self) -> Vec<codec::WideUnit> {
        codec::utf8_to_wide(&self.data).unwrap_or_default()
    }

    fn remap(&mut self, map: impl Fn(u32) -> u32) -> Result<(), ConvertError> {
        let mapped: Vec<u32> = self.to_utf32().iter().map(|&scalar| map(scalar)).collect();
        self.data = codec::utf32_to_utf8(&mapped)?;
        Ok(())
    }

    /// Byte offset of codepoint `index`, clamped to the buffer end when
    /// the index is at or past the last codepoint.
    fn index_to_byte_clamped(&self, index: usize) -> usize {
        let mut remaining = index;
        let mut offset = 0;
        while offset < self.data.len() && remaining > 0 {
            match codec::sequence_length(self.data[offset]) {
                Some(n) => {
                    offset += n;
                    remaining -= 1;
                }
                None => return self.data.len(),
            }
        }
        offset
    }

    /// Codepoint index of the codepoint starting at byte `target`, by
    /// forward rescan. `None` when `target` is the end of the buffer or
    /// not a boundary the scan lands on.
    fn byte_to_index(&self, target: usize) -> Option<usize> {
        let mut index = 0;
        let mut offset = 0;
        while offset < self.data.len() {
            if offset == target {
                return Some(index);
            }
            let n = codec::sequence_length(self.data[offset])?;
            index += 1;
            offset += n;
        }
        None
    }
}

impl FromStr for Utf8String {
    type Err = ConvertError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_source(TextSource::Str(text))
    }
}

impl TryFrom<&str> for Utf8String {
    type Error = ConvertError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Codepoint> for Utf8String {
    fn from(cp: Codepoint) -> Self {
        Self::from_codepoint(cp, 1)
    }
}

impl fmt::Display for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for Utf8String {
    fn eq(&self, other: &str) -> bool {
        self.data == other.as_bytes()
    }
}

impl PartialEq<&str> for Utf8String {
    fn eq(&self, other: &&str) -> bool {
        self.data == other.as_bytes()
    }
}

impl Add<&Utf8String> for Utf8String {
    type Output = Utf8String;

    fn add(mut self, rhs: &Utf8String) -> Utf8String {
        self.data.extend_from_slice(&rhs.data);
        self
    }
}

impl AddAssign<&Utf8String> for Utf8String {
    fn add_assign(&mut self, rhs: &Utf8String) {
        self.push_string(rhs);
    }
}

impl AddAssign<Codepoint> for Utf8String {
    fn add_assign(&mut self, rhs: Codepoint) {
        self.push_codepoint(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Utf8String {
        text.parse().unwrap()
    }

    #[test]
    fn offset_walk_matches_char_indices() {
        let text = "тЕкст1 王明 Mötley Crüe";
        let string = s(text);
        for (index, (byte, ch)) in text.char_indices().enumerate() {
            assert_eq!(string.offset_of(index), Some(byte));
            assert_eq!(string.size_of(index), Some(ch.len_utf8()));
        }
        assert_eq!(string.offset_of(text.chars().count()), None);
        assert_eq!(string.size_of(text.chars().count()), None);
    }

    #[test]
    fn byte_translation_is_npos_like_at_the_end() {
        let string = s("abc");
        assert_eq!(string.byte_to_index(0), Some(0));
        assert_eq!(string.byte_to_index(3), None);
        assert_eq!(s("").byte_to_index(0), None);
    }

    #[test]
    fn clamped_offsets_saturate() {
        let string = s("Жa");
        assert_eq!(string.index_to_byte_clamped(0), 0);
        assert_eq!(string.index_to_byte_clamped(1), 2);
        assert_eq!(string.index_to_byte_clamped(2), 3);
        assert_eq!(string.index_to_byte_clamped(99), 3);
    }
}
