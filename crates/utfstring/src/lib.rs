//! Codepoint-indexed UTF-8 strings and lossless encoding conversion.
//!
//! Text is stored as UTF-8 bytes and addressed by *codepoint* index:
//! [`Utf8String`] offers insertion, removal, substring, search, split/join
//! and trim at codepoint granularity over a plain byte buffer. Underneath
//! sit two pure layers: the [`codec`] (stateless conversion between UTF-8,
//! UTF-16 with surrogate pairs, UTF-32 and a legacy single-byte codepage)
//! and the [`validator`] (structural well-formedness with first-fault
//! positions). Everything above is composed from the codec's lead-byte
//! classifier and per-scalar encode/decode pairs.
//!
//! Two boundaries stay outside the crate and plug in as traits: the legacy
//! [`Codepage`] table and the [`CaseFold`] service. Conversions fail
//! explicitly on malformed input, with no replacement characters and no
//! partial output.
//!
//! ```rust
//! use utfstring::{Codepoint, Utf8String};
//!
//! let mut s: Utf8String = "grüße".parse().unwrap();
//! assert_eq!(s.length(), 5);
//! assert!(s.size() > s.length());
//! s.replace_at(3, Codepoint::from('s'));
//! s.insert_at(4, Codepoint::from('s'));
//! assert_eq!(s, "grüsse");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod codec;
pub mod validator;

mod casefold;
mod codepage;
mod codepoint;
mod error;
mod source;
mod string;

#[cfg(test)]
mod tests;

pub use casefold::{CaseFold, SimpleCaseFold};
pub use codepage::{Codepage, Latin1};
pub use codepoint::{Codepoint, CodepointSet};
pub use error::ConvertError;
pub use source::TextSource;
pub use string::{INSERT_AT_END, Utf8String};
