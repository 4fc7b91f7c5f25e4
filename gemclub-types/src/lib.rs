//! Type definitions for gemclub
//!
//! Memory map, secret code targets and the decoders for the values the card
//! packs into single words (mode, access conditions, ratification counters).

pub mod access;
pub mod address;
pub mod error;
pub mod mode;
pub mod ratification;
pub mod target;

pub use access::AccessConditions;
pub use address::Address;
pub use error::{Error, Result};
pub use mode::Mode;
pub use ratification::RatificationCounter;
pub use target::VerifyTarget;

/// Size of a card word in bytes
pub const WORD_SIZE: usize = 4;

/// The card's atomic read/write unit
pub type Word = [u8; WORD_SIZE];

/// Convert a byte slice into a [`Word`]
///
/// # Examples
///
/// ```
/// let word = gemclub_types::word_from_slice(&[0xaa, 0xff, 0xff, 0xff]).unwrap();
/// assert_eq!(word, [0xaa, 0xff, 0xff, 0xff]);
///
/// assert!(gemclub_types::word_from_slice(&[0x00; 3]).is_err());
/// ```
pub fn word_from_slice(bytes: &[u8]) -> Result<Word> {
    Word::try_from(bytes).map_err(|_| Error::InvalidWordLength(bytes.len()))
}

/// Format a word as hex for logs and diagnostics
pub fn word_hex(word: &Word) -> String {
    hex::encode_upper(word)
}
