//! Ratification counter decoding
//!
//! A ratification counter records failed presentations of a secret code.
//! The card sets one bit of the top nibble, most significant first, per
//! failure; a full nibble blocks the code:
//!
//! ```text
//! 0000 -> 0 failures
//! 1000 -> 1
//! 1100 -> 2
//! 1110 -> 3
//! 1111 -> blocked
//! ```

use std::fmt;

use crate::{
    error::{Error, Result},
    Word,
};

/// Decoded ratification counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatificationCounter {
    /// Failed presentations so far (0 to 3)
    Failed(u8),
    /// Code blocked, further presentations are refused
    Blocked,
}

impl RatificationCounter {
    /// Failures allowed before the code is blocked
    pub const MAX_ATTEMPTS: u8 = 4;

    /// Decode a counter word
    ///
    /// Any nibble outside the table means corruption, not a card state, and
    /// is reported as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemclub_types::RatificationCounter;
    ///
    /// let rc = RatificationCounter::decode(&[0x00, 0x00, 0x00, 0xc0]).unwrap();
    /// assert_eq!(rc, RatificationCounter::Failed(2));
    /// assert_eq!(rc.remaining_attempts(), 2);
    /// ```
    pub fn decode(word: &Word) -> Result<Self> {
        match word[3] >> 4 {
            0x0 => Ok(Self::Failed(0)),
            0x8 => Ok(Self::Failed(1)),
            0xc => Ok(Self::Failed(2)),
            0xe => Ok(Self::Failed(3)),
            0xf => Ok(Self::Blocked),
            nibble => Err(Error::InvalidRatificationCounter(nibble)),
        }
    }

    pub fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Failed presentations, `None` once blocked
    pub fn failed_attempts(self) -> Option<u8> {
        match self {
            Self::Failed(n) => Some(n),
            Self::Blocked => None,
        }
    }

    /// Presentations left before the code is blocked
    pub fn remaining_attempts(self) -> u8 {
        match self {
            Self::Failed(n) => Self::MAX_ATTEMPTS.saturating_sub(n),
            Self::Blocked => 0,
        }
    }
}

impl fmt::Display for RatificationCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(n) => write!(f, "{} failed", n),
            Self::Blocked => f.write_str("blocked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counter(nibble: u8) -> Result<RatificationCounter> {
        RatificationCounter::decode(&[0x00, 0x00, 0x00, nibble << 4])
    }

    #[test]
    fn test_valid_nibbles() {
        assert_eq!(counter(0x0).unwrap(), RatificationCounter::Failed(0));
        assert_eq!(counter(0x8).unwrap(), RatificationCounter::Failed(1));
        assert_eq!(counter(0xc).unwrap(), RatificationCounter::Failed(2));
        assert_eq!(counter(0xe).unwrap(), RatificationCounter::Failed(3));
        assert_eq!(counter(0xf).unwrap(), RatificationCounter::Blocked);
    }

    #[test]
    fn test_invalid_nibbles() {
        for nibble in [0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x9, 0xa, 0xb, 0xd] {
            let err = counter(nibble).unwrap_err();
            assert_eq!(err, Error::InvalidRatificationCounter(nibble));
            assert!(err.is_decode_error());
        }
    }

    #[test]
    fn test_low_nibble_and_leading_bytes_ignored() {
        let rc = RatificationCounter::decode(&[0x12, 0x34, 0x56, 0xef]).unwrap();
        assert_eq!(rc, RatificationCounter::Failed(3));
    }

    #[test]
    fn test_attempt_helpers() {
        assert_eq!(RatificationCounter::Failed(0).remaining_attempts(), 4);
        assert_eq!(RatificationCounter::Failed(3).remaining_attempts(), 1);
        assert_eq!(RatificationCounter::Blocked.remaining_attempts(), 0);
        assert_eq!(RatificationCounter::Failed(1).failed_attempts(), Some(1));
        assert_eq!(RatificationCounter::Blocked.failed_attempts(), None);
        assert!(RatificationCounter::Blocked.is_blocked());
    }
}
