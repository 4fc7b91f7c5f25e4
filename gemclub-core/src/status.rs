//! Status word decoding
//!
//! Every card answer ends in two status bytes (SW1 SW2). This module is the
//! only place they are interpreted:
//!
//! ```text
//! 90 00  success
//! 69 82  security condition not satisfied
//! 6B 00  invalid P2
//! 65 81  unknown flag/mode, or CTC at maximum
//! 67 00  invalid length of expected data
//! 6D 00  invalid instruction
//! 63 00  invalid or forbidden secret code
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// Status word returned after every command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    pub sw1: u8,
    pub sw2: u8,
}

impl StatusWord {
    pub const SUCCESS: Self = Self::new(0x90, 0x00);
    pub const SECURITY_NOT_SATISFIED: Self = Self::new(0x69, 0x82);
    pub const INVALID_PARAMETER: Self = Self::new(0x6B, 0x00);
    pub const MEMORY_STATE: Self = Self::new(0x65, 0x81);
    pub const WRONG_LENGTH: Self = Self::new(0x67, 0x00);
    pub const INVALID_INSTRUCTION: Self = Self::new(0x6D, 0x00);
    pub const VERIFICATION_FAILED: Self = Self::new(0x63, 0x00);

    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Status word as a 16-bit value (SW1 high)
    pub fn value(self) -> u16 {
        u16::from_be_bytes([self.sw1, self.sw2])
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Map the status word to success or the matching error
    ///
    /// Total over all status words: anything not in the table becomes
    /// [`Error::UnexpectedStatus`] carrying the raw bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemclub_core::{Error, StatusWord};
    ///
    /// assert_eq!(StatusWord::new(0x90, 0x00).check([1, 2, 3, 4]).unwrap(), [1, 2, 3, 4]);
    /// assert_eq!(StatusWord::new(0x69, 0x82).check(()), Err(Error::SecurityNotSatisfied));
    /// ```
    pub fn check<T>(self, data: T) -> Result<T> {
        match (self.sw1, self.sw2) {
            (0x90, 0x00) => Ok(data),
            (0x69, 0x82) => Err(Error::SecurityNotSatisfied),
            (0x6B, 0x00) => Err(Error::InvalidParameter),
            (0x65, 0x81) => Err(Error::MemoryState),
            (0x67, 0x00) => Err(Error::WrongLength),
            (0x6D, 0x00) => Err(Error::InvalidInstruction),
            (0x63, 0x00) => Err(Error::VerificationFailed),
            (sw1, sw2) => Err(Error::UnexpectedStatus { sw1, sw2 }),
        }
    }
}

impl From<u16> for StatusWord {
    fn from(value: u16) -> Self {
        let [sw1, sw2] = value.to_be_bytes();
        Self::new(sw1, sw2)
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X}", self.sw1, self.sw2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const KNOWN: [StatusWord; 7] = [
        StatusWord::SUCCESS,
        StatusWord::SECURITY_NOT_SATISFIED,
        StatusWord::INVALID_PARAMETER,
        StatusWord::MEMORY_STATE,
        StatusWord::WRONG_LENGTH,
        StatusWord::INVALID_INSTRUCTION,
        StatusWord::VERIFICATION_FAILED,
    ];

    #[test]
    fn test_success_passes_data_through() {
        let data = vec![0xAA, 0xFF, 0xFF, 0xFF];
        assert_eq!(StatusWord::SUCCESS.check(data.clone()).unwrap(), data);
    }

    #[test]
    fn test_status_table() {
        assert_eq!(StatusWord::new(0x69, 0x82).check(()), Err(Error::SecurityNotSatisfied));
        assert_eq!(StatusWord::new(0x6B, 0x00).check(()), Err(Error::InvalidParameter));
        assert_eq!(StatusWord::new(0x65, 0x81).check(()), Err(Error::MemoryState));
        assert_eq!(StatusWord::new(0x67, 0x00).check(()), Err(Error::WrongLength));
        assert_eq!(StatusWord::new(0x6D, 0x00).check(()), Err(Error::InvalidInstruction));
        assert_eq!(StatusWord::new(0x63, 0x00).check(()), Err(Error::VerificationFailed));
    }

    #[test]
    fn test_unexpected_status() {
        assert_eq!(
            StatusWord::new(0x6A, 0x82).check(()),
            Err(Error::UnexpectedStatus { sw1: 0x6A, sw2: 0x82 })
        );
        // Near misses of known words are not folded into them
        assert_eq!(
            StatusWord::new(0x90, 0x01).check(()),
            Err(Error::UnexpectedStatus { sw1: 0x90, sw2: 0x01 })
        );
        assert_eq!(
            StatusWord::new(0x63, 0xC2).check(()),
            Err(Error::UnexpectedStatus { sw1: 0x63, sw2: 0xC2 })
        );
    }

    #[test]
    fn test_error_status_word_round_trip() {
        for sw in KNOWN.iter().skip(1) {
            let err = sw.check(()).unwrap_err();
            assert_eq!(err.status_word(), Some(*sw));
            assert!(err.is_card_error());
        }
    }

    #[test]
    fn test_display_and_value() {
        assert_eq!(StatusWord::SECURITY_NOT_SATISFIED.to_string(), "69 82");
        assert_eq!(StatusWord::SUCCESS.value(), 0x9000);
        assert_eq!(StatusWord::from(0x6B00), StatusWord::INVALID_PARAMETER);
    }

    proptest! {
        #[test]
        fn prop_check_is_total(sw1 in any::<u8>(), sw2 in any::<u8>()) {
            let sw = StatusWord::new(sw1, sw2);
            match sw.check(()) {
                Ok(()) => prop_assert!(sw.is_success()),
                Err(Error::UnexpectedStatus { sw1: s1, sw2: s2 }) => {
                    prop_assert!(!KNOWN.contains(&sw));
                    prop_assert_eq!((s1, s2), (sw1, sw2));
                }
                Err(err) => {
                    prop_assert!(KNOWN.contains(&sw));
                    prop_assert_eq!(err.status_word(), Some(sw));
                }
            }
        }
    }
}
