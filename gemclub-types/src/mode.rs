//! Card operating mode

use std::fmt;

use crate::{
    error::{Error, Result},
    Word,
};

/// Operating mode of the card
///
/// Stored in the top two bits of the last byte of the fourth Issuer Area
/// word. Never cached, always decoded from a fresh read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Card can be personalized with CSC0
    Issuer = 1,
    /// Many fields are read-only and/or automatically managed
    User = 2,
}

impl Mode {
    /// Decode the mode from the fourth Issuer Area word
    ///
    /// # Examples
    ///
    /// ```
    /// use gemclub_types::Mode;
    ///
    /// assert_eq!(Mode::decode(&[0x00, 0x00, 0x00, 0x40]).unwrap(), Mode::Issuer);
    /// assert_eq!(Mode::decode(&[0x00, 0x00, 0x00, 0x80]).unwrap(), Mode::User);
    /// assert!(Mode::decode(&[0x00, 0x00, 0x00, 0xc0]).is_err());
    /// ```
    pub fn decode(word: &Word) -> Result<Self> {
        Self::try_from(word[3] >> 6)
    }
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self> {
        match bits {
            1 => Ok(Self::Issuer),
            2 => Ok(Self::User),
            _ => Err(Error::InvalidMode(bits)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issuer => f.write_str("ISSUER"),
            Self::User => f.write_str("USER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_bits() {
        assert_eq!(Mode::try_from(1).unwrap(), Mode::Issuer);
        assert_eq!(Mode::try_from(2).unwrap(), Mode::User);
        assert_eq!(Mode::try_from(0), Err(Error::InvalidMode(0)));
        assert_eq!(Mode::try_from(3), Err(Error::InvalidMode(3)));
    }

    #[test]
    fn test_mode_ignores_low_bits() {
        assert_eq!(Mode::decode(&[0xff, 0xff, 0xff, 0x7f]).unwrap(), Mode::Issuer);
        assert_eq!(Mode::decode(&[0x00, 0x00, 0x00, 0xbf]).unwrap(), Mode::User);

        let err = Mode::decode(&[0x00, 0x00, 0x00, 0x3f]).unwrap_err();
        assert!(err.is_decode_error());
    }
}
