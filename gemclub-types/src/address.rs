//! GemClub Memo memory map
//!
//! The card stores 64 words of 4 bytes each. Every READ and WRITE names a
//! word by its offset, carried in the P2 byte of the command.
//!
//! ```text
//! 0x00        Manufacturer Area
//! 0x01..0x04  Issuer Area (serial number, mode bits in 0x04)
//! 0x05        Access Control Area / Protected Area 1
//! 0x06..0x07  CSC0 and its ratification counter
//! 0x08..0x0f  CTC1, Balance 1 (with backups)
//! 0x10..0x1f  User Area 1
//! 0x20..0x27  CTC2, Balance 2 (with backups)
//! 0x28..0x37  User Area 2
//! 0x38..0x3b  CSC1, CSC2 and their ratification counters
//! 0x3c..0x3f  Protected Area 2
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// Word offset into card memory
///
/// Always within `0x00..=0x3F`; construction of anything larger fails, so a
/// command can never be built for an offset the card does not have.
///
/// # Examples
///
/// ```
/// use gemclub_types::Address;
///
/// let mode_word = Address::ISSUER_BASE.offset(3).unwrap();
/// assert_eq!(mode_word.value(), 0x04);
///
/// assert!(Address::new(0x40).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u8);

impl Address {
    /// Manufacturer Area
    pub const MANUFACTURER: Self = Self(0x00);
    /// Base address of the Issuer Area (four words)
    pub const ISSUER_BASE: Self = Self(0x01);
    /// Access Control Area and Protected Area 1
    pub const ACA_PROT: Self = Self(0x05);
    /// Card Secret Code 0
    pub const CSC0: Self = Self(0x06);
    /// Card Secret Code 0 ratification counter
    pub const CSC0_RCNT: Self = Self(0x07);
    /// Card Transaction Counter 1
    pub const CTC1: Self = Self(0x08);
    /// Card Transaction Counter 1 backup
    pub const CTC1_B: Self = Self(0x09);
    /// Card Transaction Counter 1 flags
    pub const CTC1_F: Self = Self(0x0a);
    /// Balance 1 flags
    pub const BAL1_F: Self = Self(0x0b);
    /// Balance 1 high word. Must be written before [`Address::BAL1L`].
    pub const BAL1H: Self = Self(0x0c);
    /// Balance 1 high word backup
    pub const BAL1H_B: Self = Self(0x0d);
    /// Balance 1 low word. Must be written after [`Address::BAL1H`].
    pub const BAL1L: Self = Self(0x0e);
    /// Balance 1 low word backup
    pub const BAL1L_B: Self = Self(0x0f);
    /// Base address of User Area 1
    pub const USER1_BASE: Self = Self(0x10);
    /// Card Transaction Counter 2
    pub const CTC2: Self = Self(0x20);
    /// Card Transaction Counter 2 backup
    pub const CTC2_B: Self = Self(0x21);
    /// Card Transaction Counter 2 flags
    pub const CTC2_F: Self = Self(0x22);
    /// Balance 2 flags
    pub const BAL2_F: Self = Self(0x23);
    /// Balance 2 high word. Must be written before [`Address::BAL2L`].
    pub const BAL2H: Self = Self(0x24);
    /// Balance 2 high word backup
    pub const BAL2H_B: Self = Self(0x25);
    /// Balance 2 low word. Must be written after [`Address::BAL2H`].
    pub const BAL2L: Self = Self(0x26);
    /// Balance 2 low word backup
    pub const BAL2L_B: Self = Self(0x27);
    /// Base address of User Area 2
    pub const USER2_BASE: Self = Self(0x28);
    /// Card Secret Code 1
    pub const CSC1: Self = Self(0x38);
    /// Card Secret Code 1 ratification counter
    pub const CSC1_RCNT: Self = Self(0x39);
    /// Card Secret Code 2
    pub const CSC2: Self = Self(0x3a);
    /// Card Secret Code 2 ratification counter
    pub const CSC2_RCNT: Self = Self(0x3b);
    /// Base address of Protected Area 2
    pub const PROT_BASE: Self = Self(0x3c);
    /// Last word on the card
    pub const CARD_END: Self = Self(0x3f);

    /// Number of words on the card
    pub const WORD_COUNT: usize = 64;

    /// Create an address, rejecting offsets past [`Address::CARD_END`]
    pub fn new(offset: u8) -> Result<Self> {
        if offset > Self::CARD_END.0 {
            return Err(Error::AddressOutOfRange(offset as u16));
        }
        Ok(Self(offset))
    }

    /// Address `n` words after this one
    pub fn offset(self, n: u8) -> Result<Self> {
        let target = self.0 as u16 + n as u16;
        if target > Self::CARD_END.0 as u16 {
            return Err(Error::AddressOutOfRange(target));
        }
        Ok(Self(target as u8))
    }

    /// Raw offset, as sent in P2
    pub fn value(self) -> u8 {
        self.0
    }

    /// Iterate over every word on the card in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=Self::CARD_END.0).map(Self)
    }

    /// Symbolic name of a named word, `None` inside an area
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0x00 => "MANUFACTURER",
            0x01 => "ISSUER_BASE",
            0x05 => "ACA_PROT",
            0x06 => "CSC0",
            0x07 => "CSC0_RCNT",
            0x08 => "CTC1",
            0x09 => "CTC1_B",
            0x0a => "CTC1_F",
            0x0b => "BAL1_F",
            0x0c => "BAL1H",
            0x0d => "BAL1H_B",
            0x0e => "BAL1L",
            0x0f => "BAL1L_B",
            0x10 => "USER1_BASE",
            0x20 => "CTC2",
            0x21 => "CTC2_B",
            0x22 => "CTC2_F",
            0x23 => "BAL2_F",
            0x24 => "BAL2H",
            0x25 => "BAL2H_B",
            0x26 => "BAL2L",
            0x27 => "BAL2L_B",
            0x28 => "USER2_BASE",
            0x38 => "CSC1",
            0x39 => "CSC1_RCNT",
            0x3a => "CSC2",
            0x3b => "CSC2_RCNT",
            0x3c => "PROT_BASE",
            0x3f => "CARD_END",
            _ => return None,
        };
        Some(name)
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> u8 {
        addr.0
    }
}

impl TryFrom<u8> for Address {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}(0x{:02X})", name, self.0),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}
