//! Secret code slots presented by VERIFY

use std::fmt;

use crate::error::{Error, Result};

/// Which comparison the card performs on a VERIFY command
///
/// The discriminant is the P2 byte sent with the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VerifyTarget {
    /// Present Card Secret Code 0
    Csc0 = 0x07,
    /// Present Card Secret Code 1
    Csc1 = 0x39,
    /// Present Card Secret Code 2
    Csc2 = 0x3b,
    /// In issuer mode, enter user mode emulation. The presented value is ignored.
    Emulation = 0x3a,
}

impl VerifyTarget {
    /// P2 byte for this target
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Csc0 => "CSC0",
            Self::Csc1 => "CSC1",
            Self::Csc2 => "CSC2",
            Self::Emulation => "EMUL",
        }
    }
}

impl From<VerifyTarget> for u8 {
    fn from(target: VerifyTarget) -> u8 {
        target as u8
    }
}

impl TryFrom<u8> for VerifyTarget {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x07 => Ok(Self::Csc0),
            0x39 => Ok(Self::Csc1),
            0x3b => Ok(Self::Csc2),
            0x3a => Ok(Self::Emulation),
            _ => Err(Error::InvalidVerifyTarget(value)),
        }
    }
}

impl fmt::Display for VerifyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}
