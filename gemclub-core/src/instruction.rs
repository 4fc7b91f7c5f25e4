//! GemClub Memo instruction set

use std::fmt;

use crate::error::{Error, Result};

/// Instruction byte (INS) of a command frame
///
/// The card understands exactly these three.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Instruction {
    /// Read one word
    Read = 0xBE,
    /// Write one word (or a field-sized payload)
    Write = 0xDE,
    /// Present a secret code
    Verify = 0x20,
}

impl Instruction {
    /// Check if the frame carries a data payload
    pub fn has_payload(self) -> bool {
        !matches!(self, Self::Read)
    }

    /// Get instruction name
    pub fn name(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Verify => "VERIFY",
        }
    }
}

impl From<Instruction> for u8 {
    fn from(ins: Instruction) -> u8 {
        ins as u8
    }
}

impl TryFrom<u8> for Instruction {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0xBE => Ok(Self::Read),
            0xDE => Ok(Self::Write),
            0x20 => Ok(Self::Verify),
            _ => Err(Error::UnknownInstruction(value)),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_conversion() {
        assert_eq!(u8::from(Instruction::Read), 0xBE);
        assert_eq!(u8::from(Instruction::Write), 0xDE);
        assert_eq!(u8::from(Instruction::Verify), 0x20);
        assert_eq!(Instruction::try_from(0xDE).unwrap(), Instruction::Write);
    }

    #[test]
    fn test_instruction_payload() {
        assert!(!Instruction::Read.has_payload());
        assert!(Instruction::Write.has_payload());
        assert!(Instruction::Verify.has_payload());
    }

    #[test]
    fn test_unknown_instruction() {
        let result = Instruction::try_from(0xB0);
        assert_eq!(result, Err(Error::UnknownInstruction(0xB0)));
    }
}
