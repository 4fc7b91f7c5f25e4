//! Errors raised while validating or decoding card data

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Word offset past the end of the card
    #[error("Address 0x{0:02X} out of range (last word is 0x3F)")]
    AddressOutOfRange(u16),

    /// P2 byte that names no secret code slot
    #[error("Invalid verify target: 0x{0:02X}")]
    InvalidVerifyTarget(u8),

    #[error("Invalid mode bits: {0}")]
    InvalidMode(u8),

    #[error("Invalid ratification counter encoding: nibble 0x{0:X}")]
    InvalidRatificationCounter(u8),

    #[error("Invalid word length: expected 4 bytes, got {0}")]
    InvalidWordLength(usize),
}

impl Error {
    /// Check if the value was rejected locally, before reaching the card
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            Self::AddressOutOfRange(_) | Self::InvalidVerifyTarget(_)
        )
    }

    /// Check if a card response could not be interpreted
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMode(_)
                | Self::InvalidRatificationCounter(_)
                | Self::InvalidWordLength(_)
        )
    }
}
