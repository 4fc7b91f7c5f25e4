//! Transport errors

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,

    #[error("Already connected")]
    AlreadyConnected,

    /// No matching card showed up before the discovery timeout
    #[error("No GemClub Memo card found after {seconds}s")]
    DiscoveryTimeout {
        seconds: u64,
    },

    /// The named reader holds a card with a different ATR
    #[error("Card in reader {reader} does not match (ATR {atr})")]
    CardMismatch {
        reader: String,
        atr: String,
    },

    #[error("Invalid reader name: {0}")]
    InvalidReaderName(String),

    /// Reader answer could not be split into data and status word
    #[error("Protocol error: {0}")]
    Protocol(#[from] gemclub_core::Error),

    #[cfg(feature = "pcsc")]
    #[error("PC/SC error: {0}")]
    Pcsc(#[from] pcsc::Error),
}
