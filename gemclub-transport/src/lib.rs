//! Transport layer for GemClub Memo cards
//!
//! The card layer only needs to send a command frame and get back the
//! response data and status word. With the `pcsc` feature enabled,
//! `PcscTransport` does this through the system's PC/SC service.

pub mod atr;
pub mod error;
#[cfg(feature = "pcsc")]
pub mod reader;

pub use atr::{AtrPattern, GEMCLUB_MEMO_ATR};
pub use error::{Error, Result};
#[cfg(feature = "pcsc")]
pub use reader::PcscTransport;

use gemclub_core::Response;

/// Transport trait for different reader back-ends
pub trait Transport: Send {
    /// Connect to the card
    fn connect(&mut self) -> Result<()>;

    /// Disconnect from the card
    fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send one command frame and wait for the answer
    fn transmit(&mut self, frame: &[u8]) -> Result<Response>;

    /// Name of the reader in use
    fn reader_name(&self) -> String;
}
