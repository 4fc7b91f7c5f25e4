//! # gemclub
//!
//! Driver for GemClub Memo stored-value memory cards.
//!
//! ## Features
//!
//! - Typed memory map, instruction frames and status words
//! - Decoding of mode, access conditions and ratification counters
//! - Distinct error kinds for every documented card status
//! - PC/SC reader support with ATR-based card discovery (`pcsc` feature)
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "pcsc")]
//! # fn main() -> gemclub::Result<()> {
//! use gemclub::{Address, Card};
//!
//! // Wait up to 10 seconds for a card
//! let mut card = Card::discover(std::time::Duration::from_secs(10));
//! card.connect()?;
//!
//! println!("Mode: {}", card.mode()?);
//! println!("Serial: {}", hex::encode(card.issuer_serial_number()?));
//!
//! card.disconnect()?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "pcsc"))]
//! # fn main() {}
//! ```

pub mod card;
pub mod error;

// Re-exports
pub use card::{Card, ISSUER_SERIAL_SIZE};
pub use error::{Error, ErrorKind, Result};

// Re-export types
pub use gemclub_core::{defaults, Apdu, Instruction, Response, StatusWord};
pub use gemclub_transport::{AtrPattern, Transport, GEMCLUB_MEMO_ATR};
#[cfg(feature = "pcsc")]
pub use gemclub_transport::PcscTransport;
pub use gemclub_types::{AccessConditions, Address, Mode, RatificationCounter, VerifyTarget, Word};
