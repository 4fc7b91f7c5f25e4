//! # gemclub-core
//!
//! Core protocol implementation for GemClub Memo memory cards.
//!
//! This crate provides the low-level protocol primitives:
//! - Command frame encoding/decoding
//! - Instruction definitions
//! - Status word interpretation
//! - Session state
//! - Protocol constants and factory defaults

pub mod apdu;
pub mod constants;
pub mod error;
pub mod instruction;
pub mod response;
pub mod session;
pub mod status;

pub use apdu::Apdu;
pub use constants::defaults;
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use response::Response;
pub use session::{Session, SessionState};
pub use status::StatusWord;
