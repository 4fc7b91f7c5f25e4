//! High-level error types

use gemclub_core::StatusWord;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] gemclub_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] gemclub_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] gemclub_types::Error),

    #[error("Card not connected")]
    NotConnected,

    #[error("Card already connected")]
    AlreadyConnected,
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Address or verify target rejected before reaching the card
    Range,
    /// Secret code verification required (69 82)
    Permission,
    /// P2 rejected by the card (6B 00)
    Parameter,
    /// Unknown flag or mode, or counter at maximum (65 81)
    State,
    /// Length rejected by the card (67 00) or payload unusable
    Length,
    /// Instruction rejected by the card (6D 00)
    Instruction,
    /// Wrong or forbidden secret code (63 00)
    Verification,
    /// Card answer could not be interpreted
    Decode,
    /// Status word outside the documented table
    UnexpectedResponse,
    /// Operation not allowed in the current session state
    Session,
    /// Reader or link failure
    Transport,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(err) => core_kind(err),
            Self::Types(err) => types_kind(err),
            Self::Transport(gemclub_transport::Error::Protocol(err)) => core_kind(err),
            Self::Transport(_) => ErrorKind::Transport,
            Self::NotConnected | Self::AlreadyConnected => ErrorKind::Session,
        }
    }

    /// Raw status word for errors reported by the card
    pub fn status_word(&self) -> Option<StatusWord> {
        match self {
            Self::Core(err) => err.status_word(),
            _ => None,
        }
    }
}

fn core_kind(err: &gemclub_core::Error) -> ErrorKind {
    use gemclub_core::Error as Core;

    match err {
        Core::Types(err) => types_kind(err),
        Core::SecurityNotSatisfied => ErrorKind::Permission,
        Core::InvalidParameter => ErrorKind::Parameter,
        Core::MemoryState => ErrorKind::State,
        Core::WrongLength | Core::EmptyPayload | Core::PayloadTooLarge { .. } => ErrorKind::Length,
        Core::InvalidInstruction => ErrorKind::Instruction,
        Core::VerificationFailed => ErrorKind::Verification,
        Core::UnexpectedStatus { .. } => ErrorKind::UnexpectedResponse,
        Core::MalformedResponse { .. } | Core::UnknownInstruction(_) => ErrorKind::Decode,
        Core::InvalidSessionState(_) => ErrorKind::Session,
    }
}

fn types_kind(err: &gemclub_types::Error) -> ErrorKind {
    if err.is_range_error() {
        ErrorKind::Range
    } else {
        ErrorKind::Decode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemclub_types::{Address, VerifyTarget};

    #[test]
    fn test_card_status_kinds() {
        let table = [
            (StatusWord::SECURITY_NOT_SATISFIED, ErrorKind::Permission),
            (StatusWord::INVALID_PARAMETER, ErrorKind::Parameter),
            (StatusWord::MEMORY_STATE, ErrorKind::State),
            (StatusWord::WRONG_LENGTH, ErrorKind::Length),
            (StatusWord::INVALID_INSTRUCTION, ErrorKind::Instruction),
            (StatusWord::VERIFICATION_FAILED, ErrorKind::Verification),
            (StatusWord::new(0x6F, 0x00), ErrorKind::UnexpectedResponse),
        ];

        for (sw, kind) in table {
            let err = Error::from(sw.check(()).unwrap_err());
            assert_eq!(err.kind(), kind, "{}", sw);
            assert_eq!(err.status_word(), Some(sw));
        }
    }

    #[test]
    fn test_local_kinds() {
        let err: Error = Address::new(0x40).unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.status_word(), None);

        let err: Error = VerifyTarget::try_from(0x00).unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err: Error = gemclub_types::Error::InvalidRatificationCounter(0x1).into();
        assert_eq!(err.kind(), ErrorKind::Decode);

        let err: Error = gemclub_core::Error::from(gemclub_types::Error::InvalidMode(3)).into();
        assert_eq!(err.kind(), ErrorKind::Decode);

        assert_eq!(Error::NotConnected.kind(), ErrorKind::Session);
    }

    #[test]
    fn test_transport_kinds() {
        let err: Error = gemclub_transport::Error::NotConnected.into();
        assert_eq!(err.kind(), ErrorKind::Transport);

        let malformed = gemclub_core::Error::MalformedResponse { expected: 2, actual: 0 };
        let err: Error = gemclub_transport::Error::Protocol(malformed).into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_unexpected_status_message() {
        let err = Error::from(gemclub_core::Error::UnexpectedStatus { sw1: 0x6A, sw2: 0x82 });
        assert_eq!(
            err.to_string(),
            "Core protocol error: Unexpected status word: 6A 82"
        );
    }
}
