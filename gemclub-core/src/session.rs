//! Session state for a card connection
//!
//! A session tracks:
//! - Connection state
//! - Manufacturer Area captured when connecting

use gemclub_types::Word;

use crate::error::{Error, Result};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not connected
    Disconnected,

    /// Connected and identified
    Connected,
}

/// Session manager
///
/// Owned by exactly one card handle; nothing here is shared.
#[derive(Debug)]
pub struct Session {
    state: SessionState,

    /// Manufacturer Area read at connect time
    manufacturer_area: Option<Word>,
}

impl Session {
    /// Create a new disconnected session
    pub fn new() -> Self {
        Self {
            state: SessionState::Disconnected,
            manufacturer_area: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        matches!(self.state, SessionState::Connected)
    }

    /// Manufacturer Area cached at connect time
    pub fn manufacturer_area(&self) -> Option<Word> {
        self.manufacturer_area
    }

    /// Open the session once the card has been identified
    pub fn open(&mut self, manufacturer_area: Word) -> Result<()> {
        if self.state != SessionState::Disconnected {
            return Err(Error::InvalidSessionState(format!(
                "Cannot open from state: {:?}",
                self.state
            )));
        }

        self.manufacturer_area = Some(manufacturer_area);
        self.state = SessionState::Connected;

        Ok(())
    }

    /// Close session
    pub fn close(&mut self) -> Result<()> {
        if self.state != SessionState::Connected {
            return Err(Error::InvalidSessionState(format!(
                "Cannot close from state: {:?}",
                self.state
            )));
        }

        self.manufacturer_area = None;
        self.state = SessionState::Disconnected;

        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::defaults;

    #[test]
    fn test_session_new() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(!session.is_connected());
        assert_eq!(session.manufacturer_area(), None);
    }

    #[test]
    fn test_session_open() {
        let mut session = Session::new();
        session.open(defaults::MANUFACTURER_AREA).unwrap();

        assert_eq!(session.state(), SessionState::Connected);
        assert!(session.is_connected());
        assert_eq!(session.manufacturer_area(), Some(defaults::MANUFACTURER_AREA));
    }

    #[test]
    fn test_session_close() {
        let mut session = Session::new();
        session.open(defaults::MANUFACTURER_AREA).unwrap();
        session.close().unwrap();

        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.manufacturer_area(), None);
    }

    #[test]
    fn test_invalid_state_transitions() {
        let mut session = Session::new();

        // Cannot close without opening
        assert!(matches!(session.close(), Err(Error::InvalidSessionState(_))));

        // Cannot open twice
        session.open([0x01; 4]).unwrap();
        assert!(session.open([0x02; 4]).is_err());
        assert_eq!(session.manufacturer_area(), Some([0x01; 4]));
    }
}
