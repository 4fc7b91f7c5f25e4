//! PC/SC reader transport
//!
//! Finds a GemClub Memo card by ATR in any reader attached to the system,
//! waiting for one to be inserted (or for a reader to be plugged in) until
//! the discovery timeout expires.

use std::ffi::{CStr, CString};
use std::time::{Duration, Instant};

use gemclub_core::{constants::DEFAULT_DISCOVERY_TIMEOUT, Response};
use pcsc::{
    Attribute, Card, Context, Disposition, Protocols, ReaderState, Scope, ShareMode, State,
    MAX_BUFFER_SIZE, PNP_NOTIFICATION,
};
use tracing::{debug, trace, warn};

use crate::{
    atr::{AtrPattern, GEMCLUB_MEMO_ATR},
    error::*,
    Transport,
};

/// PC/SC transport for GemClub Memo cards
pub struct PcscTransport {
    context: Option<Context>,
    card: Option<Card>,
    /// Reader to use instead of discovery
    reader: Option<String>,
    /// Reader the card was found in
    connected_reader: Option<String>,
    atr_pattern: AtrPattern,
    timeout: Duration,
}

impl PcscTransport {
    /// Create a transport that discovers the card in any reader
    pub fn new() -> Self {
        Self {
            context: None,
            card: None,
            reader: None,
            connected_reader: None,
            atr_pattern: GEMCLUB_MEMO_ATR,
            timeout: Duration::from_secs(DEFAULT_DISCOVERY_TIMEOUT),
        }
    }

    /// Set discovery timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use the named reader instead of discovering one
    pub fn with_reader(mut self, reader: impl Into<String>) -> Self {
        self.reader = Some(reader.into());
        self
    }

    /// Accept cards matching another ATR pattern
    pub fn with_atr_pattern(mut self, pattern: AtrPattern) -> Self {
        self.atr_pattern = pattern;
        self
    }

    /// List readers known to the PC/SC service
    pub fn list_readers() -> Result<Vec<String>> {
        let context = Context::establish(Scope::User)?;

        Ok(reader_names(&context)?
            .iter()
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }
}

impl Default for PcscTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for PcscTransport {
    fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        let context = match self.context.take() {
            Some(context) => context,
            None => Context::establish(Scope::User)?,
        };
        let context = self.context.insert(context);

        let reader = match &self.reader {
            Some(name) => CString::new(name.as_str())
                .map_err(|_| Error::InvalidReaderName(name.clone()))?,
            None => discover(context, &self.atr_pattern, self.timeout)?,
        };
        let reader_name = reader.to_string_lossy().into_owned();

        debug!("Connecting to card in {}...", reader_name);

        let card = context.connect(&reader, ShareMode::Shared, Protocols::ANY)?;

        if self.reader.is_some() {
            let atr = card.get_attribute_owned(Attribute::AtrString)?;
            if !self.atr_pattern.matches(&atr) {
                if let Err((_, err)) = card.disconnect(Disposition::LeaveCard) {
                    warn!("Failed to release mismatched card: {}", err);
                }
                return Err(Error::CardMismatch {
                    reader: reader_name,
                    atr: hex::encode_upper(atr),
                });
            }
        }

        debug!("Connected to card in {}", reader_name);

        self.card = Some(card);
        self.connected_reader = Some(reader_name);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        if let Some(card) = self.card.take() {
            debug!("Disconnecting from {}...", self.reader_name());

            card.disconnect(Disposition::LeaveCard)
                .map_err(|(_, err)| Error::Pcsc(err))?;
        }

        self.connected_reader = None;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.card.is_some()
    }

    fn transmit(&mut self, frame: &[u8]) -> Result<Response> {
        let card = self.card.as_ref().ok_or(Error::NotConnected)?;

        trace!("Sending {} bytes: {}", frame.len(), hex::encode_upper(frame));

        let mut buf = [0; MAX_BUFFER_SIZE];
        let raw = card.transmit(frame, &mut buf)?;

        trace!("Received {} bytes: {}", raw.len(), hex::encode_upper(raw));

        Ok(Response::from_raw(raw)?)
    }

    fn reader_name(&self) -> String {
        self.connected_reader
            .clone()
            .or_else(|| self.reader.clone())
            .unwrap_or_else(|| "<any reader>".to_string())
    }
}

impl Drop for PcscTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("PC/SC transport dropped while still connected");
        }
    }
}

fn reader_names(context: &Context) -> Result<Vec<CString>> {
    match context.list_readers_owned() {
        Ok(readers) => Ok(readers),
        Err(pcsc::Error::NoReadersAvailable) => Ok(Vec::new()),
        Err(err) => Err(err.into()),
    }
}

fn is_pnp(state: &ReaderState) -> bool {
    state.name() == PNP_NOTIFICATION()
}

fn is_gone(state: &ReaderState) -> bool {
    state.event_state().intersects(State::UNKNOWN | State::IGNORE)
}

/// Wait for a reader holding a card that matches `pattern`
fn discover(context: &Context, pattern: &AtrPattern, timeout: Duration) -> Result<CString> {
    let deadline = Instant::now() + timeout;
    let mut states = vec![ReaderState::new(PNP_NOTIFICATION(), State::UNAWARE)];

    loop {
        states.retain(|state| is_pnp(state) || !is_gone(state));

        for name in reader_names(context)? {
            if !states.iter().any(|state| state.name() == name.as_c_str()) {
                debug!("Watching reader {}", name.to_string_lossy());
                states.push(ReaderState::new(name, State::UNAWARE));
            }
        }

        for state in &mut states {
            state.sync_current_state();
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        match context.get_status_change(remaining, &mut states) {
            Ok(()) => {}
            Err(pcsc::Error::Timeout) => {
                return Err(Error::DiscoveryTimeout {
                    seconds: timeout.as_secs(),
                })
            }
            Err(err) => return Err(err.into()),
        }

        if let Some(found) = states.iter().find(|state| {
            !is_pnp(state)
                && state.event_state().contains(State::PRESENT)
                && pattern.matches(state.atr())
        }) {
            let name: &CStr = found.name();
            debug!(atr = %hex::encode_upper(found.atr()), "Found card in {}", name.to_string_lossy());
            return Ok(name.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcsc_transport_create() {
        let transport = PcscTransport::new();
        assert!(!transport.is_connected());
        assert_eq!(transport.reader_name(), "<any reader>");
    }

    #[test]
    fn test_pcsc_transport_builder() {
        let transport = PcscTransport::new()
            .with_reader("ACS ACR38U 00 00")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(transport.reader_name(), "ACS ACR38U 00 00");
        assert_eq!(transport.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_transmit_requires_connection() {
        let mut transport = PcscTransport::new();
        let result = transport.transmit(&[0x80, 0xBE, 0x00, 0x00, 0x04]);
        assert!(matches!(result, Err(Error::NotConnected)));
    }
}
