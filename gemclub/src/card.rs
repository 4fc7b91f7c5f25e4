//! High-level card interface

use bytes::{Buf, Bytes};
use tracing::{debug, info, trace, warn};

use gemclub_core::{Apdu, Session};
use gemclub_transport::Transport;
use gemclub_types::{
    word_from_slice, word_hex, AccessConditions, Address, Mode, RatificationCounter,
    VerifyTarget, Word, WORD_SIZE,
};

use crate::error::{Error, Result};

/// Issuer Area size in bytes (four words)
pub const ISSUER_SERIAL_SIZE: usize = 4 * WORD_SIZE;

/// GemClub Memo card
///
/// High-level interface over one transport connection. Every operation is a
/// single blocking round trip (the issuer serial number takes four) with no
/// retries; errors are returned as they come.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "pcsc")]
/// # fn main() -> gemclub::Result<()> {
/// use gemclub::{Address, Card, VerifyTarget};
/// use gemclub::defaults;
///
/// let mut card = Card::discover(std::time::Duration::from_secs(10));
/// card.connect()?;
///
/// card.verify(VerifyTarget::Csc1, &defaults::CSC1)?;
/// let balance = card.read_word_u32(Address::BAL1L)?;
/// println!("Balance 1 low word: {}", balance);
///
/// card.disconnect()?;
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "pcsc"))]
/// # fn main() {}
/// ```
pub struct Card {
    transport: Box<dyn Transport>,
    session: Session,
}

impl Card {
    /// Create a card handle over any transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            session: Session::new(),
        }
    }

    /// Create a card handle that waits up to `timeout` for a card in any reader
    #[cfg(feature = "pcsc")]
    pub fn discover(timeout: std::time::Duration) -> Self {
        Self::new(gemclub_transport::PcscTransport::new().with_timeout(timeout))
    }

    /// Create a card handle bound to the named reader
    #[cfg(feature = "pcsc")]
    pub fn with_reader(reader: impl Into<String>) -> Self {
        Self::new(gemclub_transport::PcscTransport::new().with_reader(reader))
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Manufacturer Area read when connecting
    pub fn manufacturer_area(&self) -> Option<Word> {
        self.session.manufacturer_area()
    }

    /// Connect to the card and read its Manufacturer Area
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Already connected
    /// - Transport connection fails
    /// - Manufacturer Area cannot be read (the transport is released again)
    pub fn connect(&mut self) -> Result<()> {
        if self.session.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        info!("Connecting to card in {}...", self.transport.reader_name());

        self.transport.connect()?;

        let manufacturer_area = match self.fetch_word(Address::MANUFACTURER) {
            Ok(word) => word,
            Err(err) => {
                if let Err(e) = self.transport.disconnect() {
                    warn!("Failed to release transport after failed identification: {}", e);
                }
                return Err(err);
            }
        };

        self.session.open(manufacturer_area)?;

        info!(
            "Connected successfully (manufacturer_area={})",
            word_hex(&manufacturer_area)
        );

        Ok(())
    }

    /// Disconnect from the card
    ///
    /// The session is closed even if releasing the transport fails.
    pub fn disconnect(&mut self) -> Result<()> {
        if !self.session.is_connected() {
            return Err(Error::NotConnected);
        }

        info!("Disconnecting from {}...", self.transport.reader_name());

        let released = self.transport.disconnect();
        self.session.close()?;
        released?;

        info!("Disconnected");
        Ok(())
    }

    /// Read a word
    pub fn read_word(&mut self, addr: Address) -> Result<Word> {
        self.ensure_connected()?;

        let word = self.fetch_word(addr)?;
        debug!("Read {} = {}", addr, word_hex(&word));

        Ok(word)
    }

    /// Read a word as a big-endian integer
    pub fn read_word_u32(&mut self, addr: Address) -> Result<u32> {
        let word = self.read_word(addr)?;
        Ok(word.as_slice().get_u32())
    }

    /// Write a word
    ///
    /// Balance high words must be written before the matching low word;
    /// ordering across calls is up to the caller.
    pub fn write_word(&mut self, addr: Address, word: Word) -> Result<()> {
        self.write_bytes(addr, &word)
    }

    /// Write an integer as a big-endian word
    pub fn write_word_u32(&mut self, addr: Address, value: u32) -> Result<()> {
        self.write_word(addr, value.to_be_bytes())
    }

    /// Write a raw payload
    ///
    /// For fields whose length differs from a word. The card rejects lengths
    /// that do not suit the field.
    pub fn write_bytes(&mut self, addr: Address, data: &[u8]) -> Result<()> {
        self.ensure_connected()?;

        debug!("Writing {} bytes to {}", data.len(), addr);

        let apdu = Apdu::write(addr, Bytes::copy_from_slice(data))?;
        self.exchange(&apdu)?;

        Ok(())
    }

    /// Present a secret code to unlock protected areas
    pub fn verify(&mut self, target: VerifyTarget, code: &[u8]) -> Result<()> {
        self.ensure_connected()?;

        debug!("Presenting {}", target);

        let apdu = Apdu::verify(target, Bytes::copy_from_slice(code))?;
        self.exchange(&apdu)?;

        debug!("{} accepted", target.name());
        Ok(())
    }

    /// Present a secret code given as a big-endian integer
    pub fn verify_code(&mut self, target: VerifyTarget, code: u32) -> Result<()> {
        self.verify(target, &code.to_be_bytes())
    }

    /// Get the Issuer Area (usually the card serial number)
    pub fn issuer_serial_number(&mut self) -> Result<[u8; ISSUER_SERIAL_SIZE]> {
        self.ensure_connected()?;

        let mut serial = [0u8; ISSUER_SERIAL_SIZE];
        for (i, chunk) in serial.chunks_exact_mut(WORD_SIZE).enumerate() {
            let word = self.fetch_word(Address::ISSUER_BASE.offset(i as u8)?)?;
            chunk.copy_from_slice(&word);
        }

        debug!("Issuer serial number: {}", hex::encode_upper(serial));
        Ok(serial)
    }

    /// Get the card operating mode
    pub fn mode(&mut self) -> Result<Mode> {
        let word = self.read_word(Address::ISSUER_BASE.offset(3)?)?;
        let mode = Mode::decode(&word)?;

        debug!("Mode: {}", mode);
        Ok(mode)
    }

    /// Get the card access conditions
    pub fn access_conditions(&mut self) -> Result<AccessConditions> {
        let word = self.read_word(Address::ACA_PROT)?;
        let conditions = AccessConditions::decode(&word);

        debug!("Access conditions: {:?}", conditions);
        Ok(conditions)
    }

    /// Get the ratification counter stored at `addr`
    ///
    /// `addr` is normally one of [`Address::CSC0_RCNT`],
    /// [`Address::CSC1_RCNT`] or [`Address::CSC2_RCNT`].
    pub fn ratification_counter(&mut self, addr: Address) -> Result<RatificationCounter> {
        let word = self.read_word(addr)?;
        let counter = RatificationCounter::decode(&word)?;

        debug!("Ratification counter {}: {}", addr, counter);
        Ok(counter)
    }

    // Helper methods

    fn ensure_connected(&self) -> Result<()> {
        if !self.session.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(())
    }

    fn fetch_word(&mut self, addr: Address) -> Result<Word> {
        let data = self.exchange(&Apdu::read(addr))?;
        Ok(word_from_slice(&data)?)
    }

    fn exchange(&mut self, apdu: &Apdu) -> Result<Bytes> {
        trace!("Sending: {:?}", apdu);

        let response = self.transport.transmit(&apdu.encode())?;

        trace!("Received: {:?}", response);

        Ok(response.into_result()?)
    }
}
