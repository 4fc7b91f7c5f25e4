//! Command frame structure and encoding/decoding

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

use gemclub_types::{Address, VerifyTarget, WORD_SIZE};
use tracing::trace;

use crate::{
    constants::CLA,
    error::{Error, Result},
    instruction::Instruction,
};

/// GemClub Memo command frame
///
/// # Frame Structure
///
/// ```text
/// ┌──────┬──────┬──────┬──────┬──────┬─────────────┐
/// │ CLA  │ INS  │  P1  │  P2  │ Len  │   Payload   │
/// │ 0x80 │      │ 0x00 │      │      │  Len bytes  │
/// └──────┴──────┴──────┴──────┴──────┴─────────────┘
/// ```
///
/// P2 is the word offset for READ and WRITE, the verify target for VERIFY.
/// For READ, Len is the number of bytes expected back (always 4) and there
/// is no payload.
///
/// # Examples
///
/// ```
/// use gemclub_core::Apdu;
/// use gemclub_types::Address;
///
/// let frame = Apdu::read(Address::MANUFACTURER).encode();
/// assert_eq!(frame.as_ref(), &[0x80, 0xBE, 0x00, 0x00, 0x04]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Apdu {
    pub instruction: Instruction,

    /// Word offset or verify target
    pub parameter: u8,

    /// Length byte: expected response length for READ, payload length otherwise
    pub length: u8,

    pub payload: Bytes,
}

impl Apdu {
    /// Header size in bytes (CLA INS P1 P2 Len)
    pub const HEADER_SIZE: usize = 5;

    /// Largest payload the length byte can describe
    pub const MAX_PAYLOAD_SIZE: usize = u8::MAX as usize;

    /// READ one word at `addr`
    pub fn read(addr: Address) -> Self {
        Self {
            instruction: Instruction::Read,
            parameter: addr.value(),
            length: WORD_SIZE as u8,
            payload: Bytes::new(),
        }
    }

    /// WRITE `data` at `addr`
    ///
    /// The card checks that the length suits the target field; here only
    /// empty and oversized payloads are refused.
    pub fn write(addr: Address, data: impl Into<Bytes>) -> Result<Self> {
        Self::with_payload(Instruction::Write, addr.value(), data.into())
    }

    /// VERIFY `code` against the slot named by `target`
    pub fn verify(target: VerifyTarget, code: impl Into<Bytes>) -> Result<Self> {
        Self::with_payload(Instruction::Verify, target.value(), code.into())
    }

    fn with_payload(instruction: Instruction, parameter: u8, payload: Bytes) -> Result<Self> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        if payload.len() > Self::MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: Self::MAX_PAYLOAD_SIZE,
            });
        }

        Ok(Self {
            instruction,
            parameter,
            length: payload.len() as u8,
            payload,
        })
    }

    /// Encode frame to bytes
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.size());

        buf.put_u8(CLA);
        buf.put_u8(self.instruction.into());
        buf.put_u8(0x00);
        buf.put_u8(self.parameter);
        buf.put_u8(self.length);
        buf.put_slice(&self.payload);

        trace!(frame = %hex::encode_upper(&buf), "Encoded {}", self.instruction);

        buf
    }

    /// Decode a frame from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Buffer is shorter than the header
    /// - Instruction byte is unknown
    /// - Payload length disagrees with the length byte
    pub fn decode(mut buf: impl Buf) -> Result<Self> {
        if buf.remaining() < Self::HEADER_SIZE {
            return Err(Error::MalformedResponse {
                expected: Self::HEADER_SIZE,
                actual: buf.remaining(),
            });
        }

        let _cla = buf.get_u8();
        let instruction = Instruction::try_from(buf.get_u8())?;
        let _p1 = buf.get_u8();
        let parameter = buf.get_u8();
        let length = buf.get_u8();

        let expected = if instruction.has_payload() { length as usize } else { 0 };
        if buf.remaining() != expected {
            return Err(Error::MalformedResponse {
                expected: Self::HEADER_SIZE + expected,
                actual: Self::HEADER_SIZE + buf.remaining(),
            });
        }

        let payload = buf.copy_to_bytes(expected);

        Ok(Self {
            instruction,
            parameter,
            length,
            payload,
        })
    }

    /// Get total frame size
    pub fn size(&self) -> usize {
        Self::HEADER_SIZE + self.payload.len()
    }
}

impl fmt::Debug for Apdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Apdu")
            .field("instruction", &self.instruction)
            .field("parameter", &format!("0x{:02X}", self.parameter))
            .field("length", &self.length)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

impl fmt::Display for Apdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(p2=0x{:02X}, len={})",
            self.instruction.name(),
            self.parameter,
            self.length
        )
    }
}
