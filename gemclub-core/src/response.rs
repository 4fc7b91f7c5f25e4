//! Card responses

use bytes::Bytes;
use std::fmt;

use crate::{
    error::{Error, Result},
    status::StatusWord,
};

/// Response data plus the trailing status word
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    /// Response data (without status word)
    pub data: Bytes,
    pub status: StatusWord,
}

impl Response {
    pub fn new(data: impl Into<Bytes>, sw1: u8, sw2: u8) -> Self {
        Self {
            data: data.into(),
            status: StatusWord::new(sw1, sw2),
        }
    }

    /// Split a raw reader answer into data and status word
    ///
    /// # Examples
    ///
    /// ```
    /// use gemclub_core::{Response, StatusWord};
    ///
    /// let response = Response::from_raw(&[0xAA, 0xFF, 0xFF, 0xFF, 0x90, 0x00]).unwrap();
    /// assert_eq!(response.data.as_ref(), &[0xAA, 0xFF, 0xFF, 0xFF]);
    /// assert_eq!(response.status, StatusWord::SUCCESS);
    /// ```
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        if raw.len() < 2 {
            return Err(Error::MalformedResponse {
                expected: 2,
                actual: raw.len(),
            });
        }

        let (data, sw) = raw.split_at(raw.len() - 2);
        Ok(Self::new(Bytes::copy_from_slice(data), sw[0], sw[1]))
    }

    /// Data on success, the status word's error otherwise
    pub fn into_result(self) -> Result<Bytes> {
        self.status.check(self.data)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("data", &hex::encode_upper(&self.data))
            .field("status", &format_args!("{}", self.status))
            .finish()
    }
}
