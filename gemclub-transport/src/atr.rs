//! ATR (Answer To Reset) matching
//!
//! Cards are recognised by comparing their ATR to a pattern under a mask,
//! byte by byte. Bits cleared in the mask are ignored.

use std::fmt;

/// ATR pattern with a per-byte mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtrPattern {
    pub atr: &'static [u8],
    pub mask: &'static [u8],
}

/// GemClub Memo cards answer `3B 02 53 01`; the last byte varies
pub static GEMCLUB_MEMO_ATR: AtrPattern = AtrPattern {
    atr: &[0x3B, 0x02, 0x53, 0x01],
    mask: &[0xFF, 0xFF, 0xFF, 0x00],
};

impl AtrPattern {
    /// Check if `atr` matches this pattern
    ///
    /// The length must match exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemclub_transport::GEMCLUB_MEMO_ATR;
    ///
    /// assert!(GEMCLUB_MEMO_ATR.matches(&[0x3B, 0x02, 0x53, 0x42]));
    /// assert!(!GEMCLUB_MEMO_ATR.matches(&[0x3B, 0x02, 0x54, 0x01]));
    /// ```
    pub fn matches(&self, atr: &[u8]) -> bool {
        atr.len() == self.atr.len()
            && atr
                .iter()
                .zip(self.atr.iter().zip(self.mask))
                .all(|(byte, (expected, mask))| byte & mask == expected & mask)
    }
}

impl fmt::Display for AtrPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}",
            hex::encode_upper(self.atr),
            hex::encode_upper(self.mask)
        )
    }
}
