//! Protocol constants

/// Class byte. The card ignores it; it is sent for ISO 7816 framing.
pub const CLA: u8 = 0x80;

/// Default card discovery timeout (seconds)
pub const DEFAULT_DISCOVERY_TIMEOUT: u64 = 10;

/// Values programmed by the manufacturer
pub mod defaults {
    use gemclub_types::Word;

    /// Manufacturer Area of a factory card
    pub const MANUFACTURER_AREA: Word = [0xAA, 0xFF, 0xFF, 0xFF];

    /// Factory CSC0
    pub const CSC0: Word = [0xAA; 4];

    /// Factory CSC1
    pub const CSC1: Word = [0x11; 4];

    /// Factory CSC2
    pub const CSC2: Word = [0x22; 4];

    /// Secret codes the card never accepts
    pub const FORBIDDEN_CODES: [Word; 4] = [
        [0x00, 0x00, 0x00, 0x00],
        [0x80, 0x00, 0x00, 0x00],
        [0x7F, 0xFF, 0xFF, 0xFF],
        [0xFF, 0xFF, 0xFF, 0xFF],
    ];

    /// Check if `code` is one of the reserved values a card rejects
    pub fn is_forbidden_code(code: &[u8]) -> bool {
        FORBIDDEN_CODES.iter().any(|forbidden| forbidden.as_slice() == code)
    }
}
