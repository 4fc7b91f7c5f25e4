//! Access conditions stored in the Access Control Area

use bitflags::bitflags;

use crate::Word;

bitflags! {
    /// Protection and lock toggles for the two balances and user areas
    ///
    /// Decoded from the last byte of [`Address::ACA_PROT`](crate::Address::ACA_PROT).
    /// A PROT flag set means reading needs the matching CSC; a LOCK flag set
    /// means the area cannot be updated with it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessConditions: u8 {
        /// Reading CTC1 and Balance 1 needs CSC1. Normally set.
        const PROT_BAL1 = 0x80;
        /// Balance 1 is read-only. Normally clear.
        const LOCK_BAL1 = 0x40;
        /// Reading User Area 1 needs CSC1. Normally set.
        const PROT_USR1 = 0x20;
        /// User Area 1 is read-only. Normally clear.
        const LOCK_USR1 = 0x10;
        /// Reading CTC2 and Balance 2 needs CSC2. Normally set.
        const PROT_BAL2 = 0x08;
        /// Balance 2 is read-only. Normally clear.
        const LOCK_BAL2 = 0x04;
        /// Reading User Area 2 needs CSC2. Normally set.
        const PROT_USR2 = 0x02;
        /// User Area 2 is read-only. Normally clear.
        const LOCK_USR2 = 0x01;
    }
}

impl AccessConditions {
    /// Decode from the Access Control Area word
    pub fn decode(word: &Word) -> Self {
        Self::from_bits_retain(word[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_each_bit() {
        let table = [
            (0x80, AccessConditions::PROT_BAL1),
            (0x40, AccessConditions::LOCK_BAL1),
            (0x20, AccessConditions::PROT_USR1),
            (0x10, AccessConditions::LOCK_USR1),
            (0x08, AccessConditions::PROT_BAL2),
            (0x04, AccessConditions::LOCK_BAL2),
            (0x02, AccessConditions::PROT_USR2),
            (0x01, AccessConditions::LOCK_USR2),
        ];

        for (bit, flag) in table {
            let decoded = AccessConditions::decode(&[0, 0, 0, bit]);
            assert_eq!(decoded, flag, "bit 0x{:02X}", bit);
            assert_eq!(decoded.iter().count(), 1);
        }
    }

    #[test]
    fn test_empty_and_full() {
        assert_eq!(AccessConditions::decode(&[0xff, 0xff, 0xff, 0x00]), AccessConditions::empty());
        assert_eq!(AccessConditions::decode(&[0x00, 0x00, 0x00, 0xff]), AccessConditions::all());
    }

    #[test]
    fn test_combined_flags() {
        let decoded = AccessConditions::decode(&[0, 0, 0, 0xa5]);
        assert_eq!(
            decoded,
            AccessConditions::PROT_BAL1
                | AccessConditions::PROT_USR1
                | AccessConditions::LOCK_BAL2
                | AccessConditions::LOCK_USR2
        );
        assert!(!decoded.contains(AccessConditions::LOCK_BAL1));
        assert!(!decoded.contains(AccessConditions::PROT_BAL2));
    }

    #[test]
    fn test_only_last_byte_used() {
        let decoded = AccessConditions::decode(&[0xaa, 0xbb, 0xcc, 0x00]);
        assert!(decoded.is_empty());
    }
}
