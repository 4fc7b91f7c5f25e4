//! Hardware-dependent integration tests
//!
//! These tests require a GemClub Memo card in a PC/SC reader. They are
//! ignored by default and must be explicitly run with:
//!
//!     cargo test --package gemclub --features pcsc --test hardware_integration -- --ignored

#![cfg(feature = "pcsc")]

use std::time::Duration;

use gemclub::{defaults, Address, Card, ErrorKind, PcscTransport};

fn connected_card() -> Card {
    let mut card = Card::discover(Duration::from_secs(10));
    card.connect().expect("Failed to connect to card");
    card
}

/// **Requires**: Card reader connected (card not required)
#[test]
#[ignore = "requires hardware: card reader"]
fn test_list_readers() {
    let readers = PcscTransport::list_readers().expect("Failed to reach PC/SC service");
    assert!(!readers.is_empty(), "No card reader found");
}

/// **Requires**: GemClub Memo card inserted
#[test]
#[ignore = "requires hardware: GemClub Memo card"]
fn test_connect_and_identify() {
    let mut card = connected_card();

    assert!(card.is_connected());
    let mfa = card.manufacturer_area().expect("Manufacturer area not cached");
    println!("Manufacturer area: {}", hex::encode_upper(mfa));

    card.disconnect().unwrap();
    assert!(!card.is_connected());
}

/// **Requires**: GemClub Memo card inserted
#[test]
#[ignore = "requires hardware: GemClub Memo card"]
fn test_read_public_area() {
    let mut card = connected_card();

    let serial = card.issuer_serial_number().unwrap();
    println!("Issuer serial: {}", hex::encode_upper(serial));

    let mode = card.mode().unwrap();
    println!("Mode: {}", mode);

    let conditions = card.access_conditions().unwrap();
    println!("Access conditions: {:?}", conditions);

    for addr in [Address::CSC0_RCNT, Address::CSC1_RCNT, Address::CSC2_RCNT] {
        println!("{}: {}", addr, card.ratification_counter(addr).unwrap());
    }

    card.disconnect().unwrap();
}

/// **Requires**: GemClub Memo card inserted
///
/// Presents a forbidden code, which the card refuses without touching the
/// ratification counter.
#[test]
#[ignore = "requires hardware: GemClub Memo card"]
fn test_forbidden_code_rejected() {
    let mut card = connected_card();

    let err = card
        .verify(gemclub::VerifyTarget::Csc1, &defaults::FORBIDDEN_CODES[0])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Verification);
    assert!(card.is_connected());

    card.disconnect().unwrap();
}
