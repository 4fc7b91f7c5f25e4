//! Card dump example
//!
//! Set `GEMCLUB_READER` to pick a reader, and `GEMCLUB_CSC1` / `GEMCLUB_CSC2`
//! (8 hex digits) to unlock the protected areas before dumping.

use std::time::Duration;

use anyhow::Context;
use gemclub::{Address, Card, VerifyTarget};
use tracing_subscriber::EnvFilter;

fn present(card: &mut Card, target: VerifyTarget, var: &str) -> anyhow::Result<()> {
    let Ok(code) = std::env::var(var) else {
        return Ok(());
    };

    let code = hex::decode(code.trim()).with_context(|| format!("{} is not hex", var))?;
    match card.verify(target, &code) {
        Ok(()) => println!("✓ {} accepted", target.name()),
        Err(err) => println!("✗ {} rejected: {}", target.name(), err),
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut card = match std::env::var("GEMCLUB_READER") {
        Ok(reader) => Card::with_reader(reader),
        Err(_) => {
            println!("Insert a GemClub Memo card...");
            Card::discover(Duration::from_secs(30))
        }
    };

    card.connect()?;
    if let Some(mfa) = card.manufacturer_area() {
        println!("✓ Connected (manufacturer area {})", hex::encode_upper(mfa));
    }

    println!("Issuer serial:     {}", hex::encode_upper(card.issuer_serial_number()?));
    println!("Mode:              {}", card.mode()?);
    println!("Access conditions: {:?}", card.access_conditions()?);

    for (name, addr) in [
        ("CSC0", Address::CSC0_RCNT),
        ("CSC1", Address::CSC1_RCNT),
        ("CSC2", Address::CSC2_RCNT),
    ] {
        let counter = card.ratification_counter(addr)?;
        println!("{} counter:      {} ({} left)", name, counter, counter.remaining_attempts());
    }

    present(&mut card, VerifyTarget::Csc1, "GEMCLUB_CSC1")?;
    present(&mut card, VerifyTarget::Csc2, "GEMCLUB_CSC2")?;

    println!();
    for addr in Address::all() {
        match card.read_word(addr) {
            Ok(word) => println!("{:<18} {}", addr.to_string(), hex::encode_upper(word)),
            Err(err) => println!("{:<18} -- ({})", addr.to_string(), err),
        }
    }

    card.disconnect()?;
    println!("✓ Disconnected");

    Ok(())
}
