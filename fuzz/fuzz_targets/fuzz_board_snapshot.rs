//! Fuzz target: snapshot deserialization and board validation.
//!
//! Arbitrary byte sequences fed through the JSON parser and
//! `TicketBoard::from_tickets` must never panic — errors are expected
//! and fine.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rifa_core::{Ticket, TicketBoard};

fuzz_target!(|data: &[u8]| {
    if let Ok(tickets) = serde_json::from_slice::<Vec<Ticket>>(data) {
        let _ = TicketBoard::from_tickets(tickets);
    }
});
