//! Fuzz target: `TicketNumber` construction from arbitrary values.
//!
//! Verifies that validation never panics and that every accepted value
//! round-trips through the zero-padded display form.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rifa_core::TicketNumber;

fuzz_target!(|value: u16| {
    if let Ok(number) = TicketNumber::new(value) {
        let text = number.to_string();
        assert_eq!(text.len(), 2);
        assert_eq!(u16::from(number.value()), value);
    }
});
