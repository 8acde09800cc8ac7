//! Core types for the rifa raffle ticket service.
//!
//! Defines the fundamental domain model: validated ticket numbers, the
//! fixed 100-ticket board, and the pure state transitions (claim, reset,
//! stats) the HTTP layer is built on. No I/O happens here.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ticket;

pub use error::CoreError;
pub use ticket::{BoardStats, Ticket, TicketBoard, TicketNumber};

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: u16) -> TicketNumber {
        match TicketNumber::new(value) {
            Ok(n) => n,
            Err(e) => panic!("valid number {value} rejected: {e}"),
        }
    }

    #[test]
    fn ticket_number_valid_range_accepts() {
        assert!(TicketNumber::new(0).is_ok());
        assert!(TicketNumber::new(50).is_ok());
        assert!(TicketNumber::new(99).is_ok());
    }

    #[test]
    fn ticket_number_out_of_range_rejects() {
        assert!(TicketNumber::new(100).is_err());
        assert!(TicketNumber::new(500).is_err());
        assert!(TicketNumber::new(u16::MAX).is_err());
    }

    #[test]
    fn ticket_number_display_zero_pads() {
        assert_eq!(num(7).to_string(), "07");
        assert_eq!(num(99).to_string(), "99");
    }

    #[test]
    fn new_board_has_100_available_tickets() {
        let board = TicketBoard::new();
        assert_eq!(board.iter().count(), TicketBoard::COUNT);
        assert!(board.iter().all(|t| !t.sold && t.buyer.is_none()));
    }

    #[test]
    fn claim_marks_sold_and_records_buyer() {
        let mut board = TicketBoard::new();
        let number = num(42);
        let claimed = board.claim(number, Some("Ana".to_owned()));
        assert!(claimed.is_ok());

        let ticket = board.get(number);
        assert!(ticket.sold);
        assert_eq!(ticket.buyer.as_deref(), Some("Ana"));
    }

    #[test]
    fn claim_already_sold_fails() {
        let mut board = TicketBoard::new();
        let number = num(13);
        assert!(board.claim(number, None).is_ok());

        let second = board.claim(number, Some("Luis".to_owned()));
        match second {
            Err(CoreError::AlreadySold { number: n }) => assert_eq!(n, number),
            other => panic!("expected AlreadySold, got {other:?}"),
        }
        // The failed claim must not overwrite the original sale.
        assert_eq!(board.get(number).buyer, None);
    }

    #[test]
    fn reset_clears_sold_and_buyers() {
        let mut board = TicketBoard::new();
        for value in [0_u16, 7, 99] {
            assert!(board.claim(num(value), Some("x".to_owned())).is_ok());
        }
        board.reset_all();
        assert!(board.iter().all(|t| !t.sold && t.buyer.is_none()));
        assert_eq!(board.stats().sold, 0);
    }

    #[test]
    fn stats_counts_sum_to_total() {
        let mut board = TicketBoard::new();
        for value in 0..25_u16 {
            assert!(board.claim(num(value), None).is_ok());
        }
        let stats = board.stats();
        assert_eq!(stats.total, 100);
        assert_eq!(stats.sold, 25);
        assert_eq!(stats.available, 75);
        assert_eq!(stats.sold + stats.available, stats.total);
        assert!((stats.percent_sold - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_percentage_rounds_to_two_decimals() {
        let mut board = TicketBoard::new();
        assert!(board.claim(num(0), None).is_ok());
        // 1/100 = 1.00%
        assert!((board.stats().percent_sold - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_tickets_round_trips_a_snapshot() {
        let mut board = TicketBoard::new();
        let number = num(55);
        assert!(board.claim(number, Some("Marta".to_owned())).is_ok());

        let restored = match TicketBoard::from_tickets(board.tickets()) {
            Ok(b) => b,
            Err(e) => panic!("snapshot rejected: {e}"),
        };
        assert_eq!(restored, board);
    }

    #[test]
    fn from_tickets_wrong_count_rejects() {
        let mut tickets = TicketBoard::new().tickets();
        tickets.pop();
        match TicketBoard::from_tickets(tickets) {
            Err(CoreError::WrongTicketCount { expected: 100, actual: 99 }) => {}
            other => panic!("expected WrongTicketCount, got {other:?}"),
        }
    }

    #[test]
    fn from_tickets_misnumbered_rejects() {
        let mut tickets = TicketBoard::new().tickets();
        tickets.swap(3, 4);
        match TicketBoard::from_tickets(tickets) {
            Err(CoreError::MisnumberedTicket { position: 3, number: 4 }) => {}
            other => panic!("expected MisnumberedTicket, got {other:?}"),
        }
    }

    #[test]
    fn ticket_serialization_uses_plain_number() {
        let board = TicketBoard::new();
        let first = board.get(num(0));
        let json = match serde_json::to_value(first) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json["number"], 0);
        assert_eq!(json["sold"], false);
        assert!(json["buyer"].is_null());
    }
}
