use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A validated raffle number in `[0, 99]`.
///
/// Displays zero-padded to two digits (`7` renders as `07`), matching how
/// numbers appear on the printed tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(u8);

impl TicketNumber {
    /// Creates a `TicketNumber` from a raw value.
    ///
    /// # Errors
    /// Returns [`CoreError::NumberOutOfRange`] if `value` is not in `[0, 99]`.
    pub fn new(value: u16) -> Result<Self, CoreError> {
        if value >= TicketBoard::COUNT_U16 {
            return Err(CoreError::NumberOutOfRange { value });
        }
        #[allow(clippy::cast_possible_truncation)]
        let value = value as u8;
        Ok(Self(value))
    }

    /// Returns the raw number.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u16> for TicketNumber {
    type Error = CoreError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// One of the 100 raffle numbers, with its sale state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Ticket {
    /// The raffle number, immutable for the lifetime of the board.
    pub number: TicketNumber,
    /// Whether the number has been sold.
    pub sold: bool,
    /// Name given by the buyer, if any was provided at claim time.
    pub buyer: Option<String>,
}

impl Ticket {
    fn available(number: TicketNumber) -> Self {
        Self { number, sold: false, buyer: None }
    }
}

/// Aggregate sale counters for the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct BoardStats {
    /// Total number of tickets on the board, always 100.
    pub total: u32,
    /// Tickets currently sold.
    pub sold: u32,
    /// Tickets still available.
    pub available: u32,
    /// Percentage sold, rounded to two decimal places.
    pub percent_sold: f64,
}

/// The fixed pool of 100 raffle tickets.
///
/// Invariant: the board always holds exactly 100 tickets numbered `0..=99`
/// in order, with no duplicates. Tickets are never added or removed; only
/// their `sold`/`buyer` fields change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketBoard {
    tickets: Vec<Ticket>,
}

impl TicketBoard {
    /// Number of tickets on a board.
    pub const COUNT: usize = 100;

    const COUNT_U16: u16 = 100;

    /// Creates a fresh board with all 100 tickets available.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let last = (Self::COUNT_U16 - 1) as u8;
        let tickets = (0..=last)
            .map(|n| Ticket::available(TicketNumber(n)))
            .collect();
        Self { tickets }
    }

    /// Rebuilds a board from a persisted snapshot.
    ///
    /// # Errors
    /// Returns [`CoreError::WrongTicketCount`] unless the snapshot holds
    /// exactly 100 tickets, or [`CoreError::MisnumberedTicket`] if any ticket
    /// is duplicated or out of sequence.
    pub fn from_tickets(tickets: Vec<Ticket>) -> Result<Self, CoreError> {
        if tickets.len() != Self::COUNT {
            return Err(CoreError::WrongTicketCount {
                expected: Self::COUNT,
                actual: tickets.len(),
            });
        }
        for (position, ticket) in tickets.iter().enumerate() {
            if usize::from(ticket.number.value()) != position {
                return Err(CoreError::MisnumberedTicket {
                    position,
                    number: ticket.number.value(),
                });
            }
        }
        Ok(Self { tickets })
    }

    /// Returns the ticket for `number`.
    #[must_use]
    pub fn get(&self, number: TicketNumber) -> &Ticket {
        &self.tickets[usize::from(number.value())]
    }

    /// Iterates over all 100 tickets in numeric order.
    pub fn iter(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    /// Returns a copy of every ticket, for snapshotting.
    #[must_use]
    pub fn tickets(&self) -> Vec<Ticket> {
        self.tickets.clone()
    }

    /// Marks `number` as sold and records the buyer, if given.
    ///
    /// # Errors
    /// Returns [`CoreError::AlreadySold`] if the ticket is no longer
    /// available.
    pub fn claim(&mut self, number: TicketNumber, buyer: Option<String>) -> Result<(), CoreError> {
        let ticket = &mut self.tickets[usize::from(number.value())];
        if ticket.sold {
            return Err(CoreError::AlreadySold { number });
        }
        ticket.sold = true;
        ticket.buyer = buyer;
        Ok(())
    }

    /// Returns every ticket to the available state and clears buyers.
    pub fn reset_all(&mut self) {
        for ticket in &mut self.tickets {
            ticket.sold = false;
            ticket.buyer = None;
        }
    }

    /// Computes aggregate sale counters.
    #[must_use]
    pub fn stats(&self) -> BoardStats {
        #[allow(clippy::cast_possible_truncation)]
        let sold = self.tickets.iter().filter(|t| t.sold).count() as u32;
        #[allow(clippy::cast_possible_truncation)]
        let total = Self::COUNT as u32;
        let available = total - sold;
        let percent_sold =
            (f64::from(sold) / f64::from(total) * 100.0 * 100.0).round() / 100.0;
        BoardStats { total, sold, available, percent_sold }
    }
}

impl Default for TicketBoard {
    fn default() -> Self {
        Self::new()
    }
}
