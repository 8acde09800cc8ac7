use crate::ticket::TicketNumber;

/// Errors produced by the `rifa-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A ticket number was outside the valid range `[0, 99]`.
    #[error("ticket number {value} out of range: must be in [0, 99]")]
    NumberOutOfRange { value: u16 },

    /// A claim was attempted on a ticket that is already sold.
    #[error("ticket {number} is already sold")]
    AlreadySold { number: TicketNumber },

    /// A snapshot did not hold exactly the expected number of tickets.
    #[error("board must hold exactly {expected} tickets, snapshot has {actual}")]
    WrongTicketCount { expected: usize, actual: usize },

    /// A snapshot ticket was duplicated or out of sequence.
    #[error("ticket at position {position} is numbered {number}, expected {position}")]
    MisnumberedTicket { position: usize, number: u8 },
}
