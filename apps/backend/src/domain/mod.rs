//! Pure game rules for two-player tic-tac-toe sessions.
//!
//! Nothing in this module touches the database or the web layer; it is
//! plain data plus transition functions, which keeps the rules trivially
//! unit-testable.

pub mod board;
pub mod rules;
pub mod seat;
pub mod state;

pub use board::Board;
pub use rules::Outcome;
pub use seat::Seat;
pub use state::{JoinOutcome, SessionState};

#[cfg(test)]
mod tests_props;
