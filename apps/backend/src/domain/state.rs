use super::board::{Board, CELLS};
use super::rules::{evaluate_terminal, Outcome};
use super::seat::Seat;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Full in-memory state of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub board: Board,
    /// Seat holding the next turn. `None` iff the outcome is terminal.
    pub current_turn: Option<Seat>,
    pub outcome: Outcome,
    pub player_a: Option<String>,
    pub player_b: Option<String>,
}

/// What happened when a player joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    pub seat: Seat,
    /// True when the name already held the seat and nothing changed.
    pub rejoined: bool,
}

impl SessionState {
    /// A fresh session: empty board, X to move, no players seated.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Some(Seat::A),
            outcome: Outcome::Undecided,
            player_a: None,
            player_b: None,
        }
    }

    /// Seat a player by name.
    ///
    /// A name that already holds a seat rejoins that seat without changing
    /// anything. Otherwise the first free seat (A before B) is assigned.
    /// With both seats held by other names the join is rejected.
    pub fn join(&mut self, name: &str) -> Result<JoinOutcome, DomainError> {
        if self.player_a.as_deref() == Some(name) {
            return Ok(JoinOutcome {
                seat: Seat::A,
                rejoined: true,
            });
        }
        if self.player_b.as_deref() == Some(name) {
            return Ok(JoinOutcome {
                seat: Seat::B,
                rejoined: true,
            });
        }

        if self.player_a.is_none() {
            self.player_a = Some(name.to_string());
            return Ok(JoinOutcome {
                seat: Seat::A,
                rejoined: false,
            });
        }
        if self.player_b.is_none() {
            self.player_b = Some(name.to_string());
            // Both seats are now filled; X opens play
            if self.outcome == Outcome::Undecided {
                self.current_turn = Some(Seat::A);
            }
            return Ok(JoinOutcome {
                seat: Seat::B,
                rejoined: false,
            });
        }

        Err(DomainError::conflict(
            ConflictKind::SeatUnavailable,
            "Game is full",
        ))
    }

    /// Apply one move for `seat` at `cell`.
    ///
    /// Preconditions are checked in a fixed order: terminal outcome first,
    /// then cell validity (range before occupancy), then turn ownership.
    pub fn apply_move(&mut self, seat: Seat, cell: i64) -> Result<(), DomainError> {
        if self.outcome.is_terminal() {
            return Err(DomainError::validation(
                ValidationKind::GameOver,
                "Game is already over",
            ));
        }

        if cell < 0 || cell as usize >= CELLS {
            return Err(DomainError::validation(
                ValidationKind::IllegalCell,
                format!("Cell {cell} is out of range (expected 0-8)"),
            ));
        }
        let idx = cell as usize;
        if self.board.cell(idx).is_some() {
            return Err(DomainError::validation(
                ValidationKind::IllegalCell,
                format!("Cell {cell} is already taken"),
            ));
        }

        match self.current_turn {
            Some(turn) if turn == seat => {}
            Some(turn) => {
                return Err(DomainError::validation(
                    ValidationKind::OutOfTurn,
                    format!("It's {}'s turn", turn.mark()),
                ));
            }
            // current_turn is None only in terminal states, handled above
            None => {
                return Err(DomainError::validation(
                    ValidationKind::GameOver,
                    "Game is already over",
                ));
            }
        }

        self.board.place(idx, seat);
        self.outcome = evaluate_terminal(&self.board);
        self.current_turn = if self.outcome.is_terminal() {
            None
        } else {
            Some(seat.opponent())
        };

        Ok(())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
