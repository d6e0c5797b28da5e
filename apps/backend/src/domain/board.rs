use serde::Serialize;

use super::seat::Seat;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// A 3x3 board in row-major order. Serializes as a flat array of nine
/// entries, each `"X"`, `"O"` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Board([Option<Seat>; CELLS]);

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, idx: usize) -> Option<Seat> {
        self.0[idx]
    }

    /// Place a mark. Callers must have validated the cell is in range and
    /// empty.
    pub fn place(&mut self, idx: usize, seat: Seat) {
        self.0[idx] = Some(seat);
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn cells(&self) -> &[Option<Seat>; CELLS] {
        &self.0
    }

    /// Parse the nine-character storage form ('-', 'X', 'O' per cell).
    pub fn from_stored(s: &str) -> Option<Board> {
        let mut cells = [None; CELLS];
        if s.chars().count() != CELLS {
            return None;
        }
        for (idx, c) in s.chars().enumerate() {
            cells[idx] = match c {
                '-' => None,
                _ => Some(Seat::from_mark(c)?),
            };
        }
        Some(Board(cells))
    }

    /// Render the nine-character storage form.
    pub fn to_stored(&self) -> String {
        self.0
            .iter()
            .map(|cell| cell.map_or('-', Seat::mark))
            .collect()
    }
}
