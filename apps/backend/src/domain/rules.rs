use super::board::Board;
use super::seat::Seat;

/// The eight winning lines, checked in a fixed order: rows, then columns,
/// then diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Result of evaluating a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Undecided,
    Win(Seat),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Undecided)
    }

    /// The value exposed on the wire: `null` while undecided, otherwise
    /// `"X"`, `"O"` or `"draw"`.
    pub fn wire(self) -> Option<&'static str> {
        match self {
            Outcome::Undecided => None,
            Outcome::Win(seat) => Some(seat.as_str()),
            Outcome::Draw => Some("draw"),
        }
    }
}

/// Evaluate a board position. A completed line wins; a full board with no
/// winner is a draw.
pub fn evaluate_terminal(board: &Board) -> Outcome {
    for line in WIN_LINES {
        if let Some(seat) = board.cell(line[0]) {
            if board.cell(line[1]) == Some(seat) && board.cell(line[2]) == Some(seat) {
                return Outcome::Win(seat);
            }
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Undecided
    }
}
