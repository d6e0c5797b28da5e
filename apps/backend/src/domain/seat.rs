use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two seats in a session. Seat A always plays "X" and moves
/// first; seat B plays "O".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    #[serde(rename = "X")]
    A,
    #[serde(rename = "O")]
    B,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    /// The board mark for this seat.
    pub fn mark(self) -> char {
        match self {
            Seat::A => 'X',
            Seat::B => 'O',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Seat::A => "X",
            Seat::B => "O",
        }
    }

    pub fn from_mark(c: char) -> Option<Seat> {
        match c {
            'X' => Some(Seat::A),
            'O' => Some(Seat::B),
            _ => None,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
