//! Data transfer objects for game session adapter operations.

use crate::entities::game_sessions::{OutcomeState, TurnMark};

/// Parameters for creating a new session row.
#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub room_no: i64,
    pub board: String,
    pub current_turn: Option<TurnMark>,
    pub outcome: OutcomeState,
}

/// Whole-state update of a session row, guarded by the lock version the
/// caller last read.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub id: i64,
    pub current_lock_version: i32,
    pub board: String,
    pub current_turn: Option<TurnMark>,
    pub outcome: OutcomeState,
    pub player_x: Option<String>,
    pub player_o: Option<String>,
}
