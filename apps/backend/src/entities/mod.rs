pub mod counters;
pub mod game_sessions;
