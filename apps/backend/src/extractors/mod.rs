pub mod game_id;

pub use game_id::GameId;
