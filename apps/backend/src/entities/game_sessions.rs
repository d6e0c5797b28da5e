use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Mark of the seat that holds the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TurnMark {
    #[sea_orm(string_value = "X")]
    X,
    #[sea_orm(string_value = "O")]
    O,
}

/// Stored outcome of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum OutcomeState {
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "X_WON")]
    XWon,
    #[sea_orm(string_value = "O_WON")]
    OWon,
    #[sea_orm(string_value = "DRAW")]
    Draw,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-facing room number, allocated from the counters table
    #[sea_orm(column_name = "room_no")]
    pub room_no: i64,
    /// Nine characters, one per cell: '-', 'X' or 'O'
    pub board: String,
    /// None iff the session has reached a terminal outcome
    #[sea_orm(column_name = "current_turn")]
    pub current_turn: Option<TurnMark>,
    pub outcome: OutcomeState,
    #[sea_orm(column_name = "player_x")]
    pub player_x: Option<String>,
    #[sea_orm(column_name = "player_o")]
    pub player_o: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
