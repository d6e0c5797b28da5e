use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Query, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum GameSessions {
    Table,
    Id,
    RoomNo,
    Board,
    CurrentTurn,
    Outcome,
    PlayerX,
    PlayerO,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum Counters {
    Table,
    Name,
    Value,
    UpdatedAt,
}

/// Counter row that backs room number allocation. Seeded here so the
/// allocator never has to race on first insert.
const ROOM_NO_COUNTER: &str = "room_no";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // game_sessions
        manager
            .create_table(
                Table::create()
                    .table(GameSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSessions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::RoomNo)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::Board)
                            .string_len(9)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameSessions::CurrentTurn).string().null())
                    .col(ColumnDef::new(GameSessions::Outcome).string().not_null())
                    .col(ColumnDef::new(GameSessions::PlayerX).string().null())
                    .col(ColumnDef::new(GameSessions::PlayerO).string().null())
                    .col(
                        ColumnDef::new(GameSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        // listSessions orders newest-created first
        manager
            .create_index(
                Index::create()
                    .name("ix_game_sessions_created_at")
                    .table(GameSessions::Table)
                    .col(GameSessions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // counters
        manager
            .create_table(
                Table::create()
                    .table(Counters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Counters::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Counters::Value).big_integer().not_null())
                    .col(
                        ColumnDef::new(Counters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed the room number sequence at 1.
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(Counters::Table)
                    .columns([Counters::Name, Counters::Value, Counters::UpdatedAt])
                    .values_panic([
                        ROOM_NO_COUNTER.into(),
                        1i64.into(),
                        Expr::current_timestamp().into(),
                    ])
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Counters::Table).to_owned())
            .await?;
        Ok(())
    }
}
