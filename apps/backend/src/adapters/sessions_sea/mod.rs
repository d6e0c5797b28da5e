//! SeaORM adapter for the game session repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::game_sessions;

pub mod dto;

pub use dto::{SessionCreate, SessionUpdate};

// Adapter functions return DbErr; the repos layer maps to DomainError.

/// Helper: Apply optimistic update with lock version check, then refetch.
///
/// - Adds the lock_version increment and updated_at to the update
/// - Filters by id and the caller's lock version
/// - Checks rows_affected to distinguish NotFound vs OptimisticLock
/// - Refetches and returns the updated model
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    current_lock_version: i32,
    configure_update: F,
) -> Result<game_sessions::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(
        sea_orm::UpdateMany<game_sessions::Entity>,
    ) -> sea_orm::UpdateMany<game_sessions::Entity>,
{
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(game_sessions::Entity::update_many())
        .col_expr(game_sessions::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            game_sessions::Column::LockVersion,
            Expr::col(game_sessions::Column::LockVersion).add(1),
        )
        .filter(game_sessions::Column::Id.eq(id))
        .filter(game_sessions::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Either the session doesn't exist or the lock version doesn't match
        let session = game_sessions::Entity::find_by_id(id).one(conn).await?;
        if let Some(session) = session {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, session.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        }
        return Err(sea_orm::DbErr::Custom(format!("SESSION_NOT_FOUND:{id}")));
    }

    game_sessions::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("SESSION_NOT_FOUND:{id}")))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Option<game_sessions::Model>, sea_orm::DbErr> {
    game_sessions::Entity::find_by_id(session_id).one(conn).await
}

/// Find a session by ID or fail with a structured not-found payload.
pub async fn require_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    find_by_id(conn, session_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("SESSION_NOT_FOUND:{session_id}")))
}

/// All sessions, newest first.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<game_sessions::Model>, sea_orm::DbErr> {
    game_sessions::Entity::find()
        .order_by_desc(game_sessions::Column::CreatedAt)
        .order_by_desc(game_sessions::Column::Id)
        .all(conn)
        .await
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionCreate,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let session_active = game_sessions::ActiveModel {
        id: NotSet,
        room_no: Set(dto.room_no),
        board: Set(dto.board),
        current_turn: Set(dto.current_turn),
        outcome: Set(dto.outcome),
        player_x: Set(None),
        player_o: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    session_active.insert(conn).await
}

/// Write the full session state back, guarded by the caller's lock version.
pub async fn update_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionUpdate,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;
    use sea_orm::ActiveEnum;

    optimistic_update_then_fetch(conn, dto.id, dto.current_lock_version, |update| {
        update
            .col_expr(game_sessions::Column::Board, Expr::val(dto.board).into())
            .col_expr(
                game_sessions::Column::CurrentTurn,
                Expr::val(dto.current_turn.map(|t| t.to_value())).into(),
            )
            .col_expr(
                game_sessions::Column::Outcome,
                Expr::val(dto.outcome.to_value()).into(),
            )
            .col_expr(
                game_sessions::Column::PlayerX,
                Expr::val(dto.player_x).into(),
            )
            .col_expr(
                game_sessions::Column::PlayerO,
                Expr::val(dto.player_o).into(),
            )
    })
    .await
}
