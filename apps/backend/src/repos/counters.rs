//! Counter repository: room number allocation.

use sea_orm::ConnectionTrait;

use crate::adapters::counters_sea;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Name of the counter backing room number allocation. Seeded by the
/// initial migration.
pub const ROOM_NO_COUNTER: &str = "room_no";

/// Allocate the next room number.
pub async fn next_room_no<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<i64, DomainError> {
    counters_sea::next_value(conn, ROOM_NO_COUNTER)
        .await
        .map_err(map_db_err)
}
