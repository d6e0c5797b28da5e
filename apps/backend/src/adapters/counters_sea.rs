//! SeaORM adapter for named counters - generic over ConnectionTrait.
//!
//! Allocation uses a compare-and-set loop instead of row locks so it works
//! the same on every backend: read the current value, then advance it only
//! if nobody else did in the meantime.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entities::counters;

/// Bounded retries before giving up on a contended counter.
const MAX_ATTEMPTS: u32 = 8;

/// Allocate the next value of the named counter.
///
/// Returns the value read before the increment, so consecutive calls yield
/// a strictly increasing sequence starting at the seeded value.
pub async fn next_value<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<i64, sea_orm::DbErr> {
    for _ in 0..MAX_ATTEMPTS {
        let counter = counters::Entity::find_by_id(name.to_string())
            .one(conn)
            .await?
            .ok_or_else(|| sea_orm::DbErr::Custom(format!("ALLOCATION:counter '{name}' missing")))?;

        let current = counter.value;
        let now = time::OffsetDateTime::now_utc();

        let result = counters::Entity::update_many()
            .col_expr(counters::Column::Value, Expr::val(current + 1).into())
            .col_expr(counters::Column::UpdatedAt, Expr::val(now).into())
            .filter(counters::Column::Name.eq(name))
            .filter(counters::Column::Value.eq(current))
            .exec(conn)
            .await?;

        if result.rows_affected == 1 {
            return Ok(current);
        }
        // Lost the race; re-read and try again
    }

    Err(sea_orm::DbErr::Custom(format!(
        "ALLOCATION:counter '{name}' still contended after {MAX_ATTEMPTS} attempts"
    )))
}
