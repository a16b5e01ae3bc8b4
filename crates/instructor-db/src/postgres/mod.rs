//! PostgreSQL repositories.
//!
//! Paged lists read the count and the row window inside one read-only
//! `REPEATABLE READ` transaction, so `total_rows` and the returned rows come from the same
//! snapshot even while other requests write.

mod attendance;
mod questions;
mod schedules;
mod users;

pub use attendance::PgAttendanceRepository;
pub use questions::PgQuestionRepository;
pub use schedules::PgScheduleRepository;
pub use users::PgUserRepository;

use sqlx::{PgPool, Postgres, Transaction};

pub(crate) async fn snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
