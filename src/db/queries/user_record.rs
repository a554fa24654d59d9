use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::constants::scoring::INITIAL_ELO;
use crate::db::models::UserRecord;

/// Add a score delta and refresh the activity timestamp in one atomic
/// upsert. A member seen for the first time starts at the initial ELO plus
/// the delta. Deliberately not idempotent: repeated calls model repeated
/// independent activity.
pub async fn add_points(
    pool: &PgPool,
    user_id: u64,
    delta: f64,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (user_id, elo, last_active)
        VALUES ($1, $2 + $3, $4)
        ON CONFLICT (user_id)
        DO UPDATE SET elo = users.elo + $3, last_active = $4
        "#,
    )
    .bind(user_id.to_string())
    .bind(INITIAL_ELO)
    .bind(delta)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Current score truncated for display. `None` means the member has no
/// record yet, which is "no activity" rather than a failure.
pub async fn get_elo(pool: &PgPool, user_id: u64) -> Result<Option<i64>, sqlx::Error> {
    let row: Option<(f64,)> = sqlx::query_as("SELECT elo FROM users WHERE user_id = $1")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(elo,)| elo.trunc() as i64))
}

/// Put a member on break with the declared window. Upserts so a member
/// with no prior activity can still request an absence.
pub async fn start_break(
    pool: &PgPool,
    user_id: u64,
    break_start: DateTime<Utc>,
    break_end: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (user_id, on_break, break_start, break_end)
        VALUES ($1, TRUE, $2, $3)
        ON CONFLICT (user_id)
        DO UPDATE SET on_break = TRUE, break_start = $2, break_end = $3
        "#,
    )
    .bind(user_id.to_string())
    .bind(break_start)
    .bind(break_end)
    .execute(pool)
    .await?;

    Ok(())
}

/// End a break unconditionally, clearing the flag and both window bounds
/// together. Returns whether a row was actually on break.
pub async fn end_break(pool: &PgPool, user_id: u64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET on_break = FALSE, break_start = NULL, break_end = NULL
        WHERE user_id = $1 AND on_break
        "#,
    )
    .bind(user_id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_on_break(pool: &PgPool) -> Result<Vec<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(
        "SELECT * FROM users WHERE on_break ORDER BY break_start",
    )
    .fetch_all(pool)
    .await
}

/// All records, for the inactivity sweep
pub async fn list_all(pool: &PgPool) -> Result<Vec<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>("SELECT * FROM users ORDER BY user_id")
        .fetch_all(pool)
        .await
}

/// Apply a decay loss as an atomic read-modify-write: the subtraction and
/// the zero floor happen inside the statement, so a concurrently awarded
/// point is never lost. The activity timestamp advances to the sweep time,
/// which keeps the same gap from being penalized twice.
pub async fn apply_decay<'e, E>(
    executor: E,
    user_id: &str,
    loss: f64,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        UPDATE users
        SET elo = GREATEST(0, elo - $2), last_active = $3
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .bind(loss)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}
