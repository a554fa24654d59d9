use chrono::Utc;
use sqlx::PgPool;

use crate::constants::scoring::TEXT_MESSAGE_POINTS;
use crate::db::queries::user_record;
use crate::services::scoring::voice;

/// Single write path for activity-earned score. Every award also refreshes
/// the member's activity timestamp; the decay sweeper never goes through
/// here and stamps the sweep time directly instead.
pub async fn award(pool: &PgPool, user_id: u64, delta: f64) -> Result<(), sqlx::Error> {
    user_record::add_points(pool, user_id, delta, Utc::now()).await
}

/// Fixed award for a qualifying text message
pub async fn award_message(pool: &PgPool, user_id: u64) -> Result<(), sqlx::Error> {
    award(pool, user_id, TEXT_MESSAGE_POINTS).await
}

/// Award for a closed voice session, returning the points granted
pub async fn award_voice(
    pool: &PgPool,
    user_id: u64,
    elapsed_secs: u64,
    channel_name: &str,
) -> Result<i64, sqlx::Error> {
    let points = voice::voice_points(elapsed_secs, channel_name);
    award(pool, user_id, points as f64).await?;
    Ok(points)
}
