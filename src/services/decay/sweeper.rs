use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::time::interval;
use tracing::{debug, error, info};

use crate::constants::scoring::{
    DECAY_BASE_LOSS, DECAY_GRACE_DAYS, DECAY_GROWTH, DECAY_SWEEP_INTERVAL_SECONDS,
};
use crate::db::models::UserRecord;
use crate::db::queries::user_record;

/// Start the periodic inactivity sweep as a background task
pub fn spawn_decay_sweeper(pool: PgPool) {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(DECAY_SWEEP_INTERVAL_SECONDS));

        loop {
            ticker.tick().await;

            match run_sweep(&pool, Utc::now()).await {
                Ok(swept) => {
                    if swept > 0 {
                        info!("Inactivity sweep applied decay to {} members", swept);
                    } else {
                        debug!("Inactivity sweep found nothing to decay");
                    }
                }
                Err(e) => {
                    error!("Inactivity sweep failed: {:?}", e);
                }
            }
        }
    });
}

/// Whole days since the member's last activity
pub fn days_inactive(last_active: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_active).num_days().max(0)
}

/// Penalty for a given number of inactive days. The exponent uses the
/// total days-inactive count, so the loss jumps sharply right past the
/// grace window.
pub fn decay_loss(days_inactive: i64) -> f64 {
    (DECAY_BASE_LOSS * DECAY_GROWTH.powi((days_inactive - 1) as i32)).floor()
}

/// Loss the sweep would apply to this record right now, if any. Members on
/// break are protected regardless of whether their declared window has
/// passed, and never-active members have no baseline to decay from.
pub fn pending_loss(record: &UserRecord, now: DateTime<Utc>) -> Option<f64> {
    if record.on_break {
        return None;
    }
    let last_active = record.last_active?;

    let days = days_inactive(last_active, now);
    if days <= DECAY_GRACE_DAYS {
        return None;
    }

    Some(decay_loss(days))
}

/// Run one sweep over every record. Updates are committed as one batch;
/// each record's subtraction is still an atomic read-modify-write in the
/// store, so concurrent awards are never lost. Returns how many records
/// were decayed.
pub async fn run_sweep(pool: &PgPool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let records = user_record::list_all(pool).await?;

    let mut tx = pool.begin().await?;
    let mut swept = 0u64;

    for record in records {
        let Some(loss) = pending_loss(&record, now) else {
            continue;
        };

        user_record::apply_decay(&mut *tx, &record.user_id, loss, now).await?;
        debug!(
            "Decayed user {} by {} points ({} -> {})",
            record.user_id,
            loss,
            record.display_elo(),
            (record.elo - loss).max(0.0).trunc() as i64
        );
        swept += 1;
    }

    tx.commit().await?;

    Ok(swept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn record(
        elo: f64,
        last_active: Option<DateTime<Utc>>,
        on_break: bool,
    ) -> UserRecord {
        UserRecord {
            user_id: "1".to_string(),
            elo,
            last_active,
            on_break,
            break_start: None,
            break_end: None,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_decay_loss_curve() {
        // floor(100 * 1.5^2) = 225
        assert_eq!(decay_loss(3), 225.0);
        // floor(100 * 1.5^3) = 337
        assert_eq!(decay_loss(4), 337.0);
        assert_eq!(decay_loss(10), 3844.0);
    }

    #[test]
    fn test_three_days_inactive_loses_225() {
        let rec = record(1000.0, Some(now() - ChronoDuration::days(3)), false);
        assert_eq!(pending_loss(&rec, now()), Some(225.0));
    }

    #[test]
    fn test_grace_window_skips() {
        let rec = record(1000.0, Some(now() - ChronoDuration::days(2)), false);
        assert_eq!(pending_loss(&rec, now()), None);

        let rec = record(1000.0, Some(now() - ChronoDuration::hours(71)), false);
        assert_eq!(pending_loss(&rec, now()), None);
    }

    #[test]
    fn test_on_break_skips() {
        let rec = record(1000.0, Some(now() - ChronoDuration::days(3)), true);
        assert_eq!(pending_loss(&rec, now()), None);
    }

    #[test]
    fn test_never_active_skips() {
        let rec = record(1000.0, None, false);
        assert_eq!(pending_loss(&rec, now()), None);
    }

    #[test]
    fn test_loss_can_exceed_score() {
        // The zero floor is applied in the store, not here: ten idle days
        // compute a loss far beyond a 50-point score.
        let rec = record(50.0, Some(now() - ChronoDuration::days(10)), false);
        let loss = pending_loss(&rec, now()).unwrap();
        assert!(loss > rec.elo);
    }

    #[test]
    fn test_immediate_resweep_is_noop() {
        // A swept record has last_active advanced to the sweep time, so a
        // second sweep right after falls back into the grace window.
        let rec = record(775.0, Some(now()), false);
        assert_eq!(pending_loss(&rec, now()), None);
    }
}
