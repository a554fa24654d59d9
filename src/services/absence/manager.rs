use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::bot::error::Error;
use crate::constants::scoring::ABSENCE_DATE_FORMAT;
use crate::db::models::UserRecord;
use crate::db::queries::user_record;

/// A validated absence window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsenceWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn parse_date(text: &str) -> Result<DateTime<Utc>, Error> {
    NaiveDate::parse_from_str(text.trim(), ABSENCE_DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| Error::InvalidDateFormat(text.trim().to_string()))
}

/// Validate a declared absence period. Both dates must be DD-MM-YYYY and
/// the start must be strictly before the end; rejection leaves no trace in
/// the store.
pub fn parse_window(start_text: &str, end_text: &str) -> Result<AbsenceWindow, Error> {
    let start = parse_date(start_text)?;
    let end = parse_date(end_text)?;

    if start >= end {
        return Err(Error::InvalidDateRange);
    }

    Ok(AbsenceWindow { start, end })
}

/// Validate and record an absence request, putting the member on break.
pub async fn begin_break(
    pool: &PgPool,
    user_id: u64,
    start_text: &str,
    end_text: &str,
) -> Result<AbsenceWindow, Error> {
    let window = parse_window(start_text, end_text)?;

    user_record::start_break(pool, user_id, window.start, window.end).await?;
    info!(
        "User {} is on break from {} to {}",
        user_id,
        window.start.format(ABSENCE_DATE_FORMAT),
        window.end.format(ABSENCE_DATE_FORMAT)
    );

    Ok(window)
}

/// End a member's break. Members may return before their declared end date;
/// the window is informational and never checked here. Returns false when
/// the member was not on break.
pub async fn end_break(pool: &PgPool, user_id: u64) -> Result<bool, Error> {
    let cleared = user_record::end_break(pool, user_id).await?;
    if cleared {
        info!("User {} returned from break", user_id);
    }
    Ok(cleared)
}

/// Members currently on break, ordered by break start
pub async fn list_on_break(pool: &PgPool) -> Result<Vec<UserRecord>, Error> {
    Ok(user_record::list_on_break(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_window_accepted() {
        let window = parse_window("09-04-2025", "16-04-2025").unwrap();
        assert!(window.start < window.end);
        assert_eq!(window.start.format("%d-%m-%Y").to_string(), "09-04-2025");
        assert_eq!(window.end.format("%d-%m-%Y").to_string(), "16-04-2025");
    }

    #[test]
    fn test_reversed_window_rejected() {
        let err = parse_window("16-04-2025", "09-04-2025").unwrap_err();
        assert!(matches!(err, Error::InvalidDateRange));
    }

    #[test]
    fn test_equal_dates_rejected() {
        let err = parse_window("09-04-2025", "09-04-2025").unwrap_err();
        assert!(matches!(err, Error::InvalidDateRange));
    }

    #[test]
    fn test_malformed_date_rejected() {
        let err = parse_window("2025-04-09", "16-04-2025").unwrap_err();
        assert!(matches!(err, Error::InvalidDateFormat(_)));

        let err = parse_window("09-04-2025", "soon").unwrap_err();
        assert!(matches!(err, Error::InvalidDateFormat(_)));
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert!(parse_window(" 09-04-2025 ", "16-04-2025").is_ok());
    }
}
