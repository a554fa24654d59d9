use chrono::{DateTime, Utc};

/// Per-member activity state, one row per community member.
///
/// `elo` is stored as a double so fractional message awards accumulate
/// as-is; display paths truncate to an integer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub user_id: String,
    pub elo: f64,
    /// Refreshed on every point-earning event, and set to the sweep time
    /// whenever decay is applied. `None` means the member was never active.
    pub last_active: Option<DateTime<Utc>>,
    pub on_break: bool,
    pub break_start: Option<DateTime<Utc>>,
    pub break_end: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Score as shown to members
    pub fn display_elo(&self) -> i64 {
        self.elo.trunc() as i64
    }

    /// Declared absence window, present only while the member is on break.
    /// Invariant: `on_break` implies both bounds are set with start < end.
    pub fn break_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.on_break, self.break_start, self.break_end) {
            (true, Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}
