use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::constants::scoring::{
    DEFAULT_VOICE_RATE, OPERATION_RATE, ROAM_RATE, VOICE_UNIT_SECONDS,
};

/// An open voice session. The channel name is captured at join time so the
/// rate stays pinned to the channel the session started in.
#[derive(Debug, Clone)]
pub struct VoiceSession {
    pub channel_id: u64,
    pub channel_name: String,
    pub started_at: DateTime<Utc>,
}

/// A session that just ended, ready for point computation
#[derive(Debug, Clone)]
pub struct ClosedSession {
    pub channel_id: u64,
    pub channel_name: String,
    pub elapsed_secs: u64,
}

/// Tracks currently-open voice sessions, keyed by user id.
///
/// Per-key operations are atomic: a join and a leave for the same member
/// cannot interleave into a corrupted or duplicated session, and different
/// members never contend on each other.
pub struct VoiceTracker {
    sessions: DashMap<u64, VoiceSession>,
}

impl VoiceTracker {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Open a session for a member who just connected. If a session is
    /// already open (a channel move observed without a disconnect), the
    /// original session stands untouched and this returns false; the member
    /// is credited under the original channel when they finally disconnect.
    pub fn open(
        &self,
        user_id: u64,
        channel_id: u64,
        channel_name: &str,
        now: DateTime<Utc>,
    ) -> bool {
        match self.sessions.entry(user_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(VoiceSession {
                    channel_id,
                    channel_name: channel_name.to_string(),
                    started_at: now,
                });
                true
            }
        }
    }

    /// Close a member's session, returning the elapsed time and the channel
    /// it was opened in. Returns `None` when no session exists, e.g. a
    /// disconnect observed after a restart dropped the in-memory state.
    pub fn close(&self, user_id: u64, now: DateTime<Utc>) -> Option<ClosedSession> {
        self.sessions.remove(&user_id).map(|(_, session)| {
            let elapsed = (now - session.started_at).num_seconds().max(0) as u64;
            ClosedSession {
                channel_id: session.channel_id,
                channel_name: session.channel_name,
                elapsed_secs: elapsed,
            }
        })
    }

    pub fn open_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for VoiceTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of scoring units for a closed session: one unit per full
/// 5-minute block, with a minimum of one unit per session.
pub fn voice_units(elapsed_secs: u64) -> u64 {
    (elapsed_secs / VOICE_UNIT_SECONDS).max(1)
}

/// Points-per-unit rate from the channel name. The name is normalized by
/// keeping alphabetic characters only and lowercasing, so "Operation-Alpha"
/// and "operation alpha" classify the same.
pub fn channel_rate(raw_name: &str) -> f64 {
    let normalized: String = raw_name
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();

    if normalized.starts_with("operation") {
        OPERATION_RATE
    } else if normalized.starts_with("roam") {
        ROAM_RATE
    } else {
        DEFAULT_VOICE_RATE
    }
}

/// Whole points earned for a closed session
pub fn voice_points(elapsed_secs: u64, raw_channel_name: &str) -> i64 {
    (voice_units(elapsed_secs) as f64 * channel_rate(raw_channel_name)).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_units_minimum_one() {
        assert_eq!(voice_units(0), 1);
        assert_eq!(voice_units(30), 1);
        assert_eq!(voice_units(299), 1);
        assert_eq!(voice_units(300), 1);
        assert_eq!(voice_units(610), 2);
        assert_eq!(voice_units(1500), 5);
    }

    #[test]
    fn test_channel_classification() {
        assert_eq!(channel_rate("Operation Alpha"), 2.5);
        assert_eq!(channel_rate("operation-bravo-2"), 2.5);
        assert_eq!(channel_rate("roam-north"), 1.0);
        assert_eq!(channel_rate("Roaming Party"), 1.0);
        assert_eq!(channel_rate("General"), 1.0);
        assert_eq!(channel_rate(""), 1.0);
    }

    #[test]
    fn test_voice_points() {
        // 610s in an operation channel: 2 units * 2.5 = 5
        assert_eq!(voice_points(610, "Operation Alpha"), 5);
        // 30s still credits the minimum unit: floor(1 * 2.5) = 2
        assert_eq!(voice_points(30, "Operation Alpha"), 2);
        assert_eq!(voice_points(610, "roam-north"), 2);
        assert_eq!(voice_points(30, "General"), 1);
    }

    #[test]
    fn test_open_and_close() {
        let tracker = VoiceTracker::new();
        assert!(tracker.open(1, 100, "Operation Alpha", at(0)));
        assert_eq!(tracker.open_count(), 1);

        let closed = tracker.close(1, at(610)).unwrap();
        assert_eq!(closed.channel_id, 100);
        assert_eq!(closed.channel_name, "Operation Alpha");
        assert_eq!(closed.elapsed_secs, 610);
        assert_eq!(tracker.open_count(), 0);
    }

    #[test]
    fn test_close_without_open_is_noop() {
        let tracker = VoiceTracker::new();
        assert!(tracker.close(42, at(0)).is_none());
    }

    #[test]
    fn test_channel_move_keeps_original_session() {
        let tracker = VoiceTracker::new();
        assert!(tracker.open(1, 100, "Operation Alpha", at(0)));
        // Move to another channel without an observed disconnect
        assert!(!tracker.open(1, 200, "General", at(300)));

        let closed = tracker.close(1, at(900)).unwrap();
        assert_eq!(closed.channel_id, 100);
        assert_eq!(closed.channel_name, "Operation Alpha");
        assert_eq!(closed.elapsed_secs, 900);
    }

    #[test]
    fn test_clock_skew_clamps_to_zero() {
        let tracker = VoiceTracker::new();
        tracker.open(1, 100, "General", at(100));
        let closed = tracker.close(1, at(50)).unwrap();
        assert_eq!(closed.elapsed_secs, 0);
    }
}
