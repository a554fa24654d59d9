use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Settings;
use crate::services::scoring::voice::VoiceTracker;

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: PgPool,
    pub settings: Settings,
    /// Open voice sessions, keyed by user id. Transient: lost on restart,
    /// with no retroactive credit for time already spent in a channel.
    pub voice_sessions: VoiceTracker,
}

impl Data {
    pub fn new(pool: PgPool, settings: Settings) -> Self {
        Self {
            pool,
            settings,
            voice_sessions: VoiceTracker::new(),
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("open_voice_sessions", &self.voice_sessions.open_count())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
