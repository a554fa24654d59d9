use std::env;

use crate::constants::scoring::DEFAULT_EXEMPT_ROLE;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    pub guild_id: Option<u64>,
    /// Channel that receives absence request notifications for review
    pub absence_review_channel_id: Option<u64>,
    /// Name of the role that excludes a member from scoring and decay
    pub exempt_role_name: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable not set")?;

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let absence_review_channel_id = env::var("ABSENCE_REVIEW_CHANNEL_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let exempt_role_name = env::var("EXEMPT_ROLE_NAME")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_EXEMPT_ROLE.to_string());

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
            absence_review_channel_id,
            exempt_role_name,
        })
    }
}
