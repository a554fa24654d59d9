use std::sync::Arc;

use chrono::Utc;
use serenity::all::{Context, VoiceState};
use tracing::{debug, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::services::scoring::ledger;
use crate::utils::roles;

pub async fn handle_voice_state_update(
    ctx: &Context,
    data: &Arc<Data>,
    old: Option<&VoiceState>,
    new: &VoiceState,
) -> Result<(), Error> {
    let guild_id = match new.guild_id {
        Some(id) => id,
        None => return Ok(()), // DM voice states are not supported
    };

    let user_id = new.user_id;
    let now = Utc::now();

    // Exempt members never open sessions or earn voice points
    let member_roles = new
        .member
        .as_ref()
        .map(|m| m.roles.as_slice())
        .unwrap_or(&[]);
    if roles::is_exempt(ctx, guild_id, member_roles, &data.settings.exempt_role_name) {
        return Ok(());
    }

    let old_channel = old.and_then(|o| o.channel_id);
    let new_channel = new.channel_id;

    match (old_channel, new_channel) {
        // Connected: open a session pinned to the joined channel
        (None, Some(channel_id)) => {
            let channel_name = ctx
                .cache
                .guild(guild_id)
                .and_then(|guild| guild.channels.get(&channel_id).map(|c| c.name.clone()))
                .unwrap_or_default();

            if data
                .voice_sessions
                .open(user_id.get(), channel_id.get(), &channel_name, now)
            {
                debug!(
                    "Opened voice session for user {} in channel {}",
                    user_id, channel_id
                );
            }
        }

        // Disconnected: close the session and credit the elapsed time.
        // With no open session (e.g. the bot restarted mid-session) this
        // is a no-op and the time is forfeited.
        (Some(_), None) => {
            if let Some(closed) = data.voice_sessions.close(user_id.get(), now) {
                let points = ledger::award_voice(
                    &data.pool,
                    user_id.get(),
                    closed.elapsed_secs,
                    &closed.channel_name,
                )
                .await?;

                info!(
                    "User {} earned {} points for {}s of voice in {}",
                    user_id, points, closed.elapsed_secs, closed.channel_name
                );
            }
        }

        // Channel moves keep the original session running; the rate stays
        // pinned to the channel the session started in
        _ => {}
    }

    Ok(())
}
