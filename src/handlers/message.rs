use std::sync::Arc;

use serenity::all::{Context, Message};
use tracing::debug;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::services::scoring::ledger;
use crate::utils::roles;

/// Credit message activity. Bots and exempt members earn nothing; slash
/// command invocations never arrive as messages, so everything else counts.
pub async fn handle_message(
    ctx: &Context,
    data: &Arc<Data>,
    message: &Message,
) -> Result<(), Error> {
    if message.author.bot {
        return Ok(());
    }

    let guild_id = match message.guild_id {
        Some(id) => id,
        None => return Ok(()), // DMs do not earn points
    };

    let member_roles = message
        .member
        .as_deref()
        .map(|m| m.roles.as_slice())
        .unwrap_or(&[]);

    if roles::is_exempt(ctx, guild_id, member_roles, &data.settings.exempt_role_name) {
        return Ok(());
    }

    ledger::award_message(&data.pool, message.author.id.get()).await?;
    debug!("Credited message activity for user {}", message.author.id);

    Ok(())
}
