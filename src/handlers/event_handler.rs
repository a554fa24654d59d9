use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{debug, error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::handlers::{interaction, message, voice_state};

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::Message { new_message } => {
            // Scoring failures are scoped to the single message; the event
            // is dropped rather than retried
            if let Err(e) = message::handle_message(ctx, data, new_message).await {
                error!("Message handler error: {:?}", e);
            }
        }

        FullEvent::VoiceStateUpdate { old, new } => {
            debug!("Voice state update: {:?} -> {:?}", old, new);
            if let Err(e) = voice_state::handle_voice_state_update(ctx, data, old.as_ref(), new).await {
                error!("Voice state handler error: {:?}", e);
            }
        }

        FullEvent::InteractionCreate { interaction } => {
            // Poise handles ApplicationCommand (slash commands) automatically;
            // modal submissions are routed here
            if let serenity::Interaction::Modal(_) = interaction {
                if let Err(e) = interaction::handle_interaction(ctx, data, interaction).await {
                    error!("Modal interaction handler error: {:?}", e);
                }
            }
        }

        _ => {}
    }

    Ok(())
}
