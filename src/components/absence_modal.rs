use std::sync::Arc;

use serenity::all::{
    ActionRowComponent, ChannelId, Context, CreateActionRow, CreateInputText,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage, CreateModal,
    InputTextStyle, Mentionable, ModalInteraction,
};
use tracing::warn;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::handlers::interaction::send_modal_error;
use crate::services::absence::manager;

pub const MODAL_ID: &str = "absence_request";

/// Create the absence request modal
pub fn create_modal() -> CreateModal {
    CreateModal::new(MODAL_ID, "Absence Request").components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Start Date (DD-MM-YYYY)", "start_date")
                .placeholder("09-04-2025")
                .required(true),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "End Date (DD-MM-YYYY)", "end_date")
                .placeholder("16-04-2025")
                .required(true),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Paragraph, "Reason", "reason")
                .placeholder("Note or justification...")
                .required(true),
        ),
    ])
}

/// Handle absence modal submission: validate the window, put the member on
/// break, and notify the review channel
pub async fn handle_submission(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
) -> Result<(), Error> {
    let start_text = input_value(modal, "start_date").unwrap_or_default();
    let end_text = input_value(modal, "end_date").unwrap_or_default();
    let reason = input_value(modal, "reason").unwrap_or_default();

    match manager::begin_break(&data.pool, modal.user.id.get(), &start_text, &end_text).await {
        Ok(_window) => {}
        Err(e) if e.is_validation() => {
            // Malformed or illogical dates: report to the submitter, state unchanged
            send_modal_error(ctx, modal, &e.to_string()).await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    let embed = embeds::success_embed()
        .title("Absence Submitted")
        .description(
            "Your absence request has been recorded. You are protected from \
            inactivity decay until you return with `/back`.",
        );

    modal
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await?;

    notify_review_channel(ctx, data, modal, &start_text, &end_text, &reason).await;

    Ok(())
}

/// Post the request to the review channel. Notification failure never
/// fails the submission itself.
async fn notify_review_channel(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
    start_text: &str,
    end_text: &str,
    reason: &str,
) {
    let Some(channel_id) = data.settings.absence_review_channel_id else {
        return;
    };

    let embed = embeds::warning_embed()
        .title("New Absence Request")
        .description(format!("**From:** {}", modal.user.id.mention()))
        .field("Reason", reason, false)
        .field(
            "Period",
            format!("From **{}** to **{}**", start_text, end_text),
            false,
        );

    if let Err(e) = ChannelId::new(channel_id)
        .send_message(ctx, CreateMessage::new().embed(embed))
        .await
    {
        warn!("Failed to notify absence review channel: {:?}", e);
    }
}

fn input_value(modal: &ModalInteraction, custom_id: &str) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| {
            if let ActionRowComponent::InputText(input) = component {
                if input.custom_id == custom_id {
                    return input.value.clone();
                }
            }
            None
        })
}
