use std::sync::Arc;

use serenity::all::{
    Context, CreateInteractionResponse, CreateInteractionResponseMessage, Interaction,
    ModalInteraction,
};
use tracing::{debug, error};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::components::absence_modal;
use crate::constants::embeds;

pub async fn handle_interaction(
    ctx: &Context,
    data: &Arc<Data>,
    interaction: &Interaction,
) -> Result<(), Error> {
    if let Interaction::Modal(modal) = interaction {
        handle_modal(ctx, data, modal).await?;
    }

    Ok(())
}

async fn handle_modal(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
) -> Result<(), Error> {
    let custom_id = &modal.data.custom_id;
    debug!("Modal submission: {}", custom_id);

    if custom_id == absence_modal::MODAL_ID {
        if let Err(e) = absence_modal::handle_submission(ctx, data, modal).await {
            error!("Absence modal error: {:?}", e);
            let _ = send_modal_error(ctx, modal, &format!("An error occurred: {}", e)).await;
        }
    } else {
        debug!("Unknown modal submission: {}", custom_id);
    }

    Ok(())
}

/// Send an ephemeral error message for a modal interaction
pub async fn send_modal_error(
    ctx: &Context,
    modal: &ModalInteraction,
    message: &str,
) -> Result<(), Error> {
    let embed = embeds::error_embed().title("Error").description(message);

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

    Ok(())
}
