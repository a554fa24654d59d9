use serenity::all::{CreateInteractionResponse, UserId};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::components::absence_modal;
use crate::constants::embeds::{self, BULLET};
use crate::constants::scoring::ABSENCE_DATE_FORMAT;
use crate::services::absence::manager;

/// Request an absence period
#[poise::command(slash_command, guild_only)]
pub async fn away(ctx: Context<'_>) -> Result<(), Error> {
    match ctx {
        poise::Context::Application(app_ctx) => {
            app_ctx
                .interaction
                .create_response(
                    ctx.serenity_context(),
                    CreateInteractionResponse::Modal(absence_modal::create_modal()),
                )
                .await?;
        }
        poise::Context::Prefix(_) => {
            ctx.say("Use the slash command to open the absence form.")
                .await?;
        }
    }

    Ok(())
}

/// Return from your absence early or on time
#[poise::command(slash_command, guild_only)]
pub async fn back(ctx: Context<'_>) -> Result<(), Error> {
    let cleared = manager::end_break(&ctx.data().pool, ctx.author().id.get()).await?;

    let embed = if cleared {
        embeds::success_embed()
            .title("Welcome Back")
            .description("Your absence has ended. Activity scoring and decay apply again.")
    } else {
        embeds::standard_embed()
            .title("Not On Break")
            .description("You are not currently on break.")
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// List members currently on break
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn onbreak(ctx: Context<'_>) -> Result<(), Error> {
    let records = manager::list_on_break(&ctx.data().pool).await?;

    if records.is_empty() {
        ctx.send(
            poise::CreateReply::default()
                .content("No members are currently on break.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let mut lines = Vec::with_capacity(records.len());
    for record in &records {
        let name = match record.user_id.parse::<u64>() {
            Ok(id) => UserId::new(id)
                .to_user(ctx)
                .await
                .map(|user| user.name)
                .unwrap_or_else(|_| record.user_id.clone()),
            Err(_) => record.user_id.clone(),
        };

        let window = match record.break_window() {
            Some((start, end)) => format!(
                "from {} to {}",
                start.format(ABSENCE_DATE_FORMAT),
                end.format(ABSENCE_DATE_FORMAT)
            ),
            None => "window unknown".to_string(),
        };

        lines.push(format!("{} **{}** – {}", BULLET, name, window));
    }

    let embed = embeds::standard_embed()
        .title("Members On Break")
        .description(lines.join("\n"));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
