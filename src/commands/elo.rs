use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::user_record;

/// Check your current activity ELO
#[poise::command(slash_command, guild_only)]
pub async fn elo(ctx: Context<'_>) -> Result<(), Error> {
    let score = user_record::get_elo(&ctx.data().pool, ctx.author().id.get()).await?;

    let embed = match score {
        Some(elo) => embeds::standard_embed()
            .title("Activity ELO")
            .description(format!("Your current ELO is **{}**.", elo)),
        None => embeds::standard_embed()
            .title("Activity ELO")
            .description("You don't have an ELO yet. Start chatting or joining voice channels!"),
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
