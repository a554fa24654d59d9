use serenity::all::{Context, GuildId, RoleId};

/// Check whether any of the member's roles carries the exempt role name.
/// Exempt members neither earn nor lose points. Falls back to non-exempt
/// when the guild is not cached.
pub fn is_exempt(
    ctx: &Context,
    guild_id: GuildId,
    member_roles: &[RoleId],
    exempt_role_name: &str,
) -> bool {
    ctx.cache
        .guild(guild_id)
        .map(|guild| {
            member_roles.iter().any(|role_id| {
                guild
                    .roles
                    .get(role_id)
                    .map(|role| role.name == exempt_role_name)
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}
