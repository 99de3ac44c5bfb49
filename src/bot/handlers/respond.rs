//! Translation between poise contexts and the core dispatcher.
//!
//! Commands build a [`CommandEvent`] with [`event`] and hand it to [`dispatch`],
//! which runs the core dispatcher and sends the resulting reply.

use crate::{
    bot::Context,
    core::{
        command::{Capability, CommandEvent, Reply},
        dispatch as core_dispatch,
    },
    errors::Result,
};
use poise::serenity_prelude as serenity;
use std::collections::HashSet;
use tracing::debug;

/// Capabilities of the invoking member, resolved from their guild permissions.
pub async fn caller_capabilities(ctx: Context<'_>) -> HashSet<Capability> {
    let mut capabilities = HashSet::new();
    if let Some(member) = ctx.author_member().await {
        if member
            .permissions
            .is_some_and(|permissions| permissions.administrator())
        {
            capabilities.insert(Capability::Administrator);
        }
    }
    capabilities
}

/// Starts a command event for the invoking user.
pub async fn event(ctx: Context<'_>, name: &str) -> CommandEvent {
    CommandEvent::new(name, ctx.author().id.to_string())
        .with_capabilities(caller_capabilities(ctx).await)
}

/// Converts a core reply into a poise reply.
#[must_use]
pub fn to_create_reply(reply: Reply) -> poise::CreateReply {
    match reply {
        Reply::Text { content, ephemeral } => poise::CreateReply::default()
            .content(content)
            .ephemeral(ephemeral),
        Reply::Embed {
            title,
            description,
            image_url,
            color,
        } => {
            let mut embed = serenity::CreateEmbed::new()
                .title(title)
                .description(description)
                .color(color);
            if let Some(url) = image_url {
                embed = embed.image(url);
            }
            poise::CreateReply::default().embed(embed)
        }
    }
}

/// Runs the event through the core dispatcher and sends its reply, if any.
pub async fn dispatch(ctx: Context<'_>, event: CommandEvent) -> Result<()> {
    let data = ctx.data();
    let now_ms = chrono::Utc::now().timestamp_millis();

    match core_dispatch::handle(&data.store, &data.config, &event, now_ms).await {
        Some(reply) => {
            ctx.send(to_create_reply(reply)).await?;
        }
        None => debug!("No handler for command `{}`", event.name),
    }
    Ok(())
}
