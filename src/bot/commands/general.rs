//! General Discord commands - ping and help.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::respond},
        errors::Result,
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        respond::dispatch(ctx, respond::event(ctx, "ping").await).await
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        respond::dispatch(ctx, respond::event(ctx, "help").await).await
    }
}

// Re-export all commands
pub use inner::*;
