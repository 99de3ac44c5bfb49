//! Economy Discord commands - claim, balance and live breaks.
//!
//! Each command forwards to the core dispatcher, which applies the cooldown and
//! sufficient-funds rules.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            handlers::{autocomplete, respond},
        },
        errors::Result,
    };

    /// Claims your coin reward. Available once per cooldown window.
    #[poise::command(slash_command)]
    pub async fn claim(ctx: Context<'_>) -> Result<()> {
        respond::dispatch(ctx, respond::event(ctx, "claim").await).await
    }

    /// Shows your current coin balance.
    #[poise::command(slash_command)]
    pub async fn balance(ctx: Context<'_>) -> Result<()> {
        respond::dispatch(ctx, respond::event(ctx, "balance").await).await
    }

    /// Lists live breaks with their prices and number of participants.
    #[poise::command(slash_command)]
    pub async fn breaks(ctx: Context<'_>) -> Result<()> {
        respond::dispatch(ctx, respond::event(ctx, "breaks").await).await
    }

    /// Pays the entry price to join a live break.
    #[poise::command(slash_command)]
    pub async fn joinbreak(
        ctx: Context<'_>,
        #[description = "Name of the break"]
        #[autocomplete = "autocomplete::autocomplete_break_name"]
        break_name: String,
    ) -> Result<()> {
        let event = respond::event(ctx, "joinbreak")
            .await
            .with_arg("break_name", break_name);
        respond::dispatch(ctx, event).await
    }
}

// Re-export all commands
pub use inner::*;
