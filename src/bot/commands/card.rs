//! Card Discord commands - view, list, add and edit catalog cards.
//!
//! Adding and editing are restricted to administrators. The check happens in the
//! core dispatcher so non-administrators get a private refusal instead of a
//! hidden command.

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

    /// Shows a card from the catalog.
    #[poise::command(slash_command)]
    pub async fn viewcard(
        ctx: Context<'_>,
        #[description = "Name of the card"]
        #[autocomplete = "autocomplete::autocomplete_card_name"]
        name: String,
    ) -> Result<()> {
        let event = respond::event(ctx, "viewcard").await.with_arg("name", name);
        respond::dispatch(ctx, event).await
    }

    /// Lists every card in the catalog.
    #[poise::command(slash_command)]
    pub async fn debugcards(ctx: Context<'_>) -> Result<()> {
        respond::dispatch(ctx, respond::event(ctx, "debugcards").await).await
    }

    /// Adds a new card to the catalog (administrators only).
    #[poise::command(slash_command, guild_only)]
    pub async fn addcard(
        ctx: Context<'_>,
        #[description = "Unique name for the card"] name: String,
        #[description = "Image URL shown with the card"] image: String,
        #[description = "Rarity label (e.g., Common, Rare)"] rarity: String,
        #[description = "Value in coins"] value: i64,
    ) -> Result<()> {
        let event = respond::event(ctx, "addcard")
            .await
            .with_arg("name", name)
            .with_arg("image", image)
            .with_arg("rarity", rarity)
            .with_arg("value", value);
        respond::dispatch(ctx, event).await
    }

    /// Edits an existing card (administrators only). Omitted fields are kept.
    #[poise::command(slash_command, guild_only)]
    pub async fn editcard(
        ctx: Context<'_>,
        #[description = "Current name of the card"]
        #[autocomplete = "autocomplete::autocomplete_card_name"]
        name: String,
        #[description = "New name"] new_name: Option<String>,
        #[description = "New image URL"] image: Option<String>,
        #[description = "New rarity label"] rarity: Option<String>,
        #[description = "New value in coins"] value: Option<i64>,
    ) -> Result<()> {
        let event = respond::event(ctx, "editcard")
            .await
            .with_arg("name", name)
            .with_optional_arg("new_name", new_name)
            .with_optional_arg("image", image)
            .with_optional_arg("rarity", rarity)
            .with_optional_arg("value", value);
        respond::dispatch(ctx, event).await
    }
}

// Re-export all commands
pub use inner::*;
