//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `CardBuddy`: the slash commands,
//! autocomplete and reply handlers, and the poise framework setup. Commands only
//! translate Discord interactions into command events for the core dispatcher.

/// Discord command implementations (general, economy, card)
pub mod commands;
/// Discord interaction handlers (autocomplete, replies)
pub mod handlers;

use crate::{
    config::AppConfig,
    errors::{Error, Result},
    store::SeaOrmStore,
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Storage for accounts, cards and live breaks
    pub store: SeaOrmStore,
    /// Economy and catalog settings
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(store: SeaOrmStore, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }
}

/// Context type passed to every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say("❌ An unexpected error occurred.").await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Connects to Discord, registers the slash commands globally and runs until the
/// gateway connection ends.
///
/// # Errors
/// Returns an error if the client cannot be built or the connection fails.
#[instrument(skip_all)]
pub async fn run_bot(token: String, config: Arc<AppConfig>, store: SeaOrmStore) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(store, config))
            })
        })
        .build();

    // Slash commands only need the guilds intent
    let intents = serenity::GatewayIntents::GUILDS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}
