use card_buddy::{
    bot,
    config::{self, database},
    core::live_break,
    errors::{Error, Result},
    store::SeaOrmStore,
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load economy, catalog and live break settings
    let app_config = config::app::load_default_config()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;

    // 4. Connect and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;
    let store = SeaOrmStore::new(db);

    // 5. Seed live breaks from config
    live_break::seed_live_breaks(&store, &app_config.live_breaks)
        .await
        .inspect_err(|e| error!("Failed to seed live breaks: {e}"))?;

    // 6. Run the bot
    // DISCORD_BOT_TOKEN is loaded directly before use, not stored in AppConfig
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, Arc::new(app_config), store).await
}
