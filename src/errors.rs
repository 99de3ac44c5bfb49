//! Unified error types for `CardBuddy`.
//!
//! Business refusals (cooldown, insufficient funds, duplicates, lookups that
//! find nothing) live next to infrastructure failures so that every layer can
//! propagate with `?`. The dispatcher uses [`Error::is_refusal`] to decide
//! whether a failure is an expected branch or something worth logging.

use thiserror::Error;

/// Errors produced anywhere in the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any failure reported by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise failure while talking to Discord
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),

    /// A claim was attempted before the cooldown elapsed
    #[error("Claim on cooldown for {remaining_hours} more hour(s)")]
    ClaimCooldown {
        /// Whole hours left, rounded up
        remaining_hours: u64,
    },

    /// The caller cannot afford an operation
    #[error("Insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds {
        /// Current balance (0 when the caller has no account)
        balance: i64,
        /// Amount the operation costs
        required: i64,
    },

    /// A coin amount outside the accepted range
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// Card details failed validation
    #[error("Invalid card: {message}")]
    InvalidCard {
        /// Why the card was rejected
        message: String,
    },

    /// No card with this name
    #[error("Card not found: {name}")]
    CardNotFound {
        /// The name that was looked up
        name: String,
    },

    /// A card with this name already exists
    #[error("Card already exists: {name}")]
    DuplicateCard {
        /// The conflicting name
        name: String,
    },

    /// An edit supplied no fields
    #[error("No card fields supplied for update")]
    EmptyEdit,

    /// No live break with this name
    #[error("Live break not found: {name}")]
    LiveBreakNotFound {
        /// The name that was looked up
        name: String,
    },

    /// A required command option was absent or had the wrong type
    #[error("Missing or invalid option: {name}")]
    MissingArgument {
        /// Option name
        name: String,
    },
}

impl Error {
    /// Returns true for expected business refusals, false for failures.
    #[must_use]
    pub const fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::ClaimCooldown { .. }
                | Self::InsufficientFunds { .. }
                | Self::InvalidAmount { .. }
                | Self::InvalidCard { .. }
                | Self::CardNotFound { .. }
                | Self::DuplicateCard { .. }
                | Self::EmptyEdit
                | Self::LiveBreakNotFound { .. }
                | Self::MissingArgument { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
