//! Discord command implementations organized by category.

/// Card catalog commands
pub mod card;

/// Coin and live break commands
pub mod economy;

/// General utility commands
pub mod general;

pub use card::*;
pub use economy::*;
pub use general::*;

use crate::{bot::BotData, errors::Error};

/// Every slash command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        claim(),
        balance(),
        breaks(),
        joinbreak(),
        viewcard(),
        debugcards(),
        addcard(),
        editcard(),
    ]
}
