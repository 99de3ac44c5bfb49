//! Command dispatch - routes a [`CommandEvent`] to its handler and renders the reply.
//!
//! The dispatcher holds no state. Its only checks are name-based routing and the
//! capability gate, which runs before any handler touches the store. Every known
//! command yields exactly one reply: a confirmation, a specific refusal, or a
//! generic failure message when the store itself failed.

use crate::{
    config::AppConfig,
    core::{
        catalog,
        command::{Command, CommandEvent, EMBED_COLOR, Reply},
        ledger, live_break,
    },
    errors::{Error, Result},
    store::EconomyStore,
};
use tracing::{debug, error, info, instrument, warn};

/// Reply sent when a caller lacks the capability a command needs
pub const PERMISSION_DENIED: &str = "❌ You do not have permission to use this command.";

/// Reply sent when the store fails
pub const GENERIC_FAILURE: &str =
    "❌ Something went wrong while processing your command. Please try again later.";

const HELP_TEXT: &str = "**CardBuddy Help**\n\
    Here is a summary of all available commands.\n\n\
    **Economy**\n\
    • `/claim` - Claims your coin reward (once per cooldown).\n\
    • `/balance` - Shows your coin balance.\n\
    • `/breaks` - Lists live breaks and their prices.\n\
    • `/joinbreak <break_name>` - Pays to join a live break.\n\n\
    **Cards**\n\
    • `/viewcard <name>` - Shows a card.\n\
    • `/debugcards` - Lists the card catalog.\n\
    • `/addcard <name> <image> <rarity> <value>` - Adds a card (admins only).\n\
    • `/editcard <name> [new_name] [image] [rarity] [value]` - Edits a card (admins only).\n\n\
    **Utility**\n\
    • `/ping` - Checks if the bot is responsive.\n\
    • `/help` - Shows this help message.";

/// Handles one inbound command.
///
/// Returns `None` when no handler exists for the event's name.
#[instrument(skip(store, config, event), fields(command = %event.name, caller = %event.caller_id))]
pub async fn handle<S>(
    store: &S,
    config: &AppConfig,
    event: &CommandEvent,
    now_ms: i64,
) -> Option<Reply>
where
    S: EconomyStore + ?Sized,
{
    let Some(decoded) = Command::from_event(event) else {
        debug!("No handler for command, ignoring");
        return None;
    };
    let command = match decoded {
        Ok(command) => command,
        Err(e) => return Some(refusal_reply(&e)),
    };

    if let Some(capability) = command.required_capability() {
        if !event.has_capability(capability) {
            info!(?capability, "Command refused, missing capability");
            return Some(Reply::ephemeral(PERMISSION_DENIED));
        }
    }

    let reply = match execute(store, config, &event.caller_id, command, now_ms).await {
        Ok(reply) => reply,
        Err(e) if e.is_refusal() => refusal_reply(&e),
        Err(e) => {
            error!("Command `{}` failed: {e:?}", event.name);
            Reply::text(GENERIC_FAILURE)
        }
    };
    Some(reply)
}

async fn execute<S>(
    store: &S,
    config: &AppConfig,
    caller_id: &str,
    command: Command,
    now_ms: i64,
) -> Result<Reply>
where
    S: EconomyStore + ?Sized,
{
    match command {
        Command::Ping => Ok(Reply::text("🏓 Pong!")),
        Command::Help => Ok(Reply::text(HELP_TEXT)),
        Command::Claim => {
            let receipt = ledger::claim(store, &config.economy, caller_id, now_ms).await?;
            Ok(Reply::text(format!(
                "✅ You have claimed **{} coins**! Your balance is now **{} coins**.",
                receipt.amount, receipt.balance
            )))
        }
        Command::Balance => {
            let balance = ledger::balance(store, caller_id).await?;
            Ok(Reply::text(format!(
                "💰 Your current balance is: **{balance} coins**"
            )))
        }
        Command::JoinBreak { break_name } => {
            let receipt = live_break::join_break(store, caller_id, &break_name).await?;
            Ok(Reply::text(format!(
                "✅ You have successfully joined the live break **{}**! Remaining balance: **{} coins**.",
                receipt.live_break.name, receipt.balance
            )))
        }
        Command::Breaks => Ok(render_breaks(&live_break::list_breaks(store).await?)),
        Command::AddCard(new_card) => {
            let card = catalog::add_card(store, new_card).await?;
            Ok(Reply::text(format!(
                "✅ Card **{}** has been added to the catalog.",
                card.name
            )))
        }
        Command::ViewCard { name } => {
            let card = catalog::view_card(store, &name).await?;
            Ok(Reply::Embed {
                description: format!("Rarity: {}\nValue: {} coins", card.rarity, card.value),
                image_url: Some(card.image_url).filter(|url| !url.is_empty()),
                title: card.name,
                color: EMBED_COLOR,
            })
        }
        Command::EditCard { name, changes } => {
            catalog::edit_card(store, &name, changes).await?;
            Ok(Reply::text(format!("✅ Card **{}** has been updated.", name.trim())))
        }
        Command::DebugCards => {
            let listing = catalog::list_cards(store, config.catalog.list_limit).await?;
            if listing.cards.is_empty() {
                return Ok(Reply::text("📭 There are no cards in the catalog."));
            }
            let mut lines: Vec<String> =
                listing.cards.iter().map(catalog::format_card_line).collect();
            let hidden = listing.hidden();
            if hidden > 0 {
                lines.push(format!("…and {hidden} more"));
            }
            Ok(Reply::text(lines.join("\n")))
        }
    }
}

fn render_breaks(summaries: &[live_break::BreakSummary]) -> Reply {
    if summaries.is_empty() {
        return Reply::text("📭 There are no live breaks right now.");
    }
    let lines: Vec<String> = summaries
        .iter()
        .map(|summary| {
            format!(
                "• **{}** - {} coins ({} joined)",
                summary.live_break.name, summary.live_break.price, summary.entries
            )
        })
        .collect();
    Reply::text(format!("**Live Breaks**\n{}", lines.join("\n")))
}

/// The user-facing text for an expected refusal.
fn refusal_reply(error: &Error) -> Reply {
    let content = match error {
        Error::ClaimCooldown { remaining_hours } => format!(
            "⏳ You have already claimed recently. Try again in **{remaining_hours} hour(s)**."
        ),
        Error::InsufficientFunds { .. } => {
            "❌ You do not have enough coins to join this break.".to_string()
        }
        Error::InvalidAmount { amount } => {
            format!("❌ Invalid coin value {amount}: values cannot be negative.")
        }
        Error::InvalidCard { message } => format!("❌ {message}."),
        Error::CardNotFound { name } => format!("❌ Card '{name}' not found."),
        Error::DuplicateCard { name } => {
            format!("⚠️ A card named '{name}' already exists. Card names must be unique.")
        }
        Error::EmptyEdit => {
            "❌ Nothing to update. Supply at least one field to change.".to_string()
        }
        Error::LiveBreakNotFound { .. } => "❌ Live break not found.".to_string(),
        Error::MissingArgument { name } => format!("❌ Missing or invalid option `{name}`."),
        other => {
            warn!("Unexpected error rendered as refusal: {other:?}");
            GENERIC_FAILURE.to_string()
        }
    };
    Reply::text(content)
}
