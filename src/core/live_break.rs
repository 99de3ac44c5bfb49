//! Live break business logic - seeding from config, joining and listing.
//!
//! Joining a break costs its price in coins. The caller must already hold an
//! account with enough coins; the debit and the entry are written together.

use crate::{
    config::LiveBreakConfig,
    entities::live_break,
    errors::{Error, Result},
    store::EconomyStore,
};
use tracing::{debug, info, instrument};

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinReceipt {
    /// The joined break
    pub live_break: live_break::Model,
    /// Balance left after paying
    pub balance: i64,
}

/// A break together with how many users joined it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakSummary {
    /// The break
    pub live_break: live_break::Model,
    /// Number of recorded entries
    pub entries: u64,
}

/// Inserts configured breaks that are missing and syncs the price of existing ones.
///
/// Breaks stored in the database but absent from the configuration are left alone
/// so their entries keep pointing at a valid break.
///
/// # Errors
/// Returns an error if a database query fails.
#[instrument(skip_all, fields(count = configured.len()))]
pub async fn seed_live_breaks<S>(store: &S, configured: &[LiveBreakConfig]) -> Result<()>
where
    S: EconomyStore + ?Sized,
{
    for entry in configured {
        let name = entry.name.trim();
        match store.get_live_break(name).await? {
            None => {
                store.insert_live_break(name, entry.price).await?;
                info!("Seeded live break '{name}' at {} coins", entry.price);
            }
            Some(existing) if existing.price != entry.price => {
                store
                    .update_live_break_price(existing.id, entry.price)
                    .await?;
                info!(
                    "Live break '{name}' price changed from {} to {}",
                    existing.price, entry.price
                );
            }
            Some(_) => debug!("Live break '{name}' already up to date"),
        }
    }
    Ok(())
}

/// Pays for and joins the break called `break_name`.
///
/// # Errors
/// Returns an error if:
/// - No break has this name (`Error::LiveBreakNotFound`)
/// - The caller has no account or too few coins (`Error::InsufficientFunds`)
/// - A database query fails
#[instrument(skip(store))]
pub async fn join_break<S>(store: &S, user_id: &str, break_name: &str) -> Result<JoinReceipt>
where
    S: EconomyStore + ?Sized,
{
    let break_name = break_name.trim();
    let live_break = store
        .get_live_break(break_name)
        .await?
        .ok_or_else(|| Error::LiveBreakNotFound {
            name: break_name.to_string(),
        })?;

    let balance = match store.get_account(user_id).await? {
        Some(account) if account.balance >= live_break.price => account.balance,
        account => {
            info!(price = live_break.price, "Join refused, insufficient funds");
            return Err(Error::InsufficientFunds {
                balance: account.map_or(0, |a| a.balance),
                required: live_break.price,
            });
        }
    };

    store.join_live_break(user_id, &live_break).await?;
    info!(break_id = live_break.id, "User joined live break");

    Ok(JoinReceipt {
        balance: balance - live_break.price,
        live_break,
    })
}

/// Lists every break with its entry count.
///
/// # Errors
/// Returns an error if a database query fails.
pub async fn list_breaks<S>(store: &S) -> Result<Vec<BreakSummary>>
where
    S: EconomyStore + ?Sized,
{
    let mut summaries = Vec::new();
    for live_break in store.list_live_breaks().await? {
        let entries = store.count_break_entries(live_break.id).await?;
        summaries.push(BreakSummary {
            live_break,
            entries,
        });
    }
    Ok(summaries)
}
