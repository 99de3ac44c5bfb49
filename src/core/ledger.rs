//! Ledger business logic - coin claims on a cooldown and balance lookups.
//!
//! A user may claim `claim_amount` coins once per cooldown window. The window is
//! measured from that user's own last successful claim, not from a fixed reset
//! time.

use crate::{
    config::{EconomyConfig, app::HOUR_MS},
    errors::{Error, Result},
    store::EconomyStore,
};
use tracing::{info, instrument};

/// Result of a successful claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimReceipt {
    /// Coins credited
    pub amount: i64,
    /// Balance after the claim, read back from the store
    pub balance: i64,
    /// Timestamp recorded as the new last claim
    pub claimed_at: i64,
}

/// Whole hours left in the cooldown, rounded up.
///
/// Negative elapsed time (the clock moved backwards) counts as no time elapsed.
#[must_use]
pub fn remaining_cooldown_hours(cooldown_ms: i64, elapsed_ms: i64) -> u64 {
    let remaining = cooldown_ms.saturating_sub(elapsed_ms.max(0)).max(0);
    remaining.unsigned_abs().div_ceil(HOUR_MS.unsigned_abs())
}

/// Credits the caller's claim if their cooldown has elapsed.
///
/// # Errors
/// Returns `Error::ClaimCooldown` if the caller claimed less than one cooldown
/// ago, leaving the account untouched, or a database error.
#[instrument(skip(store, economy))]
pub async fn claim<S>(
    store: &S,
    economy: &EconomyConfig,
    user_id: &str,
    now_ms: i64,
) -> Result<ClaimReceipt>
where
    S: EconomyStore + ?Sized,
{
    let cooldown_ms = economy.cooldown_ms();

    if let Some(account) = store.get_account(user_id).await? {
        let elapsed = now_ms.saturating_sub(account.last_claim);
        if elapsed < cooldown_ms {
            let remaining_hours = remaining_cooldown_hours(cooldown_ms, elapsed);
            info!(remaining_hours, "Claim refused, cooldown active");
            return Err(Error::ClaimCooldown { remaining_hours });
        }
    }

    let account = store
        .credit_account(user_id, economy.claim_amount, now_ms)
        .await?;
    info!(
        amount = economy.claim_amount,
        balance = account.balance,
        "Claim credited"
    );

    Ok(ClaimReceipt {
        amount: economy.claim_amount,
        balance: account.balance,
        claimed_at: account.last_claim,
    })
}

/// Returns the caller's balance, or 0 if they have no account. Never creates one.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn balance<S>(store: &S, user_id: &str) -> Result<i64>
where
    S: EconomyStore + ?Sized,
{
    Ok(store
        .get_account(user_id)
        .await?
        .map_or(0, |account| account.balance))
}
