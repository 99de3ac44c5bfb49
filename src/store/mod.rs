//! Storage abstraction for accounts, the card catalog and live breaks.
//!
//! Core operations depend on [`EconomyStore`] rather than a concrete database
//! handle. [`SeaOrmStore`] is the production implementation; tests may swap in
//! an in-memory fake.

/// `SeaORM` implementation of the store
pub mod database;

pub use database::SeaOrmStore;

use crate::{
    entities::{account, card, live_break, live_break_entry},
    errors::Result,
};
use async_trait::async_trait;

/// Fields for a new catalog card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    /// Unique display name
    pub name: String,
    /// Image shown when viewing the card
    pub image_url: String,
    /// Free-form rarity label
    pub rarity: String,
    /// Value in coins
    pub value: i64,
}

/// A partial card update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardChanges {
    /// New display name
    pub name: Option<String>,
    /// New image
    pub image_url: Option<String>,
    /// New rarity label
    pub rarity: Option<String>,
    /// New value in coins
    pub value: Option<i64>,
}

impl CardChanges {
    /// True when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.image_url.is_none()
            && self.rarity.is_none()
            && self.value.is_none()
    }
}

/// Persistence operations used by the bot's command handlers.
///
/// Every method is a single logical read or write. Writes that touch more than
/// one row (`join_live_break`) are atomic.
#[async_trait]
pub trait EconomyStore: Send + Sync {
    /// Looks up a user's account.
    async fn get_account(&self, user_id: &str) -> Result<Option<account::Model>>;

    /// Adds `amount` to the user's balance and stamps `claimed_at` as the last
    /// claim, creating the account if needed. Returns the committed row.
    async fn credit_account(
        &self,
        user_id: &str,
        amount: i64,
        claimed_at: i64,
    ) -> Result<account::Model>;

    /// Looks up a card by exact name.
    async fn get_card(&self, name: &str) -> Result<Option<card::Model>>;

    /// Inserts a card. Fails with `Error::DuplicateCard` if the name is taken.
    async fn insert_card(&self, card: NewCard) -> Result<card::Model>;

    /// Writes only the supplied fields of a card.
    async fn update_card(&self, card_id: i64, changes: CardChanges) -> Result<card::Model>;

    /// Returns up to `limit` cards ordered by name.
    async fn list_cards(&self, limit: u64) -> Result<Vec<card::Model>>;

    /// Counts every card in the catalog.
    async fn count_cards(&self) -> Result<u64>;

    /// Returns up to `limit` card names containing `fragment`, ordered by name.
    async fn search_card_names(&self, fragment: &str, limit: u64) -> Result<Vec<String>>;

    /// Looks up a live break by exact name.
    async fn get_live_break(&self, name: &str) -> Result<Option<live_break::Model>>;

    /// Inserts a live break.
    async fn insert_live_break(&self, name: &str, price: i64) -> Result<live_break::Model>;

    /// Changes the price of an existing live break.
    async fn update_live_break_price(
        &self,
        break_id: i64,
        price: i64,
    ) -> Result<live_break::Model>;

    /// Returns every live break ordered by name.
    async fn list_live_breaks(&self) -> Result<Vec<live_break::Model>>;

    /// Debits the break price from the user and records the entry, atomically.
    /// Fails with `Error::InsufficientFunds` without writing anything if the
    /// user cannot afford it.
    async fn join_live_break(
        &self,
        user_id: &str,
        live_break: &live_break::Model,
    ) -> Result<live_break_entry::Model>;

    /// Counts the entries recorded for a break.
    async fn count_break_entries(&self, break_id: i64) -> Result<u64>;
}
