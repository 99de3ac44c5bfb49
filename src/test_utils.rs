//! Shared test utilities for `CardBuddy`.
//!
//! This module provides helpers for setting up test databases, sensible default
//! configuration and cards, and [`MemoryStore`], an in-memory [`EconomyStore`]
//! used to exercise the dispatcher without a database.

#![allow(clippy::unwrap_used)]

use crate::{
    config::{AppConfig, CatalogConfig, EconomyConfig},
    entities::{account, card, live_break, live_break_entry},
    errors::{Error, Result},
    store::{CardChanges, EconomyStore, NewCard, SeaOrmStore},
};
use async_trait::async_trait;
use sea_orm::DbErr;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Creates a store over an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_store() -> Result<SeaOrmStore> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(SeaOrmStore::new(db))
}

/// Economy settings with the given claim amount and cooldown.
pub fn test_economy(claim_amount: i64, cooldown_hours: u32) -> EconomyConfig {
    EconomyConfig {
        claim_amount,
        claim_cooldown_hours: cooldown_hours,
    }
}

/// Configuration with `claim_amount = 250`, a 4 hour cooldown and the default
/// listing limit.
pub fn test_config() -> AppConfig {
    AppConfig {
        economy: test_economy(250, 4),
        catalog: CatalogConfig::default(),
        live_breaks: Vec::new(),
    }
}

/// A card with sensible defaults.
///
/// # Defaults
/// * `image_url`: `https://cards.example/<name>.png`
/// * `rarity`: "Common"
/// * `value`: 10
pub fn test_card(name: &str) -> NewCard {
    NewCard {
        name: name.to_string(),
        image_url: format!("https://cards.example/{}.png", name.trim().to_lowercase()),
        rarity: "Common".to_string(),
        value: 10,
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: HashMap<String, account::Model>,
    cards: Vec<card::Model>,
    live_breaks: Vec<live_break::Model>,
    entries: Vec<live_break_entry::Model>,
    next_id: i64,
}

impl MemoryState {
    const fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// An in-memory store that follows the same rules as [`SeaOrmStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    failing: bool,
}

impl MemoryStore {
    /// A store whose every call fails with a database error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Number of cards stored.
    pub fn card_count(&self) -> usize {
        self.state.lock().unwrap().cards.len()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        if self.failing {
            return Err(Error::Database(DbErr::Custom(
                "store unavailable".to_string(),
            )));
        }
        Ok(self.state.lock().unwrap())
    }
}

#[async_trait]
impl EconomyStore for MemoryStore {
    async fn get_account(&self, user_id: &str) -> Result<Option<account::Model>> {
        Ok(self.lock()?.accounts.get(user_id).cloned())
    }

    async fn credit_account(
        &self,
        user_id: &str,
        amount: i64,
        claimed_at: i64,
    ) -> Result<account::Model> {
        let mut state = self.lock()?;
        let account = state
            .accounts
            .entry(user_id.to_string())
            .or_insert_with(|| account::Model {
                user_id: user_id.to_string(),
                balance: 0,
                last_claim: claimed_at,
            });
        account.balance += amount;
        account.last_claim = claimed_at;
        Ok(account.clone())
    }

    async fn get_card(&self, name: &str) -> Result<Option<card::Model>> {
        Ok(self.lock()?.cards.iter().find(|c| c.name == name).cloned())
    }

    async fn insert_card(&self, new_card: NewCard) -> Result<card::Model> {
        let mut state = self.lock()?;
        if state.cards.iter().any(|c| c.name == new_card.name) {
            return Err(Error::DuplicateCard {
                name: new_card.name,
            });
        }
        let card = card::Model {
            id: state.allocate_id(),
            name: new_card.name,
            image_url: new_card.image_url,
            rarity: new_card.rarity,
            value: new_card.value,
        };
        state.cards.push(card.clone());
        Ok(card)
    }

    async fn update_card(&self, card_id: i64, changes: CardChanges) -> Result<card::Model> {
        let mut state = self.lock()?;
        if let Some(name) = &changes.name {
            if state.cards.iter().any(|c| c.id != card_id && c.name == *name) {
                return Err(Error::DuplicateCard { name: name.clone() });
            }
        }
        let card = state
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| Error::CardNotFound {
                name: card_id.to_string(),
            })?;
        if let Some(name) = changes.name {
            card.name = name;
        }
        if let Some(image_url) = changes.image_url {
            card.image_url = image_url;
        }
        if let Some(rarity) = changes.rarity {
            card.rarity = rarity;
        }
        if let Some(value) = changes.value {
            card.value = value;
        }
        Ok(card.clone())
    }

    async fn list_cards(&self, limit: u64) -> Result<Vec<card::Model>> {
        let mut cards = self.lock()?.cards.clone();
        cards.sort_by(|a, b| a.name.cmp(&b.name));
        cards.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(cards)
    }

    async fn count_cards(&self) -> Result<u64> {
        Ok(self.lock()?.cards.len() as u64)
    }

    async fn search_card_names(&self, fragment: &str, limit: u64) -> Result<Vec<String>> {
        let fragment = fragment.to_lowercase();
        let mut names: Vec<String> = self
            .lock()?
            .cards
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&fragment))
            .map(|c| c.name.clone())
            .collect();
        names.sort();
        names.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(names)
    }

    async fn get_live_break(&self, name: &str) -> Result<Option<live_break::Model>> {
        Ok(self
            .lock()?
            .live_breaks
            .iter()
            .find(|b| b.name == name)
            .cloned())
    }

    async fn insert_live_break(&self, name: &str, price: i64) -> Result<live_break::Model> {
        let mut state = self.lock()?;
        let live_break = live_break::Model {
            id: state.allocate_id(),
            name: name.to_string(),
            price,
        };
        state.live_breaks.push(live_break.clone());
        Ok(live_break)
    }

    async fn update_live_break_price(
        &self,
        break_id: i64,
        price: i64,
    ) -> Result<live_break::Model> {
        let mut state = self.lock()?;
        let live_break = state
            .live_breaks
            .iter_mut()
            .find(|b| b.id == break_id)
            .ok_or_else(|| Error::LiveBreakNotFound {
                name: break_id.to_string(),
            })?;
        live_break.price = price;
        Ok(live_break.clone())
    }

    async fn list_live_breaks(&self) -> Result<Vec<live_break::Model>> {
        let mut breaks = self.lock()?.live_breaks.clone();
        breaks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(breaks)
    }

    async fn join_live_break(
        &self,
        user_id: &str,
        live_break: &live_break::Model,
    ) -> Result<live_break_entry::Model> {
        let mut state = self.lock()?;
        let balance = state.accounts.get(user_id).map(|a| a.balance);
        match balance {
            Some(balance) if balance >= live_break.price => {}
            other => {
                return Err(Error::InsufficientFunds {
                    balance: other.unwrap_or(0),
                    required: live_break.price,
                });
            }
        }
        if let Some(account) = state.accounts.get_mut(user_id) {
            account.balance -= live_break.price;
        }
        let entry = live_break_entry::Model {
            id: state.allocate_id(),
            user_id: user_id.to_string(),
            break_id: live_break.id,
            joined_at: chrono::Utc::now(),
        };
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn count_break_entries(&self, break_id: i64) -> Result<u64> {
        Ok(self
            .lock()?
            .entries
            .iter()
            .filter(|e| e.break_id == break_id)
            .count() as u64)
    }
}
