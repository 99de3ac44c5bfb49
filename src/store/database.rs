//! `SeaORM`-backed [`EconomyStore`].
//!
//! Balance changes are applied with `balance = balance ± amount` expressions
//! rather than writing back a value read earlier, and the committed row is
//! re-read before being returned.

use super::{CardChanges, EconomyStore, NewCard};
use crate::{
    entities::{
        Account, Card, LiveBreak, LiveBreakEntry, account, card, live_break, live_break_entry,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, instrument};

/// Store over a `SeaORM` database connection.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Wraps an open connection. Tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Maps a unique-constraint violation on a card name to `Error::DuplicateCard`.
fn card_write_error(err: DbErr, name: &str) -> Error {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        Error::DuplicateCard {
            name: name.to_string(),
        }
    } else {
        err.into()
    }
}

#[async_trait]
impl EconomyStore for SeaOrmStore {
    async fn get_account(&self, user_id: &str) -> Result<Option<account::Model>> {
        Account::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn credit_account(
        &self,
        user_id: &str,
        amount: i64,
        claimed_at: i64,
    ) -> Result<account::Model> {
        let txn = self.db.begin().await?;

        let existing = Account::find_by_id(user_id.to_string()).one(&txn).await?;
        if existing.is_some() {
            Account::update_many()
                .col_expr(
                    account::Column::Balance,
                    Expr::col(account::Column::Balance).add(amount),
                )
                .col_expr(account::Column::LastClaim, Expr::value(claimed_at))
                .filter(account::Column::UserId.eq(user_id))
                .exec(&txn)
                .await?;
        } else {
            debug!("Creating account for {user_id}");
            account::ActiveModel {
                user_id: Set(user_id.to_string()),
                balance: Set(amount),
                last_claim: Set(claimed_at),
            }
            .insert(&txn)
            .await?;
        }

        let account = Account::find_by_id(user_id.to_string())
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("account {user_id}")))?;

        txn.commit().await?;
        Ok(account)
    }

    async fn get_card(&self, name: &str) -> Result<Option<card::Model>> {
        Card::find()
            .filter(card::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn insert_card(&self, new_card: NewCard) -> Result<card::Model> {
        let name = new_card.name.clone();
        card::ActiveModel {
            name: Set(new_card.name),
            image_url: Set(new_card.image_url),
            rarity: Set(new_card.rarity),
            value: Set(new_card.value),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| card_write_error(e, &name))
    }

    async fn update_card(&self, card_id: i64, changes: CardChanges) -> Result<card::Model> {
        let existing = Card::find_by_id(card_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::CardNotFound {
                name: card_id.to_string(),
            })?;

        let target_name = changes.name.clone().unwrap_or_else(|| existing.name.clone());
        let mut active: card::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(rarity) = changes.rarity {
            active.rarity = Set(rarity);
        }
        if let Some(value) = changes.value {
            active.value = Set(value);
        }

        active
            .update(&self.db)
            .await
            .map_err(|e| card_write_error(e, &target_name))
    }

    async fn list_cards(&self, limit: u64) -> Result<Vec<card::Model>> {
        Card::find()
            .order_by_asc(card::Column::Name)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn count_cards(&self) -> Result<u64> {
        Card::find().count(&self.db).await.map_err(Into::into)
    }

    async fn search_card_names(&self, fragment: &str, limit: u64) -> Result<Vec<String>> {
        let cards = Card::find()
            .filter(card::Column::Name.contains(fragment))
            .order_by_asc(card::Column::Name)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(cards.into_iter().map(|c| c.name).collect())
    }

    async fn get_live_break(&self, name: &str) -> Result<Option<live_break::Model>> {
        LiveBreak::find()
            .filter(live_break::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn insert_live_break(&self, name: &str, price: i64) -> Result<live_break::Model> {
        live_break::ActiveModel {
            name: Set(name.to_string()),
            price: Set(price),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(Into::into)
    }

    async fn update_live_break_price(
        &self,
        break_id: i64,
        price: i64,
    ) -> Result<live_break::Model> {
        let existing = LiveBreak::find_by_id(break_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::LiveBreakNotFound {
                name: break_id.to_string(),
            })?;

        let mut active: live_break::ActiveModel = existing.into();
        active.price = Set(price);
        active.update(&self.db).await.map_err(Into::into)
    }

    async fn list_live_breaks(&self) -> Result<Vec<live_break::Model>> {
        LiveBreak::find()
            .order_by_asc(live_break::Column::Name)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self, live_break), fields(break_id = live_break.id))]
    async fn join_live_break(
        &self,
        user_id: &str,
        live_break: &live_break::Model,
    ) -> Result<live_break_entry::Model> {
        let txn = self.db.begin().await?;

        // Dropping `txn` on an early return rolls it back.
        let balance = Account::find_by_id(user_id.to_string())
            .one(&txn)
            .await?
            .map(|account| account.balance);
        match balance {
            Some(balance) if balance >= live_break.price => {}
            other => {
                return Err(Error::InsufficientFunds {
                    balance: other.unwrap_or(0),
                    required: live_break.price,
                });
            }
        }

        Account::update_many()
            .col_expr(
                account::Column::Balance,
                Expr::col(account::Column::Balance).sub(live_break.price),
            )
            .filter(account::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        let entry = live_break_entry::ActiveModel {
            user_id: Set(user_id.to_string()),
            break_id: Set(live_break.id),
            joined_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(entry)
    }

    async fn count_break_entries(&self, break_id: i64) -> Result<u64> {
        LiveBreakEntry::find()
            .filter(live_break_entry::Column::BreakId.eq(break_id))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }
}
