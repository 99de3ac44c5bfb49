//! Card catalog business logic - add, view, edit and list collectible cards.
//!
//! Card names are matched exactly (case-sensitive) after trimming surrounding
//! whitespace. Values are whole coins and may not be negative.

use crate::{
    entities::card,
    errors::{Error, Result},
    store::{CardChanges, EconomyStore, NewCard},
};
use tracing::{info, instrument};

/// A bounded page of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardListing {
    /// Cards shown, ordered by name
    pub cards: Vec<card::Model>,
    /// Number of cards in the whole catalog
    pub total: u64,
}

impl CardListing {
    /// Cards that exist but were left out by the limit.
    #[must_use]
    pub fn hidden(&self) -> u64 {
        self.total.saturating_sub(self.cards.len() as u64)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidCard {
            message: "Card name cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

const fn validate_value(value: i64) -> Result<i64> {
    if value < 0 {
        return Err(Error::InvalidAmount { amount: value });
    }
    Ok(value)
}

/// Adds a card to the catalog.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The value is negative
/// - A card with the same name already exists (`Error::DuplicateCard`)
/// - The database insert fails
#[instrument(skip(store, card), fields(name = %card.name))]
pub async fn add_card<S>(store: &S, card: NewCard) -> Result<card::Model>
where
    S: EconomyStore + ?Sized,
{
    let name = validate_name(&card.name)?;
    let value = validate_value(card.value)?;

    if store.get_card(&name).await?.is_some() {
        return Err(Error::DuplicateCard { name });
    }

    let created = store
        .insert_card(NewCard {
            name,
            image_url: card.image_url.trim().to_string(),
            rarity: card.rarity.trim().to_string(),
            value,
        })
        .await?;
    info!(card_id = created.id, "Card added to catalog");
    Ok(created)
}

/// Finds a card by name.
///
/// # Errors
/// Returns `Error::CardNotFound` if no card has this name, or a database error.
pub async fn view_card<S>(store: &S, name: &str) -> Result<card::Model>
where
    S: EconomyStore + ?Sized,
{
    let name = name.trim();
    store
        .get_card(name)
        .await?
        .ok_or_else(|| Error::CardNotFound {
            name: name.to_string(),
        })
}

/// Applies a partial update to the card called `name`.
///
/// Only fields present in `changes` are written; the rest keep their stored
/// values.
///
/// # Errors
/// Returns an error if:
/// - `changes` is empty (`Error::EmptyEdit`)
/// - A supplied name is empty or a supplied value is negative
/// - No card has this name (`Error::CardNotFound`)
/// - The new name belongs to another card (`Error::DuplicateCard`)
/// - The database update fails
#[instrument(skip(store, changes))]
pub async fn edit_card<S>(store: &S, name: &str, changes: CardChanges) -> Result<card::Model>
where
    S: EconomyStore + ?Sized,
{
    if changes.is_empty() {
        return Err(Error::EmptyEdit);
    }

    let changes = CardChanges {
        name: changes.name.as_deref().map(validate_name).transpose()?,
        image_url: changes.image_url.map(|url| url.trim().to_string()),
        rarity: changes.rarity.map(|rarity| rarity.trim().to_string()),
        value: changes.value.map(validate_value).transpose()?,
    };

    let existing = view_card(store, name).await?;

    if let Some(new_name) = &changes.name {
        if *new_name != existing.name && store.get_card(new_name).await?.is_some() {
            return Err(Error::DuplicateCard {
                name: new_name.clone(),
            });
        }
    }

    let updated = store.update_card(existing.id, changes).await?;
    info!(card_id = updated.id, "Card updated");
    Ok(updated)
}

/// Lists up to `limit` cards ordered by name, with the catalog total.
///
/// # Errors
/// Returns an error if a database query fails.
pub async fn list_cards<S>(store: &S, limit: u64) -> Result<CardListing>
where
    S: EconomyStore + ?Sized,
{
    let cards = store.list_cards(limit).await?;
    let total = store.count_cards().await?;
    Ok(CardListing { cards, total })
}

/// One listing line: `name - rarity (value coins)`.
#[must_use]
pub fn format_card_line(card: &card::Model) -> String {
    format!("{} - {} ({} coins)", card.name, card.rarity, card.value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_card_then_view_returns_same_fields() -> Result<()> {
        let store = setup_test_store().await?;

        let created = add_card(
            &store,
            NewCard {
                name: "Ace".to_string(),
                image_url: "https://cards.example/ace.png".to_string(),
                rarity: "Rare".to_string(),
                value: 100,
            },
        )
        .await?;

        let viewed = view_card(&store, "Ace").await?;
        assert_eq!(viewed, created);
        assert_eq!(viewed.image_url, "https://cards.example/ace.png");
        assert_eq!(viewed.rarity, "Rare");
        assert_eq!(viewed.value, 100);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_card_validation() -> Result<()> {
        let store = setup_test_store().await?;

        let empty = add_card(&store, test_card("   ")).await;
        assert!(matches!(empty, Err(Error::InvalidCard { .. })));

        let negative = add_card(
            &store,
            NewCard {
                value: -5,
                ..test_card("Ace")
            },
        )
        .await;
        assert!(matches!(negative, Err(Error::InvalidAmount { amount: -5 })));

        assert_eq!(store.count_cards().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_duplicate_card_is_refused() -> Result<()> {
        let store = setup_test_store().await?;
        add_card(&store, test_card("Ace")).await?;

        let result = add_card(&store, test_card("Ace")).await;
        assert!(matches!(result, Err(Error::DuplicateCard { name }) if name == "Ace"));

        let trimmed = add_card(&store, test_card("  Ace  ")).await;
        assert!(matches!(trimmed, Err(Error::DuplicateCard { .. })));
        assert_eq!(store.count_cards().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_view_missing_card() -> Result<()> {
        let store = setup_test_store().await?;

        let result = view_card(&store, "Ghost").await;
        assert!(matches!(result, Err(Error::CardNotFound { name }) if name == "Ghost"));
        assert_eq!(store.count_cards().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_card_partial_update() -> Result<()> {
        let store = setup_test_store().await?;
        let original = add_card(&store, test_card("Ace")).await?;

        let updated = edit_card(
            &store,
            "Ace",
            CardChanges {
                value: Some(900),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.value, 900);
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.image_url, original.image_url);
        assert_eq!(updated.rarity, original.rarity);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_card_rename() -> Result<()> {
        let store = setup_test_store().await?;
        add_card(&store, test_card("Ace")).await?;

        edit_card(
            &store,
            "Ace",
            CardChanges {
                name: Some("Ace of Spades".to_string()),
                rarity: Some("Legendary".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert!(store.get_card("Ace").await?.is_none());
        let renamed = view_card(&store, "Ace of Spades").await?;
        assert_eq!(renamed.rarity, "Legendary");
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_card_refusals() -> Result<()> {
        let store = setup_test_store().await?;
        add_card(&store, test_card("Ace")).await?;
        add_card(&store, test_card("King")).await?;

        let empty = edit_card(&store, "Ace", CardChanges::default()).await;
        assert!(matches!(empty, Err(Error::EmptyEdit)));

        let missing = edit_card(
            &store,
            "Ghost",
            CardChanges {
                value: Some(1),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(missing, Err(Error::CardNotFound { .. })));

        let clash = edit_card(
            &store,
            "King",
            CardChanges {
                name: Some("Ace".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(clash, Err(Error::DuplicateCard { .. })));

        let negative = edit_card(
            &store,
            "King",
            CardChanges {
                value: Some(-1),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(negative, Err(Error::InvalidAmount { amount: -1 })));

        let king = view_card(&store, "King").await?;
        assert_eq!(king.value, test_card("King").value);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_cards_is_capped() -> Result<()> {
        let store = setup_test_store().await?;
        for name in ["Ace", "King", "Queen"] {
            add_card(&store, test_card(name)).await?;
        }

        let listing = list_cards(&store, 2).await?;
        assert_eq!(listing.cards.len(), 2);
        assert_eq!(listing.total, 3);
        assert_eq!(listing.hidden(), 1);
        assert_eq!(
            format_card_line(&listing.cards[0]),
            "Ace - Common (10 coins)"
        );

        let empty = list_cards(&setup_test_store().await?, 2).await?;
        assert!(empty.cards.is_empty());
        assert_eq!(empty.hidden(), 0);
        Ok(())
    }
}
