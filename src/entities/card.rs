//! Card entity - A collectible card in the catalog.
//!
//! Card names are unique. Cards are created and edited by administrators and
//! are never deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Card database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    /// Unique identifier for the card
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique across the catalog (case-sensitive)
    #[sea_orm(unique)]
    pub name: String,
    /// Image shown when the card is viewed
    pub image_url: String,
    /// Free-form rarity label (e.g., "Common", "Rare")
    pub rarity: String,
    /// Value in coins
    pub value: i64,
}

/// `Card` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
