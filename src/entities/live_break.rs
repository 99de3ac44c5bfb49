//! Live break entity - A paid event users can join with coins.
//!
//! Live breaks are seeded from `config.toml` at startup.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Live break database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "live_breaks")]
pub struct Model {
    /// Unique identifier for the break
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name used to join the break
    #[sea_orm(unique)]
    pub name: String,
    /// Entry price in coins
    pub price: i64,
}

/// Defines relationships between `LiveBreak` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One break has many entries
    #[sea_orm(has_many = "super::live_break_entry::Entity")]
    Entries,
}

impl Related<super::live_break_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
