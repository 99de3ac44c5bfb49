//! Live break entry entity - Records that a user paid to join a break.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Live break entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "live_break_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID of the participant
    pub user_id: String,
    /// ID of the joined break
    pub break_id: i64,
    /// When the user joined
    pub joined_at: DateTimeUtc,
}

/// Defines relationships between `LiveBreakEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one break
    #[sea_orm(
        belongs_to = "super::live_break::Entity",
        from = "Column::BreakId",
        to = "super::live_break::Column::Id"
    )]
    LiveBreak,
}

impl Related<super::live_break::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LiveBreak.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
