//! Account entity - One row per Discord user who has ever claimed coins.
//!
//! The row is created by the first successful claim. Balance queries for users
//! without a row read as zero and never create one.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Discord user ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Coin balance, never negative
    pub balance: i64,
    /// Milliseconds since the Unix epoch of the last successful claim
    pub last_claim: i64,
}

/// Accounts reference live break entries only through `user_id`, with no declared relation
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
