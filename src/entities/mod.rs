//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod account;
pub mod card;
pub mod live_break;
pub mod live_break_entry;

// Re-export specific types to avoid conflicts
pub use account::{Column as AccountColumn, Entity as Account, Model as AccountModel};
pub use card::{Column as CardColumn, Entity as Card, Model as CardModel};
pub use live_break::{Column as LiveBreakColumn, Entity as LiveBreak, Model as LiveBreakModel};
pub use live_break_entry::{
    Column as LiveBreakEntryColumn, Entity as LiveBreakEntry, Model as LiveBreakEntryModel,
};
