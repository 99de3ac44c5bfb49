//! Core business logic - framework-agnostic economy, catalog and dispatch rules.
//!
//! Nothing in here knows about Discord. Handlers take an [`EconomyStore`] and
//! plain values, and the dispatcher turns a [`command::CommandEvent`] into a
//! [`command::Reply`].
//!
//! [`EconomyStore`]: crate::store::EconomyStore

/// Card catalog rules (add, view, edit, list)
pub mod catalog;
/// Inbound command events, typed commands and outbound replies
pub mod command;
/// Name-based routing, authorization gate and reply rendering
pub mod dispatch;
/// Coin claims and balances
pub mod ledger;
/// Live break seeding, joining and listing
pub mod live_break;
