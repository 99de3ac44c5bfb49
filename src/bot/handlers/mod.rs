//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete
//! and the translation between poise contexts and core command events.

/// Autocomplete handlers for card and live break names
pub mod autocomplete;
/// Builds command events from poise contexts and sends replies
pub mod respond;
