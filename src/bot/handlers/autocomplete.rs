//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions match the partial input case-insensitively anywhere in the name
//! and are capped at Discord's limit of 25 choices.

use crate::{bot::Context, store::EconomyStore};

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

/// Provides autocomplete suggestions for card names.
pub async fn autocomplete_card_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    ctx.data()
        .store
        .search_card_names(partial, MAX_SUGGESTIONS as u64)
        .await
        .unwrap_or_default()
}

/// Provides autocomplete suggestions for live break names.
pub async fn autocomplete_break_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(breaks) = ctx.data().store.list_live_breaks().await else {
        return Vec::new();
    };

    filter_names(breaks.into_iter().map(|b| b.name), partial)
}

/// Keeps names containing `partial` (case-insensitive), sorted, at most 25.
fn filter_names(names: impl Iterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = names
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .collect();
    matching.sort();
    matching.truncate(MAX_SUGGESTIONS);
    matching
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_names_case_insensitive_and_sorted() {
        let names = ["Mega Break", "friday break", "Sunday Special"]
            .into_iter()
            .map(String::from);
        assert_eq!(
            filter_names(names, "BREAK"),
            vec!["Mega Break".to_string(), "friday break".to_string()]
        );
    }

    #[test]
    fn test_filter_names_caps_suggestions() {
        let names = (0..40).map(|i| format!("Break {i:02}"));
        let matching = filter_names(names, "");
        assert_eq!(matching.len(), MAX_SUGGESTIONS);
        assert_eq!(matching[0], "Break 00");
    }
}
