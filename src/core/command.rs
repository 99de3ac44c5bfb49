//! Inbound command events, typed commands and outbound replies.
//!
//! A [`CommandEvent`] is what the gateway adapter hands to the core: a command
//! name, the caller, their option values and capabilities. [`Command::from_event`]
//! decodes it by name; a [`Reply`] is what goes back.

use crate::{
    errors::{Error, Result},
    store::{CardChanges, NewCard},
};
use std::collections::{HashMap, HashSet};

/// Embed color used for card displays (Discord blurple)
pub const EMBED_COLOR: u32 = 0x0058_65F2;

/// A permission attached to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Guild administrator
    Administrator,
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// String option
    Text(String),
    /// Integer option
    Integer(i64),
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// An inbound command as delivered by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    /// Command name, e.g. `claim`
    pub name: String,
    /// Platform user ID of the caller
    pub caller_id: String,
    /// Supplied options by name
    pub args: HashMap<String, ArgValue>,
    /// Capabilities the caller holds
    pub capabilities: HashSet<Capability>,
}

impl CommandEvent {
    /// Creates an event with no options and no capabilities.
    #[must_use]
    pub fn new(name: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            caller_id: caller_id.into(),
            args: HashMap::new(),
            capabilities: HashSet::new(),
        }
    }

    /// Adds an option value.
    #[must_use]
    pub fn with_arg(mut self, name: &str, value: impl Into<ArgValue>) -> Self {
        self.args.insert(name.to_string(), value.into());
        self
    }

    /// Adds an option value when one was supplied.
    #[must_use]
    pub fn with_optional_arg<V: Into<ArgValue>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with_arg(name, value),
            None => self,
        }
    }

    /// Replaces the caller's capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: HashSet<Capability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// True if the caller holds `capability`.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn text(&self, name: &str) -> Result<Option<String>> {
        match self.args.get(name) {
            None => Ok(None),
            Some(ArgValue::Text(value)) => Ok(Some(value.clone())),
            Some(ArgValue::Integer(_)) => Err(missing(name)),
        }
    }

    fn integer(&self, name: &str) -> Result<Option<i64>> {
        match self.args.get(name) {
            None => Ok(None),
            Some(ArgValue::Integer(value)) => Ok(Some(*value)),
            Some(ArgValue::Text(_)) => Err(missing(name)),
        }
    }

    fn required_text(&self, name: &str) -> Result<String> {
        self.text(name)?.ok_or_else(|| missing(name))
    }

    fn required_integer(&self, name: &str) -> Result<i64> {
        self.integer(name)?.ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> Error {
    Error::MissingArgument {
        name: name.to_string(),
    }
}

/// A decoded command with typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Health check
    Ping,
    /// Lists available commands
    Help,
    /// Claims the periodic coin reward
    Claim,
    /// Shows the caller's balance
    Balance,
    /// Pays to join a live break
    JoinBreak {
        /// Name of the break
        break_name: String,
    },
    /// Lists live breaks
    Breaks,
    /// Adds a card to the catalog
    AddCard(NewCard),
    /// Shows one card
    ViewCard {
        /// Card name
        name: String,
    },
    /// Partially updates a card
    EditCard {
        /// Current card name
        name: String,
        /// Fields to change
        changes: CardChanges,
    },
    /// Lists the catalog, one line per card
    DebugCards,
}

impl Command {
    /// Decodes an event by its name.
    ///
    /// Returns `None` for names no handler exists for.
    ///
    /// # Errors
    /// The inner result is `Error::MissingArgument` when a required option is
    /// absent or an option has the wrong type.
    #[must_use]
    pub fn from_event(event: &CommandEvent) -> Option<Result<Self>> {
        let command = match event.name.as_str() {
            "ping" => Ok(Self::Ping),
            "help" => Ok(Self::Help),
            "claim" => Ok(Self::Claim),
            "balance" => Ok(Self::Balance),
            "joinbreak" => event
                .required_text("break_name")
                .map(|break_name| Self::JoinBreak { break_name }),
            "breaks" => Ok(Self::Breaks),
            "addcard" => Self::decode_add_card(event),
            "viewcard" => event.required_text("name").map(|name| Self::ViewCard { name }),
            "editcard" => Self::decode_edit_card(event),
            "debugcards" => Ok(Self::DebugCards),
            _ => return None,
        };
        Some(command)
    }

    fn decode_add_card(event: &CommandEvent) -> Result<Self> {
        Ok(Self::AddCard(NewCard {
            name: event.required_text("name")?,
            image_url: event.required_text("image")?,
            rarity: event.required_text("rarity")?,
            value: event.required_integer("value")?,
        }))
    }

    fn decode_edit_card(event: &CommandEvent) -> Result<Self> {
        Ok(Self::EditCard {
            name: event.required_text("name")?,
            changes: CardChanges {
                name: event.text("new_name")?,
                image_url: event.text("image")?,
                rarity: event.text("rarity")?,
                value: event.integer("value")?,
            },
        })
    }

    /// The capability a caller needs before this command's handler may run.
    #[must_use]
    pub const fn required_capability(&self) -> Option<Capability> {
        match self {
            Self::AddCard(_) | Self::EditCard { .. } => Some(Capability::Administrator),
            _ => None,
        }
    }
}

/// The single response to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain message
    Text {
        /// Message body
        content: String,
        /// Visible only to the caller
        ephemeral: bool,
    },
    /// Structured display
    Embed {
        /// Embed title
        title: String,
        /// Embed body
        description: String,
        /// Image shown in the embed
        image_url: Option<String>,
        /// Side bar color
        color: u32,
    },
}

impl Reply {
    /// A public text reply.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            ephemeral: false,
        }
    }

    /// A text reply only the caller can see.
    #[must_use]
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            ephemeral: true,
        }
    }
}
