//! Domain types for the to-do widget.
//!
//! The widget keeps a list of created items, the text currently typed into
//! the input, and the text of the creation call in flight (if any).

use serde::{Deserialize, Serialize};
use todo_widget_macros::Action;

/// Identifier assigned to an item by the creation service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a raw identifier
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A created to-do item, as returned by the creation service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Service-assigned identifier
    pub id: ItemId,
    /// Text of the item
    pub text: String,
}

impl Item {
    /// Creates an item
    #[must_use]
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// State of the widget
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Current contents of the input
    pub draft: String,
    /// Created items, in the order their creation calls resolved
    pub items: Vec<Item>,
    /// Text of the creation call in flight
    pub pending: Option<String>,
    /// Message shown to the user after a rejected or failed submission
    pub last_error: Option<String>,
}

impl TodoState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordinal the next created item will get (1-based)
    #[must_use]
    pub fn next_ordinal(&self) -> usize {
        self.items.len() + 1
    }

    /// Label of the submit button
    #[must_use]
    pub fn submit_label(&self) -> String {
        format!("Add #{}", self.next_ordinal())
    }

    /// Whether a creation call is in flight
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Actions representing commands and events for the widget
///
/// Commands come from the user. Events are the outcome of a command: either
/// the reducer's own verdict or the resolved creation call.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: The input changed
    #[command]
    DraftChanged {
        /// Full new contents of the input
        value: String,
    },

    /// Command: The submit button was pressed
    #[command]
    Submit,

    // ========== Events ==========
    /// Event: The creation call resolved
    #[event]
    ItemCreated {
        /// The item returned by the service
        item: Item,
    },

    /// Event: The creation call failed
    #[event]
    CreateFailed {
        /// What went wrong
        error: String,
    },

    /// Event: A submission was refused without calling the service
    #[event]
    SubmissionRejected {
        /// Why it was refused
        reason: String,
    },
}
