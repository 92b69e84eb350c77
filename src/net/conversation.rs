use crate::common::types::{Message, User};

/// The currently open conversation pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub user_id: i64,
    pub partner: User,
}

/// What a refresh fetch did to the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fetched count was strictly greater; the list was replaced.
    Replaced(Vec<Message>),
    /// Equal or smaller count; the current list stays.
    Unchanged,
    /// The fetch belonged to a selection that is no longer current.
    Stale,
}

/// Poller state for the direct-message view: which conversation is open,
/// which fetches are still welcome, and the list currently displayed.
///
/// Two states: `Idle` (no selection) and `Active` (selection set). Fetch
/// results are tagged with a generation counter taken at issue time;
/// anything carrying an old generation is discarded, so a slow response
/// can never resurrect a previous partner's history.
#[derive(Debug, Default)]
pub struct ConversationState {
    selection: Option<Selection>,
    generation: u64,
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Open a conversation with `partner`. The displayed list is cleared,
    /// never merged with the previous partner's messages. Returns the new
    /// generation to tag the initial fetch with, or `None` when the
    /// partner is the user themselves.
    pub fn begin(&mut self, user_id: i64, partner: User) -> Option<u64> {
        if partner.id == user_id {
            return None;
        }
        self.generation += 1;
        self.selection = Some(Selection { user_id, partner });
        self.messages.clear();
        Some(self.generation)
    }

    /// Back to `Idle`. Outstanding fetches become stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.selection = None;
        self.messages.clear();
    }

    /// Install a freshly fetched history. Returns false when the fetch is
    /// stale (selection changed since it was issued).
    pub fn replace(&mut self, generation: u64, messages: Vec<Message>) -> bool {
        if generation != self.generation || self.selection.is_none() {
            return false;
        }
        self.messages = messages;
        true
    }

    /// Growth rule for refresh ticks: replace only when the fetched count
    /// is strictly greater than the displayed count. Edits, deletions and
    /// reorderings are invisible to this check; a concurrently shrunk
    /// history keeps the stale longer list until the count grows past it.
    pub fn apply_refresh(&mut self, generation: u64, fetched: Vec<Message>) -> RefreshOutcome {
        if generation != self.generation || self.selection.is_none() {
            return RefreshOutcome::Stale;
        }
        if fetched.len() > self.messages.len() {
            self.messages = fetched.clone();
            RefreshOutcome::Replaced(fetched)
        } else {
            RefreshOutcome::Unchanged
        }
    }

    /// Append the record the server returned for a message we just sent.
    pub fn append(&mut self, message: Message) {
        if self.selection.is_some() {
            self.messages.push(message);
        }
    }
}
