pub mod conversation;
pub mod worker;

pub use conversation::{ConversationState, RefreshOutcome, Selection};
pub use worker::BackendWorker;
