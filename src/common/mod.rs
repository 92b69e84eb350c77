pub mod commands;
pub mod events;
pub mod types;

pub use commands::AppCommand;
pub use events::{ApiAction, AppEvent};
pub use types::{
    CategorizedFeedback, FeedbackItem, FeedbackKind, Meeting, MeetingRequest, Message, Question,
    ResponseRecord, StaffGroup, User, VoteKind,
};
