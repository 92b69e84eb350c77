use std::fmt;

use crate::common::types::{
    CategorizedFeedback, Meeting, MeetingRequest, Message, Question, ResponseRecord, StaffGroup,
    User,
};
use crate::session::Session;

/// What a failed backend call was trying to do. Carried on
/// [`AppEvent::RequestFailed`] so the UI can word the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    LogIn,
    SignUp,
    RecoverPassword,
    ChangePassword,
    LoadConversation,
    RefreshConversation,
    SendMessage,
    LoadContacts,
    LoadUsers,
    FindExpert,
    LoadQuestions,
    SubmitQuestion,
    UpdateQuestion,
    Vote,
    LoadResponses,
    SubmitResponse,
    UpdateSubscription,
    LoadMeetings,
    ScheduleMeeting,
    UpdateMeeting,
    SubmitFeedback,
    LoadFeedback,
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApiAction::LogIn => "log in",
            ApiAction::SignUp => "sign up",
            ApiAction::RecoverPassword => "recover password",
            ApiAction::ChangePassword => "change password",
            ApiAction::LoadConversation => "load conversation",
            ApiAction::RefreshConversation => "refresh conversation",
            ApiAction::SendMessage => "send message",
            ApiAction::LoadContacts => "load contacts",
            ApiAction::LoadUsers => "load users",
            ApiAction::FindExpert => "find an expert",
            ApiAction::LoadQuestions => "load questions",
            ApiAction::SubmitQuestion => "submit question",
            ApiAction::UpdateQuestion => "update question",
            ApiAction::Vote => "register vote",
            ApiAction::LoadResponses => "load responses",
            ApiAction::SubmitResponse => "submit response",
            ApiAction::UpdateSubscription => "update subscription",
            ApiAction::LoadMeetings => "load meetings",
            ApiAction::ScheduleMeeting => "schedule meeting",
            ApiAction::UpdateMeeting => "update meeting",
            ApiAction::SubmitFeedback => "submit feedback",
            ApiAction::LoadFeedback => "load feedback",
        };
        f.write_str(label)
    }
}

/// Notifications the backend worker sends up to the UI.
#[derive(Debug, Clone)]
pub enum AppEvent {
    LoggedIn(Session),
    LoggedOut,
    SignupComplete,
    SecurityQuestion {
        email: String,
        question: String,
    },
    PasswordResetDone,
    /// Backend acknowledgement text worth showing to the user.
    Notice(String),

    /// Initial history for a freshly selected partner. Replaces the list
    /// and scrolls to the bottom.
    ConversationLoaded {
        partner: User,
        messages: Vec<Message>,
    },
    /// A refresh tick observed growth; full replacement list.
    ConversationUpdated {
        messages: Vec<Message>,
    },
    /// The message we just posted, as recorded by the server.
    MessageSent(Message),
    ContactsLoaded(Vec<User>),
    AllUsersLoaded(Vec<User>),
    ExpertFound(User),
    StaffLoaded {
        group: StaffGroup,
        users: Vec<User>,
    },

    QuestionsLoaded(Vec<Question>),
    SubscriptionsLoaded(Vec<Question>),
    ResponsesLoaded {
        question_id: i64,
        responses: Vec<ResponseRecord>,
    },

    MeetingsLoaded(Vec<Meeting>),
    MeetingRequestsLoaded(Vec<MeetingRequest>),

    FeedbackLoaded(CategorizedFeedback),

    /// Observable failure signal; the operation itself was a no-op.
    RequestFailed {
        action: ApiAction,
        detail: String,
    },
}
