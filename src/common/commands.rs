use crate::common::types::{FeedbackKind, StaffGroup, User, VoteKind};

/// Requests the UI sends down to the backend worker.
#[derive(Debug, Clone)]
pub enum AppCommand {
    LogIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        security_question: String,
        security_answer: String,
    },
    /// First step of password recovery: look up the security question.
    FetchSecurityQuestion {
        email: String,
    },
    ResetPassword {
        email: String,
        security_answer: String,
        new_password: String,
    },
    ChangePassword {
        current_password: String,
        new_password: String,
    },
    LogOut,

    /// Open a conversation: fetch history once, then poll for growth.
    SelectConversation(User),
    DeselectConversation,
    SendMessage {
        body: String,
    },
    RefreshContacts,
    FetchAllUsers,
    FindExpert {
        category: String,
    },
    FetchStaff(StaffGroup),

    FetchQuestions,
    SearchQuestions {
        query: String,
    },
    SubmitQuestion {
        text: String,
        category: String,
    },
    EditQuestion {
        question_id: i64,
        text: String,
        category: String,
    },
    DeleteQuestion {
        question_id: i64,
    },
    CastVote {
        question_id: i64,
        kind: VoteKind,
    },
    FetchResponses {
        question_id: i64,
    },
    SubmitResponse {
        question_id: i64,
        text: String,
    },
    Subscribe {
        question_id: i64,
    },
    Unsubscribe {
        question_id: i64,
    },
    FetchSubscriptions,

    FetchMeetings,
    FetchMeetingRequests,
    ScheduleMeeting {
        target_user_id: i64,
        date: String,
        time: String,
        meeting_type: String,
    },
    AcceptMeeting {
        meeting_id: i64,
    },
    RejectMeeting {
        meeting_id: i64,
    },
    CancelMeeting {
        meeting_id: i64,
    },

    SubmitFeedback {
        kind: FeedbackKind,
        text: String,
        anonymous: bool,
    },
    FetchCategorizedFeedback,
    DeleteFeedback {
        feedback_id: i64,
    },
}
