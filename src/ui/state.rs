use crate::common::types::{
    CategorizedFeedback, FeedbackKind, Meeting, MeetingRequest, Message, Question, ResponseRecord,
    StaffGroup, User,
};
use crate::common::AppEvent;
use crate::session::Session;

/// Which main view the tab strip shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainView {
    Messages,
    Forum,
    Meetings,
}

/// Which pre-login form is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthView {
    LogIn,
    SignUp,
    Recover,
}

/// Everything the UI displays. Mutated only on the UI thread: by widgets
/// editing their bound fields, and by [`AppState::apply_event`] folding in
/// worker events. No network state lives here.
pub struct AppState {
    // auth
    pub session: Option<Session>,
    pub auth_view: AuthView,
    pub email_input: String,
    pub password_input: String,
    pub show_password: bool,
    pub security_question_input: String,
    pub security_answer_input: String,
    pub new_password_input: String,
    pub recovery_question: Option<String>,
    pub auth_notice: Option<String>,

    // navigation
    pub view: MainView,

    // direct messages
    pub contacts: Vec<User>,
    pub all_users: Vec<User>,
    pub partner: Option<User>,
    pub messages: Vec<Message>,
    pub draft: String,
    /// One pending scroll-to-bottom, consumed by the chat area on the next
    /// frame. Set once per list replacement or append.
    pub scroll_pending: bool,
    pub contact_search: String,
    pub new_chat_search: String,
    pub expert_category: String,
    /// Partner the UI should open a conversation with (e.g. a located
    /// expert); the app loop turns this into a command.
    pub pending_chat: Option<User>,

    // forum
    pub questions: Vec<Question>,
    pub question_search: String,
    pub new_question: String,
    pub new_question_category: String,
    pub open_question: Option<i64>,
    pub responses: Vec<ResponseRecord>,
    pub new_response: String,
    pub subscriptions: Vec<Question>,

    // meetings
    pub meetings: Vec<Meeting>,
    pub meeting_requests: Vec<MeetingRequest>,
    pub meeting_date: String,
    pub meeting_time: String,
    pub meeting_type: String,
    pub meeting_target: Option<User>,

    // feedback
    pub feedback_open: bool,
    pub feedback_kind: FeedbackKind,
    pub feedback_text: String,
    pub feedback_anonymous: bool,
    pub admin_feedback: Option<CategorizedFeedback>,
    pub staff: Option<(StaffGroup, Vec<User>)>,

    // status line
    pub notice: Option<String>,
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: None,
            auth_view: AuthView::LogIn,
            email_input: String::new(),
            password_input: String::new(),
            show_password: false,
            security_question_input: String::new(),
            security_answer_input: String::new(),
            new_password_input: String::new(),
            recovery_question: None,
            auth_notice: None,

            view: MainView::Messages,

            contacts: Vec::new(),
            all_users: Vec::new(),
            partner: None,
            messages: Vec::new(),
            draft: String::new(),
            scroll_pending: false,
            contact_search: String::new(),
            new_chat_search: String::new(),
            expert_category: String::new(),
            pending_chat: None,

            questions: Vec::new(),
            question_search: String::new(),
            new_question: String::new(),
            new_question_category: "General".to_string(),
            open_question: None,
            responses: Vec::new(),
            new_response: String::new(),
            subscriptions: Vec::new(),

            meetings: Vec::new(),
            meeting_requests: Vec::new(),
            meeting_date: String::new(),
            meeting_time: String::new(),
            meeting_type: "in-person".to_string(),
            meeting_target: None,

            feedback_open: false,
            feedback_kind: FeedbackKind::Voice,
            feedback_text: String::new(),
            feedback_anonymous: false,
            admin_feedback: None,
            staff: None,

            notice: None,
            last_error: None,
        }
    }

    /// Current user id, when logged in.
    pub fn user_id(&self) -> Option<i64> {
        self.session.as_ref().map(Session::user_id)
    }

    /// Fold one worker event into display state.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoggedIn(session) => {
                self.session = Some(session);
                self.password_input.clear();
                self.auth_notice = None;
                self.view = MainView::Messages;
            }
            AppEvent::LoggedOut => {
                // back to a clean login screen; nothing survives the session
                *self = AppState::new();
            }
            AppEvent::SignupComplete => {
                self.auth_view = AuthView::LogIn;
                self.password_input.clear();
                self.auth_notice = Some("Account created. You can now log in.".into());
            }
            AppEvent::SecurityQuestion { question, .. } => {
                self.recovery_question = Some(question);
            }
            AppEvent::PasswordResetDone => {
                self.auth_view = AuthView::LogIn;
                self.new_password_input.clear();
                self.security_answer_input.clear();
                self.recovery_question = None;
                self.auth_notice = Some("Password reset successfully! You can now log in.".into());
            }
            AppEvent::Notice(text) => self.notice = Some(text),

            AppEvent::ConversationLoaded { partner, messages } => {
                self.partner = Some(partner);
                self.messages = messages;
                self.scroll_pending = true;
            }
            AppEvent::ConversationUpdated { messages } => {
                self.messages = messages;
                self.scroll_pending = true;
            }
            AppEvent::MessageSent(message) => {
                self.messages.push(message);
                self.draft.clear();
                self.scroll_pending = true;
            }
            AppEvent::ContactsLoaded(users) => self.contacts = users,
            AppEvent::AllUsersLoaded(users) => self.all_users = users,
            AppEvent::ExpertFound(expert) => {
                self.view = MainView::Messages;
                self.pending_chat = Some(expert);
            }
            AppEvent::StaffLoaded { group, users } => self.staff = Some((group, users)),

            AppEvent::QuestionsLoaded(questions) => self.questions = questions,
            AppEvent::SubscriptionsLoaded(questions) => self.subscriptions = questions,
            AppEvent::ResponsesLoaded {
                question_id,
                responses,
            } => {
                if self.open_question == Some(question_id) {
                    self.responses = responses;
                    self.new_response.clear();
                }
            }

            AppEvent::MeetingsLoaded(meetings) => self.meetings = meetings,
            AppEvent::MeetingRequestsLoaded(requests) => self.meeting_requests = requests,

            AppEvent::FeedbackLoaded(feedback) => self.admin_feedback = Some(feedback),

            AppEvent::RequestFailed { action, detail } => {
                self.last_error = Some(format!("Could not {action}: {detail}"));
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
