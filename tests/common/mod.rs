use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use knowledge_hub::api::{
    ApiError, ApiResult, AuthApi, DirectoryApi, FeedbackApi, ForumApi, MeetingApi, MessageApi,
};
use knowledge_hub::common::types::{
    CategorizedFeedback, FeedbackKind, Meeting, MeetingRequest, Message, Question, ResponseRecord,
    StaffGroup, User, VoteKind,
};
use knowledge_hub::common::{AppCommand, AppEvent};
use knowledge_hub::net::BackendWorker;
use knowledge_hub::session::Session;

pub const POLL: Duration = Duration::from_millis(3000);

pub fn user(id: i64) -> User {
    User {
        id,
        email: format!("user{id}@example.com"),
        role: None,
    }
}

pub fn message(id: i64) -> Message {
    Message {
        id,
        sender_id: 1,
        receiver_id: 2,
        body: format!("message {id}"),
        timestamp: "2025-03-01 10:00:00".into(),
    }
}

pub fn messages(n: i64) -> Vec<Message> {
    (1..=n).map(message).collect()
}

pub fn question(id: i64) -> Question {
    Question {
        id,
        text: format!("question {id}"),
        category: "General".into(),
        timestamp: "2025-03-01 09:00:00".into(),
        user_email: "user1@example.com".into(),
    }
}

/// Shared observable state behind the fake; tests keep one handle and the
/// worker gets another.
#[derive(Default)]
pub struct FakeState {
    // conversations
    pub histories: Mutex<VecDeque<Vec<Message>>>,
    pub conversation_log: Mutex<Vec<(i64, i64)>>,
    pub fail_conversation: AtomicBool,

    // sends
    pub sent: Mutex<Vec<(i64, i64, String)>>,
    pub fail_send: AtomicBool,

    // auth
    pub fail_login: AtomicBool,
    pub signup_calls: AtomicUsize,
    pub fail_verify_answer: AtomicBool,
    pub reset_calls: AtomicUsize,

    // directory
    pub contacts_calls: AtomicUsize,
    pub contacts: Mutex<Vec<User>>,
    pub all_users: Mutex<Vec<User>>,
    pub expert: Mutex<Option<User>>,

    // forum
    pub questions: Mutex<Vec<Question>>,
    pub questions_calls: AtomicUsize,
    pub submitted_questions: Mutex<Vec<(i64, String, String)>>,
    pub votes: Mutex<Vec<(i64, i64, VoteKind)>>,
    pub responses: Mutex<Vec<ResponseRecord>>,
    pub submitted_responses: Mutex<Vec<(i64, i64, String)>>,
    pub subscription_changes: Mutex<Vec<(i64, i64, bool)>>,

    // meetings
    pub meetings_calls: AtomicUsize,
    pub requests_calls: AtomicUsize,
    pub scheduled: Mutex<Vec<(i64, i64, String, String, String)>>,
    pub resolutions: Mutex<Vec<(i64, &'static str)>>,

    // feedback
    pub feedback_submissions: Mutex<Vec<(&'static str, String, bool, Option<i64>)>>,
}

impl FakeState {
    pub fn push_history(&self, history: Vec<Message>) {
        self.histories.lock().unwrap().push_back(history);
    }

    pub fn conversation_fetches(&self) -> Vec<(i64, i64)> {
        self.conversation_log.lock().unwrap().clone()
    }
}

/// In-memory stand-in for the REST backend.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<FakeState>,
}

impl FakeBackend {
    fn rejected(detail: &str) -> ApiError {
        ApiError::server(detail)
    }
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn log_in(&self, email: &str, _password: &str) -> ApiResult<Session> {
        if self.state.fail_login.load(Ordering::SeqCst) {
            return Err(Self::rejected("Invalid email or password"));
        }
        let user = User {
            id: 1,
            email: email.to_string(),
            role: None,
        };
        Ok(Session::new(user, Some("token".into())))
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _security_question: &str,
        _security_answer: &str,
    ) -> ApiResult<()> {
        self.state.signup_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn security_question(&self, _email: &str) -> ApiResult<String> {
        Ok("What was your first pet's name?".into())
    }

    async fn verify_security_answer(&self, _email: &str, _answer: &str) -> ApiResult<()> {
        if self.state.fail_verify_answer.load(Ordering::SeqCst) {
            return Err(Self::rejected("Incorrect answer"));
        }
        Ok(())
    }

    async fn reset_password(&self, _email: &str, _new_password: &str) -> ApiResult<()> {
        self.state.reset_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn change_password(
        &self,
        _user_id: i64,
        _current_password: &str,
        _new_password: &str,
    ) -> ApiResult<()> {
        Ok(())
    }

    fn set_bearer_token(&self, _token: Option<String>) {}
}

#[async_trait]
impl DirectoryApi for FakeBackend {
    async fn recent_contacts(&self, _user_id: i64) -> ApiResult<Vec<User>> {
        self.state.contacts_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.contacts.lock().unwrap().clone())
    }

    async fn all_users(&self) -> ApiResult<Vec<User>> {
        Ok(self.state.all_users.lock().unwrap().clone())
    }

    async fn expert_for_category(&self, _category: &str) -> ApiResult<User> {
        self.state
            .expert
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::rejected("No expert found for the selected category."))
    }

    async fn staff(&self, _group: StaffGroup) -> ApiResult<Vec<User>> {
        Ok(self.state.all_users.lock().unwrap().clone())
    }
}

#[async_trait]
impl MessageApi for FakeBackend {
    async fn conversation(&self, user_id: i64, partner_id: i64) -> ApiResult<Vec<Message>> {
        self.state
            .conversation_log
            .lock()
            .unwrap()
            .push((user_id, partner_id));
        if self.state.fail_conversation.load(Ordering::SeqCst) {
            return Err(Self::rejected("Database error"));
        }
        let mut histories = self.state.histories.lock().unwrap();
        let history = if histories.len() > 1 {
            histories.pop_front().unwrap_or_default()
        } else {
            // the last scripted history repeats
            histories.front().cloned().unwrap_or_default()
        };
        Ok(history)
    }

    async fn send_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        body: &str,
    ) -> ApiResult<Message> {
        if self.state.fail_send.load(Ordering::SeqCst) {
            return Err(Self::rejected("Database error"));
        }
        let mut sent = self.state.sent.lock().unwrap();
        sent.push((sender_id, receiver_id, body.to_string()));
        Ok(Message {
            id: 1000 + sent.len() as i64,
            sender_id,
            receiver_id,
            body: body.to_string(),
            timestamp: "2025-03-01 12:00:00".into(),
        })
    }
}

#[async_trait]
impl ForumApi for FakeBackend {
    async fn questions(&self) -> ApiResult<Vec<Question>> {
        self.state.questions_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.questions.lock().unwrap().clone())
    }

    async fn search_questions(&self, query: &str) -> ApiResult<Vec<Question>> {
        let query = query.to_lowercase();
        Ok(self
            .state
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|question| question.text.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn submit_question(&self, user_id: i64, text: &str, category: &str) -> ApiResult<i64> {
        let mut submitted = self.state.submitted_questions.lock().unwrap();
        submitted.push((user_id, text.to_string(), category.to_string()));
        Ok(500 + submitted.len() as i64)
    }

    async fn edit_question(
        &self,
        _question_id: i64,
        _user_id: i64,
        _text: &str,
        _category: &str,
    ) -> ApiResult<()> {
        Ok(())
    }

    async fn delete_question(&self, _question_id: i64) -> ApiResult<()> {
        Ok(())
    }

    async fn cast_vote(&self, question_id: i64, user_id: i64, kind: VoteKind) -> ApiResult<String> {
        self.state
            .votes
            .lock()
            .unwrap()
            .push((question_id, user_id, kind));
        Ok("Upvote processed successfully!".into())
    }

    async fn responses(&self, _question_id: i64) -> ApiResult<Vec<ResponseRecord>> {
        Ok(self.state.responses.lock().unwrap().clone())
    }

    async fn submit_response(&self, question_id: i64, user_id: i64, text: &str) -> ApiResult<i64> {
        let mut submitted = self.state.submitted_responses.lock().unwrap();
        submitted.push((question_id, user_id, text.to_string()));
        Ok(700 + submitted.len() as i64)
    }

    async fn subscribe(&self, user_id: i64, question_id: i64) -> ApiResult<()> {
        self.state
            .subscription_changes
            .lock()
            .unwrap()
            .push((user_id, question_id, true));
        Ok(())
    }

    async fn unsubscribe(&self, user_id: i64, question_id: i64) -> ApiResult<()> {
        self.state
            .subscription_changes
            .lock()
            .unwrap()
            .push((user_id, question_id, false));
        Ok(())
    }

    async fn subscriptions(&self, _user_id: i64) -> ApiResult<Vec<Question>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl MeetingApi for FakeBackend {
    async fn meetings(&self, _user_id: i64) -> ApiResult<Vec<Meeting>> {
        self.state.meetings_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn meeting_requests(&self, _user_id: i64) -> ApiResult<Vec<MeetingRequest>> {
        self.state.requests_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn schedule_meeting(
        &self,
        user_id: i64,
        target_user_id: i64,
        date: &str,
        time: &str,
        meeting_type: &str,
    ) -> ApiResult<String> {
        self.state.scheduled.lock().unwrap().push((
            user_id,
            target_user_id,
            date.to_string(),
            time.to_string(),
            meeting_type.to_string(),
        ));
        Ok(format!("Meeting scheduled on {date} at {time} ({meeting_type})."))
    }

    async fn accept_meeting(&self, meeting_id: i64) -> ApiResult<String> {
        self.state
            .resolutions
            .lock()
            .unwrap()
            .push((meeting_id, "accept"));
        Ok("Meeting accepted successfully.".into())
    }

    async fn reject_meeting(&self, meeting_id: i64) -> ApiResult<String> {
        self.state
            .resolutions
            .lock()
            .unwrap()
            .push((meeting_id, "reject"));
        Ok("Meeting rejected successfully.".into())
    }

    async fn delete_meeting(&self, meeting_id: i64) -> ApiResult<String> {
        self.state
            .resolutions
            .lock()
            .unwrap()
            .push((meeting_id, "delete"));
        Ok("Meeting deleted successfully.".into())
    }
}

#[async_trait]
impl FeedbackApi for FakeBackend {
    async fn submit_feedback(
        &self,
        kind: FeedbackKind,
        text: &str,
        anonymous: bool,
        user_id: Option<i64>,
    ) -> ApiResult<()> {
        self.state.feedback_submissions.lock().unwrap().push((
            kind.wire_name(),
            text.to_string(),
            anonymous,
            user_id,
        ));
        Ok(())
    }

    async fn categorized_feedback(&self) -> ApiResult<CategorizedFeedback> {
        Ok(CategorizedFeedback::default())
    }

    async fn delete_feedback(&self, _feedback_id: i64) -> ApiResult<()> {
        Ok(())
    }
}

/// Spawn a worker over the fake and hand back the channel ends.
pub fn spawn_worker(
    backend: FakeBackend,
    poll_interval: Duration,
) -> (
    mpsc::Sender<AppCommand>,
    mpsc::Receiver<AppEvent>,
    tokio::task::JoinHandle<()>,
) {
    let (command_sender, command_receiver) = mpsc::channel(32);
    let (event_sender, event_receiver) = mpsc::channel(64);
    let handle = tokio::spawn(
        BackendWorker::new(backend, poll_interval, event_sender, command_receiver).run(),
    );
    (command_sender, event_receiver, handle)
}

/// Let the worker task run until it has processed everything queued.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// Advance mock time one poll period at a time so every tick fires.
pub async fn advance_intervals(count: u32, period: Duration) {
    for _ in 0..count {
        tokio::time::advance(period).await;
        settle().await;
    }
}

/// Drive a login and swallow the `LoggedIn` event.
pub async fn log_in(
    commands: &mpsc::Sender<AppCommand>,
    events: &mut mpsc::Receiver<AppEvent>,
) -> Session {
    commands
        .send(AppCommand::LogIn {
            email: "user1@example.com".into(),
            password: "Passw0rdd".into(),
        })
        .await
        .expect("worker alive");
    match events.recv().await.expect("login event") {
        AppEvent::LoggedIn(session) => session,
        other => panic!("expected LoggedIn, got {other:?}"),
    }
}

/// Drain everything currently queued without advancing time.
pub fn drain_events(events: &mut mpsc::Receiver<AppEvent>) -> Vec<AppEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}
