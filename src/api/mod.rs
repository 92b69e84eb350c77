//! REST access to the Knowledge Hub backend.
//!
//! The worker talks to the backend through the capability traits below so
//! tests can substitute an in-memory fake for the wire client.

pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::common::types::{
    CategorizedFeedback, FeedbackKind, Meeting, MeetingRequest, Message, Question, ResponseRecord,
    StaffGroup, User, VoteKind,
};
use crate::session::Session;
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};

#[async_trait]
pub trait AuthApi {
    async fn log_in(&self, email: &str, password: &str) -> ApiResult<Session>;
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        security_question: &str,
        security_answer: &str,
    ) -> ApiResult<()>;
    async fn security_question(&self, email: &str) -> ApiResult<String>;
    async fn verify_security_answer(&self, email: &str, answer: &str) -> ApiResult<()>;
    async fn reset_password(&self, email: &str, new_password: &str) -> ApiResult<()>;
    async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> ApiResult<()>;

    /// Install or clear the bearer token attached to authenticated routes.
    fn set_bearer_token(&self, token: Option<String>);
}

#[async_trait]
pub trait DirectoryApi {
    /// Users who already share a conversation with `user_id`, most recent
    /// first.
    async fn recent_contacts(&self, user_id: i64) -> ApiResult<Vec<User>>;
    async fn all_users(&self) -> ApiResult<Vec<User>>;
    async fn expert_for_category(&self, category: &str) -> ApiResult<User>;
    async fn staff(&self, group: StaffGroup) -> ApiResult<Vec<User>>;
}

#[async_trait]
pub trait MessageApi {
    /// Full two-party history, oldest first. Server order is trusted as-is.
    async fn conversation(&self, user_id: i64, partner_id: i64) -> ApiResult<Vec<Message>>;
    /// Post a message; returns the record with server-assigned id and
    /// timestamp.
    async fn send_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        body: &str,
    ) -> ApiResult<Message>;
}

#[async_trait]
pub trait ForumApi {
    async fn questions(&self) -> ApiResult<Vec<Question>>;
    async fn search_questions(&self, query: &str) -> ApiResult<Vec<Question>>;
    async fn submit_question(&self, user_id: i64, text: &str, category: &str) -> ApiResult<i64>;
    async fn edit_question(
        &self,
        question_id: i64,
        user_id: i64,
        text: &str,
        category: &str,
    ) -> ApiResult<()>;
    async fn delete_question(&self, question_id: i64) -> ApiResult<()>;
    async fn cast_vote(&self, question_id: i64, user_id: i64, kind: VoteKind) -> ApiResult<String>;
    async fn responses(&self, question_id: i64) -> ApiResult<Vec<ResponseRecord>>;
    async fn submit_response(&self, question_id: i64, user_id: i64, text: &str) -> ApiResult<i64>;
    async fn subscribe(&self, user_id: i64, question_id: i64) -> ApiResult<()>;
    async fn unsubscribe(&self, user_id: i64, question_id: i64) -> ApiResult<()>;
    async fn subscriptions(&self, user_id: i64) -> ApiResult<Vec<Question>>;
}

#[async_trait]
pub trait MeetingApi {
    async fn meetings(&self, user_id: i64) -> ApiResult<Vec<Meeting>>;
    async fn meeting_requests(&self, user_id: i64) -> ApiResult<Vec<MeetingRequest>>;
    async fn schedule_meeting(
        &self,
        user_id: i64,
        target_user_id: i64,
        date: &str,
        time: &str,
        meeting_type: &str,
    ) -> ApiResult<String>;
    async fn accept_meeting(&self, meeting_id: i64) -> ApiResult<String>;
    async fn reject_meeting(&self, meeting_id: i64) -> ApiResult<String>;
    async fn delete_meeting(&self, meeting_id: i64) -> ApiResult<String>;
}

#[async_trait]
pub trait FeedbackApi {
    async fn submit_feedback(
        &self,
        kind: FeedbackKind,
        text: &str,
        anonymous: bool,
        user_id: Option<i64>,
    ) -> ApiResult<()>;
    async fn categorized_feedback(&self) -> ApiResult<CategorizedFeedback>;
    async fn delete_feedback(&self, feedback_id: i64) -> ApiResult<()>;
}

/// Everything the worker needs from the backend, in one bound.
pub trait BackendApi:
    AuthApi + DirectoryApi + MessageApi + ForumApi + MeetingApi + FeedbackApi + Send + Sync
{
}

impl<T> BackendApi for T where
    T: AuthApi + DirectoryApi + MessageApi + ForumApi + MeetingApi + FeedbackApi + Send + Sync
{
}
