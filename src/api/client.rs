use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiError, ApiResult};
use super::{AuthApi, DirectoryApi, FeedbackApi, ForumApi, MeetingApi, MessageApi};
use crate::common::types::{
    CategorizedFeedback, FeedbackKind, Meeting, MeetingRequest, Message, Question, ResponseRecord,
    StaffGroup, User, VoteKind,
};
use crate::session::Session;

const API_KEY_HEADER: &str = "X-API-Key";

/// Reqwest-backed client for the Knowledge Hub REST backend.
///
/// Every request carries the shared API key; routes behind login
/// additionally carry the bearer token installed after authentication.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    bearer_token: RwLock<Option<String>>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct LoginBody {
    user: User,
    #[serde(default)]
    token: Option<String>,
}

#[derive(Deserialize)]
struct CreatedBody {
    id: i64,
}

#[derive(Deserialize)]
struct AckBody {
    message: String,
}

#[derive(Deserialize)]
struct SecurityQuestionBody {
    #[serde(rename = "securityQuestion")]
    security_question: String,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            bearer_token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decorate(&self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        let token = self
            .bearer_token
            .read()
            .ok()
            .and_then(|guard| guard.clone());
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.post(self.url(path)))
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.put(self.url(path)))
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.decorate(self.http.delete(self.url(path)))
    }

    /// Map non-2xx responses to [`ApiError::Status`], pulling the backend's
    /// `error` field out of the body when present.
    async fn checked(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request rejected")
                    .to_string()
            });
        Err(ApiError::Status { status, detail })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = Self::checked(self.get(path).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn post_ack(&self, path: &str, body: serde_json::Value) -> ApiResult<String> {
        let response = Self::checked(self.post(path).json(&body).send().await?).await?;
        Ok(response.json::<AckBody>().await?.message)
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn log_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        let payload = json!({
            "email": email.trim().to_lowercase(),
            "password": password,
        });
        let response = Self::checked(self.post("/login").json(&payload).send().await?).await?;
        let body: LoginBody = response.json().await?;
        self.set_bearer_token(body.token.clone());
        Ok(Session::new(body.user, body.token))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        security_question: &str,
        security_answer: &str,
    ) -> ApiResult<()> {
        let payload = json!({
            "email": email.trim().to_lowercase(),
            "password": password,
            "securityQuestion": security_question,
            "securityQuestionAnswer": security_answer,
        });
        Self::checked(self.post("/signup").json(&payload).send().await?).await?;
        Ok(())
    }

    async fn security_question(&self, email: &str) -> ApiResult<String> {
        let payload = json!({ "email": email.trim().to_lowercase() });
        let response = Self::checked(self.post("/recover").json(&payload).send().await?).await?;
        let body: SecurityQuestionBody = response.json().await?;
        Ok(body.security_question)
    }

    async fn verify_security_answer(&self, email: &str, answer: &str) -> ApiResult<()> {
        let payload = json!({
            "email": email.trim().to_lowercase(),
            "securityQuestionAnswer": answer,
        });
        Self::checked(self.post("/verify_answer").json(&payload).send().await?).await?;
        Ok(())
    }

    async fn reset_password(&self, email: &str, new_password: &str) -> ApiResult<()> {
        let payload = json!({
            "email": email.trim().to_lowercase(),
            "newPassword": new_password,
        });
        Self::checked(self.post("/reset_password").json(&payload).send().await?).await?;
        Ok(())
    }

    async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> ApiResult<()> {
        let payload = json!({
            "userId": user_id,
            "currentPassword": current_password,
            "newPassword": new_password,
        });
        Self::checked(self.post("/change-password").json(&payload).send().await?).await?;
        Ok(())
    }

    fn set_bearer_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.bearer_token.write() {
            *guard = token;
        }
    }
}

#[async_trait]
impl DirectoryApi for ApiClient {
    async fn recent_contacts(&self, user_id: i64) -> ApiResult<Vec<User>> {
        self.get_json(&format!("/users/{user_id}")).await
    }

    async fn all_users(&self) -> ApiResult<Vec<User>> {
        self.get_json("/all-users").await
    }

    async fn expert_for_category(&self, category: &str) -> ApiResult<User> {
        self.get_json(&format!("/experts/{}", category.to_lowercase()))
            .await
    }

    async fn staff(&self, group: StaffGroup) -> ApiResult<Vec<User>> {
        self.get_json(&format!("/users/{}", group.route_segment()))
            .await
    }
}

#[async_trait]
impl MessageApi for ApiClient {
    async fn conversation(&self, user_id: i64, partner_id: i64) -> ApiResult<Vec<Message>> {
        self.get_json(&format!("/messages/{user_id}/{partner_id}"))
            .await
    }

    async fn send_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        body: &str,
    ) -> ApiResult<Message> {
        let payload = json!({
            "sender_id": sender_id,
            "receiver_id": receiver_id,
            "message": body,
        });
        let response = Self::checked(self.post("/messages").json(&payload).send().await?).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ForumApi for ApiClient {
    async fn questions(&self) -> ApiResult<Vec<Question>> {
        self.get_json("/questions").await
    }

    async fn search_questions(&self, query: &str) -> ApiResult<Vec<Question>> {
        let payload = json!({ "query": query });
        let response = Self::checked(
            self.post("/questions/search")
                .json(&payload)
                .send()
                .await?,
        )
        .await?;
        Ok(response.json().await?)
    }

    async fn submit_question(&self, user_id: i64, text: &str, category: &str) -> ApiResult<i64> {
        let payload = json!({
            "userId": user_id,
            "question": text,
            "category": category,
        });
        let response = Self::checked(self.post("/questions").json(&payload).send().await?).await?;
        Ok(response.json::<CreatedBody>().await?.id)
    }

    async fn edit_question(
        &self,
        question_id: i64,
        user_id: i64,
        text: &str,
        category: &str,
    ) -> ApiResult<()> {
        let payload = json!({
            "question": text,
            "category": category,
            "user_id": user_id,
        });
        Self::checked(
            self.put(&format!("/questions/{question_id}"))
                .json(&payload)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    async fn delete_question(&self, question_id: i64) -> ApiResult<()> {
        Self::checked(
            self.delete(&format!("/questions/{question_id}"))
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    async fn cast_vote(&self, question_id: i64, user_id: i64, kind: VoteKind) -> ApiResult<String> {
        let path = format!("/questions/{}/{}", question_id, kind.route_segment());
        self.post_ack(&path, json!({ "user_id": user_id })).await
    }

    async fn responses(&self, question_id: i64) -> ApiResult<Vec<ResponseRecord>> {
        self.get_json(&format!("/questions/{question_id}/responses"))
            .await
    }

    async fn submit_response(&self, question_id: i64, user_id: i64, text: &str) -> ApiResult<i64> {
        let payload = json!({
            "question_id": question_id,
            "user_id": user_id,
            "response": text,
        });
        let response = Self::checked(self.post("/responses").json(&payload).send().await?).await?;
        Ok(response.json::<CreatedBody>().await?.id)
    }

    async fn subscribe(&self, user_id: i64, question_id: i64) -> ApiResult<()> {
        let payload = json!({ "user_id": user_id, "question_id": question_id });
        Self::checked(self.post("/subscriptions").json(&payload).send().await?).await?;
        Ok(())
    }

    async fn unsubscribe(&self, user_id: i64, question_id: i64) -> ApiResult<()> {
        let payload = json!({ "user_id": user_id, "question_id": question_id });
        Self::checked(self.delete("/subscriptions").json(&payload).send().await?).await?;
        Ok(())
    }

    async fn subscriptions(&self, user_id: i64) -> ApiResult<Vec<Question>> {
        self.get_json(&format!("/users/{user_id}/subscriptions"))
            .await
    }
}

#[async_trait]
impl MeetingApi for ApiClient {
    async fn meetings(&self, user_id: i64) -> ApiResult<Vec<Meeting>> {
        self.get_json(&format!("/meetings/{user_id}")).await
    }

    async fn meeting_requests(&self, user_id: i64) -> ApiResult<Vec<MeetingRequest>> {
        self.get_json(&format!("/meeting-requests/{user_id}")).await
    }

    async fn schedule_meeting(
        &self,
        user_id: i64,
        target_user_id: i64,
        date: &str,
        time: &str,
        meeting_type: &str,
    ) -> ApiResult<String> {
        let payload = json!({
            "user_id": user_id,
            "target_user_id": target_user_id,
            "date": date,
            "time": time,
            "meeting_type": meeting_type,
        });
        self.post_ack("/schedule-meeting", payload).await
    }

    async fn accept_meeting(&self, meeting_id: i64) -> ApiResult<String> {
        self.post_ack("/accept-meeting", json!({ "meeting_id": meeting_id }))
            .await
    }

    async fn reject_meeting(&self, meeting_id: i64) -> ApiResult<String> {
        self.post_ack("/reject-meeting", json!({ "meeting_id": meeting_id }))
            .await
    }

    async fn delete_meeting(&self, meeting_id: i64) -> ApiResult<String> {
        self.post_ack("/delete-meeting", json!({ "meeting_id": meeting_id }))
            .await
    }
}

#[async_trait]
impl FeedbackApi for ApiClient {
    async fn submit_feedback(
        &self,
        kind: FeedbackKind,
        text: &str,
        anonymous: bool,
        user_id: Option<i64>,
    ) -> ApiResult<()> {
        let payload = json!({
            "type": kind.wire_name(),
            "text": text,
            "anonymous": anonymous,
            "userId": user_id,
        });
        Self::checked(self.post("/feedback").json(&payload).send().await?).await?;
        Ok(())
    }

    async fn categorized_feedback(&self) -> ApiResult<CategorizedFeedback> {
        self.get_json("/feedback/categorized").await
    }

    async fn delete_feedback(&self, feedback_id: i64) -> ApiResult<()> {
        Self::checked(
            self.delete(&format!("/feedback/{feedback_id}"))
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}
