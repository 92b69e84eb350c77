use serde::{Deserialize, Serialize};

/// Account record as returned by the backend directory routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Direct message between two users. Immutable once created; `id` and
/// `timestamp` are assigned by the server. The body travels under the wire
/// name `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    #[serde(rename = "message")]
    pub body: String,
    pub timestamp: String,
}

/// Forum question. The question text travels under the wire name `question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    #[serde(rename = "question")]
    pub text: String,
    pub category: String,
    pub timestamp: String,
    pub user_email: String,
}

/// A response posted under a forum question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub id: i64,
    #[serde(rename = "response")]
    pub text: String,
    pub timestamp: String,
    pub user_email: String,
}

/// Scheduled or pending meeting as seen by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub meeting_type: String,
    #[serde(default)]
    pub target_user_email: Option<String>,
    pub status: String,
}

/// Incoming meeting request awaiting accept/reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub user_email: String,
    pub meeting_type: String,
}

/// One feedback entry. `user_email`/`user_id` are absent for anonymous
/// submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub id: i64,
    pub feedback_text: String,
    pub timestamp: String,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Feedback grouped by type and anonymity, keyed the way the backend
/// serializes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedFeedback {
    #[serde(rename = "identifiedVoice")]
    pub identified_voice: Vec<FeedbackItem>,
    #[serde(rename = "anonymousVoice")]
    pub anonymous_voice: Vec<FeedbackItem>,
    #[serde(rename = "identifiedReport")]
    pub identified_report: Vec<FeedbackItem>,
    #[serde(rename = "anonymousReport")]
    pub anonymous_report: Vec<FeedbackItem>,
}

/// Vote actions on a question; each maps to its own backend route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteKind {
    Upvote,
    Downvote,
    Report,
    DownvoteReport,
}

impl VoteKind {
    /// Path segment under `/questions/{id}/`.
    pub fn route_segment(self) -> &'static str {
        match self {
            VoteKind::Upvote => "upvote",
            VoteKind::Downvote => "downvote",
            VoteKind::Report => "report",
            VoteKind::DownvoteReport => "downvote_report",
        }
    }
}

/// Feedback submission type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Voice,
    Report,
}

impl FeedbackKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            FeedbackKind::Voice => "voice",
            FeedbackKind::Report => "report",
        }
    }
}

/// Staff directory groups exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffGroup {
    Admins,
    Experts,
    Employees,
}

impl StaffGroup {
    pub fn route_segment(self) -> &'static str {
        match self {
            StaffGroup::Admins => "admins",
            StaffGroup::Experts => "experts",
            StaffGroup::Employees => "employees",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_body_uses_wire_name() {
        let json = r#"{
            "id": 7,
            "sender_id": 1,
            "receiver_id": 2,
            "message": "hello there",
            "timestamp": "2025-03-01 12:30:00"
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.id, 7);
        assert_eq!(message.body, "hello there");

        let back = serde_json::to_value(&message).unwrap();
        assert_eq!(back["message"], "hello there");
        assert!(back.get("body").is_none());
    }

    #[test]
    fn question_text_uses_wire_name() {
        let json = r#"{
            "id": 3,
            "question": "How do I reset my badge?",
            "category": "IT",
            "timestamp": "2025-02-10 09:00:00",
            "user_email": "someone@example.com"
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.text, "How do I reset my badge?");
    }

    #[test]
    fn user_role_is_optional() {
        let user: User = serde_json::from_str(r#"{"id": 1, "email": "a@b.c"}"#).unwrap();
        assert_eq!(user.role, None);
        assert!(!user.is_admin());

        let admin: User =
            serde_json::from_str(r#"{"id": 2, "email": "x@y.z", "role": "admin"}"#).unwrap();
        assert!(admin.is_admin());
    }

    #[test]
    fn categorized_feedback_reads_camel_case_keys() {
        let json = r#"{
            "identifiedVoice": [{"id": 1, "feedback_text": "good", "timestamp": "t", "user_email": "a@b.c", "user_id": 4}],
            "anonymousVoice": [],
            "identifiedReport": [],
            "anonymousReport": [{"id": 2, "feedback_text": "bad", "timestamp": "t"}]
        }"#;
        let feedback: CategorizedFeedback = serde_json::from_str(json).unwrap();
        assert_eq!(feedback.identified_voice.len(), 1);
        assert_eq!(feedback.anonymous_report[0].user_email, None);
    }
}
