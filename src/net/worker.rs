use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};

use crate::api::{ApiError, BackendApi};
use crate::common::types::{FeedbackKind, StaffGroup, User, VoteKind};
use crate::common::{ApiAction, AppCommand, AppEvent};
use crate::net::conversation::{ConversationState, RefreshOutcome};
use crate::session::Session;
use crate::validate;

/// Background half of the application. Owns the REST client, the session
/// and the conversation poller; reacts to UI commands and to the refresh
/// interval, and reports back through events.
///
/// Single task, cooperative: command handling and refresh ticks interleave
/// but never run in parallel, and the one `Interval` below is the only
/// refresh timer that can exist. Dropping the command sender ends the loop,
/// so the timer cannot outlive the UI.
pub struct BackendWorker<B> {
    api: B,
    session: Option<Session>,
    conversation: ConversationState,
    ticker: Interval,
    poll_interval: Duration,
    event_sender: mpsc::Sender<AppEvent>,
    command_receiver: mpsc::Receiver<AppCommand>,
}

impl<B: BackendApi> BackendWorker<B> {
    pub fn new(
        api: B,
        poll_interval: Duration,
        event_sender: mpsc::Sender<AppEvent>,
        command_receiver: mpsc::Receiver<AppCommand>,
    ) -> Self {
        Self {
            api,
            session: None,
            conversation: ConversationState::new(),
            ticker: new_ticker(poll_interval),
            poll_interval,
            event_sender,
            command_receiver,
        }
    }

    pub async fn run(mut self) {
        log::info!(
            "Backend worker started (poll interval {} ms)",
            self.poll_interval.as_millis()
        );
        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command).await,
                        // UI dropped its sender: view unmounted, stop polling
                        None => break,
                    }
                }
                _ = self.ticker.tick(), if self.conversation.is_active() => {
                    self.refresh_tick().await;
                }
            }
        }
        log::info!("Backend worker stopped");
    }

    async fn handle_command(&mut self, command: AppCommand) {
        match command {
            AppCommand::LogIn { email, password } => self.log_in(email, password).await,
            AppCommand::SignUp {
                email,
                password,
                security_question,
                security_answer,
            } => {
                self.sign_up(email, password, security_question, security_answer)
                    .await
            }
            AppCommand::FetchSecurityQuestion { email } => {
                self.fetch_security_question(email).await
            }
            AppCommand::ResetPassword {
                email,
                security_answer,
                new_password,
            } => self.reset_password(email, security_answer, new_password).await,
            AppCommand::ChangePassword {
                current_password,
                new_password,
            } => self.change_password(current_password, new_password).await,
            AppCommand::LogOut => self.log_out().await,

            AppCommand::SelectConversation(partner) => self.select_conversation(partner).await,
            AppCommand::DeselectConversation => {
                self.conversation.clear();
                log::debug!("Conversation deselected; polling paused");
            }
            AppCommand::SendMessage { body } => self.send_message(body).await,
            AppCommand::RefreshContacts => self.refresh_contacts().await,
            AppCommand::FetchAllUsers => self.fetch_all_users().await,
            AppCommand::FindExpert { category } => self.find_expert(category).await,
            AppCommand::FetchStaff(group) => self.fetch_staff(group).await,

            AppCommand::FetchQuestions => self.fetch_questions().await,
            AppCommand::SearchQuestions { query } => self.search_questions(query).await,
            AppCommand::SubmitQuestion { text, category } => {
                self.submit_question(text, category).await
            }
            AppCommand::EditQuestion {
                question_id,
                text,
                category,
            } => self.edit_question(question_id, text, category).await,
            AppCommand::DeleteQuestion { question_id } => self.delete_question(question_id).await,
            AppCommand::CastVote { question_id, kind } => self.cast_vote(question_id, kind).await,
            AppCommand::FetchResponses { question_id } => self.fetch_responses(question_id).await,
            AppCommand::SubmitResponse { question_id, text } => {
                self.submit_response(question_id, text).await
            }
            AppCommand::Subscribe { question_id } => self.set_subscription(question_id, true).await,
            AppCommand::Unsubscribe { question_id } => {
                self.set_subscription(question_id, false).await
            }
            AppCommand::FetchSubscriptions => self.fetch_subscriptions().await,

            AppCommand::FetchMeetings => self.fetch_meetings().await,
            AppCommand::FetchMeetingRequests => self.fetch_meeting_requests().await,
            AppCommand::ScheduleMeeting {
                target_user_id,
                date,
                time,
                meeting_type,
            } => {
                self.schedule_meeting(target_user_id, date, time, meeting_type)
                    .await
            }
            AppCommand::AcceptMeeting { meeting_id } => {
                self.resolve_meeting(meeting_id, MeetingAction::Accept).await
            }
            AppCommand::RejectMeeting { meeting_id } => {
                self.resolve_meeting(meeting_id, MeetingAction::Reject).await
            }
            AppCommand::CancelMeeting { meeting_id } => {
                self.resolve_meeting(meeting_id, MeetingAction::Cancel).await
            }

            AppCommand::SubmitFeedback {
                kind,
                text,
                anonymous,
            } => self.submit_feedback(kind, text, anonymous).await,
            AppCommand::FetchCategorizedFeedback => self.fetch_categorized_feedback().await,
            AppCommand::DeleteFeedback { feedback_id } => self.delete_feedback(feedback_id).await,
        }
    }

    // --- Conversation poller -------------------------------------------

    async fn select_conversation(&mut self, partner: User) {
        let Some(session) = self.session.clone() else {
            log::warn!("Ignoring conversation selection without a session");
            return;
        };
        if partner.id == session.user_id() {
            log::warn!("Refusing to open a conversation with oneself");
            return;
        }
        // Fetch before committing: a failed fetch leaves the previous
        // selection and list exactly as they were.
        match self.api.conversation(session.user_id(), partner.id).await {
            Ok(history) => {
                let Some(generation) = self.conversation.begin(session.user_id(), partner.clone())
                else {
                    return;
                };
                self.conversation.replace(generation, history.clone());
                self.restart_ticker();
                self.emit(AppEvent::ConversationLoaded {
                    partner,
                    messages: history,
                })
                .await;
            }
            Err(err) => self.fail(ApiAction::LoadConversation, err).await,
        }
    }

    async fn send_message(&mut self, body: String) {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            log::debug!("Ignoring empty message body");
            return;
        }
        let Some(session) = self.session.clone() else {
            log::warn!("Ignoring message send without a session");
            return;
        };
        let Some(selection) = self.conversation.selection().cloned() else {
            log::debug!("Ignoring message send without an open conversation");
            return;
        };
        match self
            .api
            .send_message(session.user_id(), selection.partner.id, trimmed)
            .await
        {
            Ok(message) => {
                self.conversation.append(message.clone());
                self.emit(AppEvent::MessageSent(message)).await;
                // a send reorders the recent-contacts list
                self.refresh_contacts().await;
            }
            Err(err) => self.fail(ApiAction::SendMessage, err).await,
        }
    }

    async fn refresh_tick(&mut self) {
        let Some(selection) = self.conversation.selection().cloned() else {
            return;
        };
        let generation = self.conversation.generation();
        match self
            .api
            .conversation(selection.user_id, selection.partner.id)
            .await
        {
            Ok(history) => match self.conversation.apply_refresh(generation, history) {
                RefreshOutcome::Replaced(messages) => {
                    self.emit(AppEvent::ConversationUpdated { messages }).await;
                }
                RefreshOutcome::Unchanged | RefreshOutcome::Stale => {}
            },
            Err(err) => self.fail(ApiAction::RefreshConversation, err).await,
        }
    }

    /// Re-arm the refresh interval. Replacing the `Interval` drops any
    /// pending tick, so at most one schedule exists at a time; the first
    /// tick lands one full period after the selection.
    fn restart_ticker(&mut self) {
        self.ticker = new_ticker(self.poll_interval);
    }

    // --- Auth ----------------------------------------------------------

    async fn log_in(&mut self, email: String, password: String) {
        match self.api.log_in(&email, &password).await {
            Ok(session) => {
                log::info!("Logged in as {}", session.user.email);
                self.session = Some(session.clone());
                self.emit(AppEvent::LoggedIn(session)).await;
            }
            Err(err) => self.fail(ApiAction::LogIn, err).await,
        }
    }

    async fn sign_up(
        &mut self,
        email: String,
        password: String,
        security_question: String,
        security_answer: String,
    ) {
        if !validate::is_plausible_email(&email) {
            self.reject(ApiAction::SignUp, "Please enter a valid email address")
                .await;
            return;
        }
        if !validate::is_strong_password(&password) {
            self.reject(ApiAction::SignUp, validate::password_requirements())
                .await;
            return;
        }
        match self
            .api
            .sign_up(&email, &password, &security_question, &security_answer)
            .await
        {
            Ok(()) => self.emit(AppEvent::SignupComplete).await,
            Err(err) => self.fail(ApiAction::SignUp, err).await,
        }
    }

    async fn fetch_security_question(&mut self, email: String) {
        match self.api.security_question(&email).await {
            Ok(question) => {
                self.emit(AppEvent::SecurityQuestion { email, question })
                    .await
            }
            Err(err) => self.fail(ApiAction::RecoverPassword, err).await,
        }
    }

    async fn reset_password(&mut self, email: String, security_answer: String, new_password: String) {
        if !validate::is_strong_password(&new_password) {
            self.reject(ApiAction::RecoverPassword, validate::password_requirements())
                .await;
            return;
        }
        let verified = self.api.verify_security_answer(&email, &security_answer).await;
        if let Err(err) = verified {
            self.fail(ApiAction::RecoverPassword, err).await;
            return;
        }
        match self.api.reset_password(&email, &new_password).await {
            Ok(()) => self.emit(AppEvent::PasswordResetDone).await,
            Err(err) => self.fail(ApiAction::RecoverPassword, err).await,
        }
    }

    async fn change_password(&mut self, current_password: String, new_password: String) {
        let Some(session) = self.session.clone() else {
            log::warn!("Ignoring password change without a session");
            return;
        };
        if !validate::is_strong_password(&new_password) {
            self.reject(ApiAction::ChangePassword, validate::password_requirements())
                .await;
            return;
        }
        match self
            .api
            .change_password(session.user_id(), &current_password, &new_password)
            .await
        {
            Ok(()) => {
                self.emit(AppEvent::Notice("Password updated successfully".into()))
                    .await
            }
            Err(err) => self.fail(ApiAction::ChangePassword, err).await,
        }
    }

    async fn log_out(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Logged out {}", session.user.email);
        }
        self.conversation.clear();
        self.api.set_bearer_token(None);
        self.emit(AppEvent::LoggedOut).await;
    }

    // --- Directory -----------------------------------------------------

    async fn refresh_contacts(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match self.api.recent_contacts(session.user_id()).await {
            Ok(users) => self.emit(AppEvent::ContactsLoaded(users)).await,
            Err(err) => self.fail(ApiAction::LoadContacts, err).await,
        }
    }

    async fn fetch_all_users(&mut self) {
        match self.api.all_users().await {
            Ok(users) => self.emit(AppEvent::AllUsersLoaded(users)).await,
            Err(err) => self.fail(ApiAction::LoadUsers, err).await,
        }
    }

    async fn find_expert(&mut self, category: String) {
        match self.api.expert_for_category(&category).await {
            Ok(expert) => self.emit(AppEvent::ExpertFound(expert)).await,
            Err(err) => self.fail(ApiAction::FindExpert, err).await,
        }
    }

    async fn fetch_staff(&mut self, group: StaffGroup) {
        match self.api.staff(group).await {
            Ok(users) => self.emit(AppEvent::StaffLoaded { group, users }).await,
            Err(err) => self.fail(ApiAction::LoadUsers, err).await,
        }
    }

    // --- Forum ---------------------------------------------------------

    async fn fetch_questions(&mut self) {
        match self.api.questions().await {
            Ok(questions) => self.emit(AppEvent::QuestionsLoaded(questions)).await,
            Err(err) => self.fail(ApiAction::LoadQuestions, err).await,
        }
    }

    async fn search_questions(&mut self, query: String) {
        match self.api.search_questions(&query).await {
            Ok(questions) => self.emit(AppEvent::QuestionsLoaded(questions)).await,
            Err(err) => self.fail(ApiAction::LoadQuestions, err).await,
        }
    }

    async fn submit_question(&mut self, text: String, category: String) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            log::debug!("Ignoring empty question");
            return;
        }
        let Some(session) = self.session.clone() else {
            log::warn!("Ignoring question submission without a session");
            return;
        };
        match self
            .api
            .submit_question(session.user_id(), trimmed, &category)
            .await
        {
            Ok(id) => {
                log::debug!("Question {id} saved");
                self.emit(AppEvent::Notice(format!("Your question was saved: {trimmed}")))
                    .await;
                self.fetch_questions().await;
            }
            Err(err) => self.fail(ApiAction::SubmitQuestion, err).await,
        }
    }

    async fn edit_question(&mut self, question_id: i64, text: String, category: String) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match self
            .api
            .edit_question(question_id, session.user_id(), text.trim(), &category)
            .await
        {
            Ok(()) => {
                self.emit(AppEvent::Notice("Question updated successfully!".into()))
                    .await;
                self.fetch_questions().await;
            }
            Err(err) => self.fail(ApiAction::UpdateQuestion, err).await,
        }
    }

    async fn delete_question(&mut self, question_id: i64) {
        match self.api.delete_question(question_id).await {
            Ok(()) => {
                self.emit(AppEvent::Notice("Question deleted successfully!".into()))
                    .await;
                self.fetch_questions().await;
            }
            Err(err) => self.fail(ApiAction::UpdateQuestion, err).await,
        }
    }

    async fn cast_vote(&mut self, question_id: i64, kind: VoteKind) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match self.api.cast_vote(question_id, session.user_id(), kind).await {
            Ok(message) => self.emit(AppEvent::Notice(message)).await,
            Err(err) => self.fail(ApiAction::Vote, err).await,
        }
    }

    async fn fetch_responses(&mut self, question_id: i64) {
        match self.api.responses(question_id).await {
            Ok(responses) => {
                self.emit(AppEvent::ResponsesLoaded {
                    question_id,
                    responses,
                })
                .await
            }
            Err(err) => self.fail(ApiAction::LoadResponses, err).await,
        }
    }

    async fn submit_response(&mut self, question_id: i64, text: String) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            log::debug!("Ignoring empty response");
            return;
        }
        let Some(session) = self.session.clone() else {
            return;
        };
        match self
            .api
            .submit_response(question_id, session.user_id(), trimmed)
            .await
        {
            Ok(_) => self.fetch_responses(question_id).await,
            Err(err) => self.fail(ApiAction::SubmitResponse, err).await,
        }
    }

    async fn set_subscription(&mut self, question_id: i64, subscribe: bool) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let result = if subscribe {
            self.api.subscribe(session.user_id(), question_id).await
        } else {
            self.api.unsubscribe(session.user_id(), question_id).await
        };
        match result {
            Ok(()) => self.fetch_subscriptions().await,
            Err(err) => self.fail(ApiAction::UpdateSubscription, err).await,
        }
    }

    async fn fetch_subscriptions(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match self.api.subscriptions(session.user_id()).await {
            Ok(questions) => self.emit(AppEvent::SubscriptionsLoaded(questions)).await,
            Err(err) => self.fail(ApiAction::UpdateSubscription, err).await,
        }
    }

    // --- Meetings ------------------------------------------------------

    async fn fetch_meetings(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match self.api.meetings(session.user_id()).await {
            Ok(meetings) => self.emit(AppEvent::MeetingsLoaded(meetings)).await,
            Err(err) => self.fail(ApiAction::LoadMeetings, err).await,
        }
    }

    async fn fetch_meeting_requests(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match self.api.meeting_requests(session.user_id()).await {
            Ok(requests) => self.emit(AppEvent::MeetingRequestsLoaded(requests)).await,
            Err(err) => self.fail(ApiAction::LoadMeetings, err).await,
        }
    }

    async fn schedule_meeting(
        &mut self,
        target_user_id: i64,
        date: String,
        time: String,
        meeting_type: String,
    ) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match self
            .api
            .schedule_meeting(session.user_id(), target_user_id, &date, &time, &meeting_type)
            .await
        {
            Ok(message) => {
                self.emit(AppEvent::Notice(message)).await;
                self.reload_meetings().await;
            }
            Err(err) => self.fail(ApiAction::ScheduleMeeting, err).await,
        }
    }

    async fn resolve_meeting(&mut self, meeting_id: i64, action: MeetingAction) {
        let result = match action {
            MeetingAction::Accept => self.api.accept_meeting(meeting_id).await,
            MeetingAction::Reject => self.api.reject_meeting(meeting_id).await,
            MeetingAction::Cancel => self.api.delete_meeting(meeting_id).await,
        };
        match result {
            Ok(message) => {
                self.emit(AppEvent::Notice(message)).await;
                self.reload_meetings().await;
            }
            Err(err) => self.fail(ApiAction::UpdateMeeting, err).await,
        }
    }

    async fn reload_meetings(&mut self) {
        self.fetch_meetings().await;
        self.fetch_meeting_requests().await;
    }

    // --- Feedback ------------------------------------------------------

    async fn submit_feedback(&mut self, kind: FeedbackKind, text: String, anonymous: bool) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.reject(
                ApiAction::SubmitFeedback,
                "Please enter your feedback before submitting",
            )
            .await;
            return;
        }
        let user_id = if anonymous {
            None
        } else {
            self.session.as_ref().map(Session::user_id)
        };
        match self
            .api
            .submit_feedback(kind, trimmed, anonymous, user_id)
            .await
        {
            Ok(()) => {
                self.emit(AppEvent::Notice("Thank you for your feedback!".into()))
                    .await
            }
            Err(err) => self.fail(ApiAction::SubmitFeedback, err).await,
        }
    }

    async fn fetch_categorized_feedback(&mut self) {
        match self.api.categorized_feedback().await {
            Ok(feedback) => self.emit(AppEvent::FeedbackLoaded(feedback)).await,
            Err(err) => self.fail(ApiAction::LoadFeedback, err).await,
        }
    }

    async fn delete_feedback(&mut self, feedback_id: i64) {
        match self.api.delete_feedback(feedback_id).await {
            Ok(()) => self.fetch_categorized_feedback().await,
            Err(err) => self.fail(ApiAction::LoadFeedback, err).await,
        }
    }

    // --- Plumbing ------------------------------------------------------

    async fn emit(&self, event: AppEvent) {
        if self.event_sender.send(event).await.is_err() {
            log::warn!("UI event channel closed; dropping event");
        }
    }

    /// A failed backend call: log it and surface it, state untouched.
    async fn fail(&self, action: ApiAction, err: ApiError) {
        log::warn!("Failed to {action}: {err}");
        self.emit(AppEvent::RequestFailed {
            action,
            detail: err.detail(),
        })
        .await;
    }

    /// Client-side validation rejection; never reaches the network.
    async fn reject(&self, action: ApiAction, detail: &str) {
        log::debug!("Rejected {action} locally: {detail}");
        self.emit(AppEvent::RequestFailed {
            action,
            detail: detail.to_string(),
        })
        .await;
    }
}

#[derive(Debug, Clone, Copy)]
enum MeetingAction {
    Accept,
    Reject,
    Cancel,
}

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = time::interval_at(time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
