use eframe::egui;

use crate::common::types::{FeedbackItem, FeedbackKind, StaffGroup, User};
use crate::common::AppCommand;
use crate::ui::state::{AppState, MainView};

/// Floating feedback window: submission form for everyone, review tools
/// for admins.
pub fn render(ctx: &egui::Context, state: &mut AppState) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    if !state.feedback_open {
        return commands;
    }

    let is_admin = state
        .session
        .as_ref()
        .map(|session| session.is_admin())
        .unwrap_or(false);
    let mut open = state.feedback_open;

    egui::Window::new("Feedback")
        .open(&mut open)
        .resizable(true)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.radio_value(&mut state.feedback_kind, FeedbackKind::Voice, "Voice an opinion");
                ui.radio_value(&mut state.feedback_kind, FeedbackKind::Report, "Report a problem");
            });
            ui.text_edit_multiline(&mut state.feedback_text);
            ui.checkbox(&mut state.feedback_anonymous, "Submit anonymously");
            if ui.button("Submit").clicked() {
                commands.push(AppCommand::SubmitFeedback {
                    kind: state.feedback_kind,
                    text: state.feedback_text.clone(),
                    anonymous: state.feedback_anonymous,
                });
                state.feedback_text.clear();
            }

            if is_admin {
                ui.separator();
                ui.collapsing("Review feedback", |ui| {
                    if ui.button("Load feedback").clicked() {
                        commands.push(AppCommand::FetchCategorizedFeedback);
                    }
                    if let Some(feedback) = state.admin_feedback.clone() {
                        section(ui, "Identified voices", &feedback.identified_voice, &mut commands);
                        section(ui, "Anonymous voices", &feedback.anonymous_voice, &mut commands);
                        section(ui, "Identified reports", &feedback.identified_report, &mut commands);
                        section(ui, "Anonymous reports", &feedback.anonymous_report, &mut commands);
                    }
                });
                ui.collapsing("Staff directory", |ui| {
                    ui.horizontal(|ui| {
                        for group in [StaffGroup::Admins, StaffGroup::Experts, StaffGroup::Employees]
                        {
                            if ui.small_button(group.route_segment()).clicked() {
                                commands.push(AppCommand::FetchStaff(group));
                            }
                        }
                    });
                    if let Some((group, users)) = &state.staff {
                        ui.label(
                            egui::RichText::new(format!("{}:", group.route_segment())).strong(),
                        );
                        for user in users {
                            ui.label(&user.email);
                        }
                    }
                });
            }
        });

    // replies to identified feedback open a direct message
    for command in &commands {
        if let AppCommand::SelectConversation(_) = command {
            state.feedback_open = false;
            state.view = MainView::Messages;
        }
    }
    if !open {
        state.feedback_open = false;
    }

    commands
}

fn section(
    ui: &mut egui::Ui,
    title: &str,
    items: &[FeedbackItem],
    commands: &mut Vec<AppCommand>,
) {
    if items.is_empty() {
        return;
    }
    ui.label(egui::RichText::new(title).strong());
    for item in items {
        ui.horizontal_wrapped(|ui| {
            if let Some(email) = &item.user_email {
                ui.label(egui::RichText::new(email).weak());
            }
            ui.label(&item.feedback_text);
            if let (Some(user_id), Some(email)) = (item.user_id, item.user_email.clone()) {
                if ui.small_button("Reply").clicked() {
                    commands.push(AppCommand::SelectConversation(User {
                        id: user_id,
                        email,
                        role: None,
                    }));
                }
            }
            if ui.small_button("Delete").clicked() {
                commands.push(AppCommand::DeleteFeedback {
                    feedback_id: item.id,
                });
            }
        });
    }
}
