use eframe::egui;

use crate::common::AppCommand;
use crate::ui::format;
use crate::ui::state::AppState;

const MEETING_TYPES: [&str; 3] = ["in-person", "video-call", "phone-call"];

/// Meeting scheduling: pending requests, the user's calendar, and a form
/// to propose a meeting with any other user.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    let me = state.user_id().unwrap_or(0);

    ui.horizontal(|ui| {
        ui.heading("Meetings");
        if ui.small_button("⟳").on_hover_text("Refresh").clicked() {
            commands.push(AppCommand::FetchMeetings);
            commands.push(AppCommand::FetchMeetingRequests);
        }
    });
    ui.separator();

    ui.label(egui::RichText::new("Requests for you").strong());
    if state.meeting_requests.is_empty() {
        ui.label("No pending requests");
    }
    for request in &state.meeting_requests {
        ui.horizontal(|ui| {
            ui.label(format!(
                "{} — {} at {} ({})",
                request.user_email, request.date, request.time, request.meeting_type
            ));
            if ui.small_button("Accept").clicked() {
                commands.push(AppCommand::AcceptMeeting {
                    meeting_id: request.id,
                });
            }
            if ui.small_button("Reject").clicked() {
                commands.push(AppCommand::RejectMeeting {
                    meeting_id: request.id,
                });
            }
        });
    }
    ui.separator();

    ui.label(egui::RichText::new("Your meetings").strong());
    if state.meetings.is_empty() {
        ui.label("Nothing scheduled");
    }
    egui::ScrollArea::vertical()
        .id_salt("meeting_list")
        .max_height(ui.available_height() * 0.4)
        .show(ui, |ui| {
            for meeting in &state.meetings {
                ui.horizontal(|ui| {
                    ui.label(format!(
                        "{} at {} ({}) with {} — {}",
                        meeting.date,
                        format::format_time(&meeting.time),
                        meeting.meeting_type,
                        meeting.target_user_email.as_deref().unwrap_or("unknown"),
                        meeting.status
                    ));
                    if ui.small_button("Cancel").clicked() {
                        commands.push(AppCommand::CancelMeeting {
                            meeting_id: meeting.id,
                        });
                    }
                });
            }
        });
    ui.separator();

    ui.label(egui::RichText::new("Schedule a meeting").strong());
    egui::ComboBox::from_label("With")
        .selected_text(
            state
                .meeting_target
                .as_ref()
                .map(|user| user.email.clone())
                .unwrap_or_else(|| "Pick a user".to_string()),
        )
        .show_ui(ui, |ui| {
            for user in &state.all_users {
                if user.id == me {
                    continue;
                }
                let selected = state.meeting_target.as_ref().map(|target| target.id) == Some(user.id);
                if ui.selectable_label(selected, &user.email).clicked() {
                    state.meeting_target = Some(user.clone());
                }
            }
        });
    ui.horizontal(|ui| {
        ui.label("Date (YYYY-MM-DD):");
        ui.text_edit_singleline(&mut state.meeting_date);
    });
    ui.horizontal(|ui| {
        ui.label("Time (HH:MM):");
        ui.text_edit_singleline(&mut state.meeting_time);
    });
    egui::ComboBox::from_label("Type")
        .selected_text(state.meeting_type.clone())
        .show_ui(ui, |ui| {
            for meeting_type in MEETING_TYPES {
                ui.selectable_value(
                    &mut state.meeting_type,
                    meeting_type.to_string(),
                    meeting_type,
                );
            }
        });

    let ready = state.meeting_target.is_some()
        && !state.meeting_date.trim().is_empty()
        && !state.meeting_time.trim().is_empty();
    if ui.add_enabled(ready, egui::Button::new("Schedule")).clicked() {
        if let Some(target) = &state.meeting_target {
            commands.push(AppCommand::ScheduleMeeting {
                target_user_id: target.id,
                date: state.meeting_date.trim().to_string(),
                time: state.meeting_time.trim().to_string(),
                meeting_type: state.meeting_type.clone(),
            });
        }
    }

    commands
}
