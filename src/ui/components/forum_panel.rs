use eframe::egui;

use crate::common::types::VoteKind;
use crate::common::AppCommand;
use crate::ui::format;
use crate::ui::state::AppState;

pub const CATEGORIES: [&str; 5] = ["General", "IT", "HR", "Finance", "Facilities"];

/// Question/answer forum: search, ask, vote, respond, subscribe.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Vec<AppCommand> {
    let mut commands = Vec::new();

    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut state.question_search);
        if ui.button("Search").clicked() && !state.question_search.trim().is_empty() {
            commands.push(AppCommand::SearchQuestions {
                query: state.question_search.clone(),
            });
        }
        if ui.button("All questions").clicked() {
            state.question_search.clear();
            commands.push(AppCommand::FetchQuestions);
        }
    });
    ui.separator();

    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut state.new_question);
        egui::ComboBox::from_id_salt("question_category")
            .selected_text(state.new_question_category.clone())
            .show_ui(ui, |ui| {
                for category in CATEGORIES {
                    ui.selectable_value(
                        &mut state.new_question_category,
                        category.to_string(),
                        category,
                    );
                }
            });
        if ui.button("Ask").clicked() && !state.new_question.trim().is_empty() {
            commands.push(AppCommand::SubmitQuestion {
                text: state.new_question.clone(),
                category: state.new_question_category.clone(),
            });
            state.new_question.clear();
        }
    });
    ui.separator();

    if !state.subscriptions.is_empty() {
        ui.collapsing(
            format!("Subscribed questions ({})", state.subscriptions.len()),
            |ui| {
                for question in &state.subscriptions {
                    ui.horizontal(|ui| {
                        ui.label(&question.text);
                        if ui.small_button("Unsubscribe").clicked() {
                            commands.push(AppCommand::Unsubscribe {
                                question_id: question.id,
                            });
                        }
                    });
                }
            },
        );
        ui.separator();
    }

    let my_email = state
        .session
        .as_ref()
        .map(|session| session.user.email.clone())
        .unwrap_or_default();
    let open_question = state.open_question;
    let mut toggle_open: Option<Option<i64>> = None;

    egui::ScrollArea::vertical()
        .id_salt("question_list")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if state.questions.is_empty() {
                ui.label("No questions yet. Ask the first one.");
            }
            for question in &state.questions {
                ui.group(|ui| {
                    ui.label(egui::RichText::new(&question.text).strong());
                    ui.label(
                        egui::RichText::new(format!(
                            "{} · {} · {}",
                            question.category,
                            format::format_date_time(&question.timestamp),
                            question.user_email
                        ))
                        .weak(),
                    );
                    ui.horizontal(|ui| {
                        if ui.small_button("▲").on_hover_text("Upvote").clicked() {
                            commands.push(AppCommand::CastVote {
                                question_id: question.id,
                                kind: VoteKind::Upvote,
                            });
                        }
                        if ui.small_button("▼").on_hover_text("Downvote").clicked() {
                            commands.push(AppCommand::CastVote {
                                question_id: question.id,
                                kind: VoteKind::Downvote,
                            });
                        }
                        if ui.small_button("⚑").on_hover_text("Report").clicked() {
                            commands.push(AppCommand::CastVote {
                                question_id: question.id,
                                kind: VoteKind::Report,
                            });
                        }
                        if ui.small_button("Subscribe").clicked() {
                            commands.push(AppCommand::Subscribe {
                                question_id: question.id,
                            });
                        }
                        let opened = open_question == Some(question.id);
                        if ui.selectable_label(opened, "Responses").clicked() {
                            if opened {
                                toggle_open = Some(None);
                            } else {
                                toggle_open = Some(Some(question.id));
                                commands.push(AppCommand::FetchResponses {
                                    question_id: question.id,
                                });
                            }
                        }
                        if question.user_email == my_email && ui.small_button("Delete").clicked() {
                            commands.push(AppCommand::DeleteQuestion {
                                question_id: question.id,
                            });
                        }
                    });

                    if open_question == Some(question.id) {
                        ui.separator();
                        for response in &state.responses {
                            ui.horizontal_wrapped(|ui| {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{} ({})",
                                        response.user_email,
                                        format::format_date_time(&response.timestamp)
                                    ))
                                    .weak(),
                                );
                                ui.label(&response.text);
                            });
                        }
                        ui.horizontal(|ui| {
                            ui.text_edit_singleline(&mut state.new_response);
                            if ui.button("Reply").clicked()
                                && !state.new_response.trim().is_empty()
                            {
                                commands.push(AppCommand::SubmitResponse {
                                    question_id: question.id,
                                    text: state.new_response.clone(),
                                });
                            }
                        });
                    }
                });
            }
        });

    if let Some(open) = toggle_open {
        state.open_question = open;
        state.responses.clear();
        state.new_response.clear();
    }

    commands
}
