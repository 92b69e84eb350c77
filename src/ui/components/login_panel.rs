use eframe::egui;

use crate::common::AppCommand;
use crate::ui::state::{AppState, AuthView};

/// Pre-login forms: log in, sign up, recover password.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<AppCommand> {
    let mut command = None;

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading("Knowledge Hub");
        ui.add_space(10.0);

        if let Some(notice) = state.auth_notice.clone() {
            ui.colored_label(egui::Color32::DARK_GREEN, notice);
        }
        if let Some(error) = state.last_error.clone() {
            ui.colored_label(egui::Color32::RED, error);
        }
        ui.add_space(10.0);

        match state.auth_view {
            AuthView::LogIn => command = login_form(ui, state),
            AuthView::SignUp => command = signup_form(ui, state),
            AuthView::Recover => command = recover_form(ui, state),
        }
    });

    command
}

fn credential_fields(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("Email:");
        ui.text_edit_singleline(&mut state.email_input);
    });
    ui.horizontal(|ui| {
        ui.label("Password:");
        ui.add(egui::TextEdit::singleline(&mut state.password_input).password(!state.show_password));
        ui.checkbox(&mut state.show_password, "Show");
    });
}

fn login_form(ui: &mut egui::Ui, state: &mut AppState) -> Option<AppCommand> {
    let mut command = None;

    credential_fields(ui, state);
    ui.add_space(8.0);

    if ui.button("Log in").clicked() {
        command = Some(AppCommand::LogIn {
            email: state.email_input.clone(),
            password: state.password_input.clone(),
        });
    }

    ui.add_space(12.0);
    if ui.link("Create an account").clicked() {
        state.auth_view = AuthView::SignUp;
        state.last_error = None;
    }
    if ui.link("Forgot password?").clicked() {
        state.auth_view = AuthView::Recover;
        state.last_error = None;
    }

    command
}

fn signup_form(ui: &mut egui::Ui, state: &mut AppState) -> Option<AppCommand> {
    let mut command = None;

    credential_fields(ui, state);
    ui.horizontal(|ui| {
        ui.label("Security question:");
        ui.text_edit_singleline(&mut state.security_question_input);
    });
    ui.horizontal(|ui| {
        ui.label("Answer:");
        ui.text_edit_singleline(&mut state.security_answer_input);
    });
    ui.add_space(8.0);

    if ui.button("Sign up").clicked() {
        command = Some(AppCommand::SignUp {
            email: state.email_input.clone(),
            password: state.password_input.clone(),
            security_question: state.security_question_input.clone(),
            security_answer: state.security_answer_input.clone(),
        });
    }

    ui.add_space(12.0);
    if ui.link("Back to login").clicked() {
        state.auth_view = AuthView::LogIn;
        state.last_error = None;
    }

    command
}

fn recover_form(ui: &mut egui::Ui, state: &mut AppState) -> Option<AppCommand> {
    let mut command = None;

    ui.horizontal(|ui| {
        ui.label("Email:");
        ui.text_edit_singleline(&mut state.email_input);
    });

    match state.recovery_question.clone() {
        None => {
            if ui.button("Look up security question").clicked() {
                command = Some(AppCommand::FetchSecurityQuestion {
                    email: state.email_input.clone(),
                });
            }
        }
        Some(question) => {
            ui.label(egui::RichText::new(question).strong());
            ui.horizontal(|ui| {
                ui.label("Answer:");
                ui.text_edit_singleline(&mut state.security_answer_input);
            });
            ui.horizontal(|ui| {
                ui.label("New password:");
                ui.add(
                    egui::TextEdit::singleline(&mut state.new_password_input)
                        .password(!state.show_password),
                );
            });
            if ui.button("Reset password").clicked() {
                command = Some(AppCommand::ResetPassword {
                    email: state.email_input.clone(),
                    security_answer: state.security_answer_input.clone(),
                    new_password: state.new_password_input.clone(),
                });
            }
        }
    }

    ui.add_space(12.0);
    if ui.link("Back to login").clicked() {
        state.auth_view = AuthView::LogIn;
        state.recovery_question = None;
        state.last_error = None;
    }

    command
}
