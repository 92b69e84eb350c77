use eframe::egui;

use crate::ui::state::AppState;

/// Bottom status line: backend acknowledgements and the observable error
/// signal for failed operations. Both are dismissible and otherwise inert.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if let Some(error) = state.last_error.clone() {
            ui.colored_label(egui::Color32::RED, error);
            if ui.small_button("✖").clicked() {
                state.last_error = None;
            }
        } else if let Some(notice) = state.notice.clone() {
            ui.colored_label(egui::Color32::DARK_GREEN, notice);
            if ui.small_button("✖").clicked() {
                state.notice = None;
            }
        } else {
            ui.label(egui::RichText::new("Ready").weak());
        }
    });
}
