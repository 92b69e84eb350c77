use eframe::egui;

use crate::ui::format;
use crate::ui::state::AppState;

/// Message history for the open conversation. Returns true when the user
/// asked to close it.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let mut close = false;
    let me = state.user_id().unwrap_or(0);

    let Some(partner) = state.partner.clone() else {
        ui.label("Select a conversation from the sidebar.");
        return false;
    };

    ui.horizontal(|ui| {
        ui.heading(&partner.email);
        if ui.small_button("✖").on_hover_text("Close conversation").clicked() {
            close = true;
        }
    });
    ui.separator();

    let bottom_reserve = 40.0;
    egui::ScrollArea::vertical()
        .id_salt("chat_history")
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .max_height(ui.available_height() - bottom_reserve)
        .show(ui, |ui| {
            for message in &state.messages {
                let mine = message.sender_id == me;
                let sender = if mine { "You" } else { partner.email.as_str() };
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(format::format_date_time(&message.timestamp)).weak(),
                    );
                    if mine {
                        ui.label(egui::RichText::new(sender).strong());
                    } else {
                        ui.label(sender);
                    }
                    ui.label(&message.body);
                });
            }
            if state.scroll_pending {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                state.scroll_pending = false;
            }
        });

    close
}
