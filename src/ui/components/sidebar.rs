use eframe::egui;

use crate::common::types::User;
use crate::ui::state::AppState;

/// What the user asked the sidebar to do this frame.
#[derive(Default)]
pub struct SidebarAction {
    pub open_chat: Option<User>,
    pub find_expert: Option<String>,
    pub refresh_contacts: bool,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> SidebarAction {
    let mut action = SidebarAction::default();
    let me = state.user_id().unwrap_or(0);

    ui.horizontal(|ui| {
        ui.heading("Conversations");
        if ui.small_button("⟳").on_hover_text("Refresh contacts").clicked() {
            action.refresh_contacts = true;
        }
    });
    ui.separator();

    ui.text_edit_singleline(&mut state.contact_search);

    if state.contacts.is_empty() {
        ui.label("No conversations yet");
    }
    let query = state.contact_search.to_lowercase();
    egui::ScrollArea::vertical()
        .id_salt("contact_list")
        .max_height(ui.available_height() * 0.5)
        .show(ui, |ui| {
            for contact in &state.contacts {
                if contact.id == me || !contact.email.to_lowercase().contains(&query) {
                    continue;
                }
                let selected = state.partner.as_ref().map(|user| user.id) == Some(contact.id);
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::GREEN, "●");
                    if ui.selectable_label(selected, &contact.email).clicked() {
                        action.open_chat = Some(contact.clone());
                    }
                });
            }
        });

    ui.separator();
    ui.collapsing("New chat", |ui| {
        ui.text_edit_singleline(&mut state.new_chat_search);
        let query = state.new_chat_search.to_lowercase();
        egui::ScrollArea::vertical()
            .id_salt("new_chat_list")
            .max_height(120.0)
            .show(ui, |ui| {
                for user in &state.all_users {
                    if user.id == me || !user.email.to_lowercase().contains(&query) {
                        continue;
                    }
                    if ui.selectable_label(false, &user.email).clicked() {
                        action.open_chat = Some(user.clone());
                    }
                }
            });
    });

    ui.separator();
    ui.collapsing("Ask an expert", |ui| {
        ui.text_edit_singleline(&mut state.expert_category);
        if ui.button("Find expert").clicked() && !state.expert_category.trim().is_empty() {
            action.find_expert = Some(state.expert_category.trim().to_string());
        }
    });

    action
}
