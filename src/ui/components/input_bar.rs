use eframe::egui;

/// Message composer. Returns the draft to send; the draft itself is only
/// cleared once the server confirms the message, so a failed send leaves
/// it in place.
pub fn render(ui: &mut egui::Ui, draft: &mut String) -> Option<String> {
    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(draft)
                .hint_text("Write a message…")
                .desired_width(ui.available_width() - 60.0),
        );
        if ui.button("Send").clicked() {
            send = true;
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
    });

    if send && !draft.trim().is_empty() {
        return Some(draft.clone());
    }

    None
}
