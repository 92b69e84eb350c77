use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{AppCommand, AppEvent};

use super::components::{
    chat_area, feedback_window, forum_panel, input_bar, login_panel, meetings_panel, sidebar,
    status_line,
};
use super::state::{AppState, MainView};

/// The desktop application. Owns display state and the two channel ends;
/// all network work happens in the backend worker.
pub struct HubApp {
    state: AppState,
    command_sender: mpsc::Sender<AppCommand>,
    event_receiver: mpsc::Receiver<AppEvent>,
}

impl HubApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<AppCommand>,
        event_receiver: mpsc::Receiver<AppEvent>,
    ) -> Self {
        Self {
            state: AppState::new(),
            command_sender,
            event_receiver,
        }
    }

    fn handle_backend_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            let logged_in = matches!(event, AppEvent::LoggedIn(_));
            self.state.apply_event(event);
            if logged_in {
                self.send_command(AppCommand::RefreshContacts);
                self.send_command(AppCommand::FetchAllUsers);
            }
        }
    }

    fn send_command(&self, command: AppCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to backend: {err}");
        }
    }

    fn switch_view(&mut self, view: MainView) {
        if self.state.view == view {
            return;
        }
        self.state.view = view;
        match view {
            MainView::Messages => self.send_command(AppCommand::RefreshContacts),
            MainView::Forum => {
                self.send_command(AppCommand::FetchQuestions);
                self.send_command(AppCommand::FetchSubscriptions);
            }
            MainView::Meetings => {
                self.send_command(AppCommand::FetchMeetings);
                self.send_command(AppCommand::FetchMeetingRequests);
                self.send_command(AppCommand::FetchAllUsers);
            }
        }
    }

    fn render_tab_strip(&mut self, ctx: &egui::Context) {
        let mut switch = None;
        let mut log_out = false;
        egui::TopBottomPanel::top("tab_strip").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Knowledge Hub");
                ui.separator();
                for (label, view) in [
                    ("Messages", MainView::Messages),
                    ("Forum", MainView::Forum),
                    ("Meetings", MainView::Meetings),
                ] {
                    if ui.selectable_label(self.state.view == view, label).clicked() {
                        switch = Some(view);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        log_out = true;
                    }
                    if ui.button("Feedback").clicked() {
                        self.state.feedback_open = true;
                    }
                    if let Some(session) = &self.state.session {
                        ui.label(egui::RichText::new(&session.user.email).weak());
                    }
                });
            });
        });

        if let Some(view) = switch {
            self.switch_view(view);
        }
        if log_out {
            self.send_command(AppCommand::LogOut);
        }
    }

    fn render_messages_view(&mut self, ctx: &egui::Context) {
        let action = egui::SidePanel::left("contacts_sidebar")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| sidebar::render(ui, &mut self.state))
            .inner;

        if let Some(partner) = action.open_chat {
            self.send_command(AppCommand::SelectConversation(partner));
        }
        if let Some(category) = action.find_expert {
            self.send_command(AppCommand::FindExpert { category });
        }
        if action.refresh_contacts {
            self.send_command(AppCommand::RefreshContacts);
        }

        let (close, body) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if self.state.partner.is_none() {
                    ui.label("Select a conversation from the sidebar.");
                    return (false, None);
                }
                let close = chat_area::render(ui, &mut self.state);
                ui.separator();
                let body = input_bar::render(ui, &mut self.state.draft);
                (close, body)
            })
            .inner;

        if let Some(body) = body {
            self.send_command(AppCommand::SendMessage { body });
        }
        if close {
            self.state.partner = None;
            self.state.messages.clear();
            self.send_command(AppCommand::DeselectConversation);
        }
    }

    fn render_central_panel(&mut self, ctx: &egui::Context, view: MainView) {
        let commands = egui::CentralPanel::default()
            .show(ctx, |ui| match view {
                MainView::Forum => forum_panel::render(ui, &mut self.state),
                MainView::Meetings => meetings_panel::render(ui, &mut self.state),
                MainView::Messages => Vec::new(),
            })
            .inner;
        for command in commands {
            self.send_command(command);
        }
    }
}

impl eframe::App for HubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_backend_events();

        // an expert lookup or feedback reply queued a conversation
        if let Some(partner) = self.state.pending_chat.take() {
            self.send_command(AppCommand::SelectConversation(partner));
        }

        if self.state.session.is_none() {
            let command = egui::CentralPanel::default()
                .show(ctx, |ui| login_panel::render(ui, &mut self.state))
                .inner;
            if let Some(command) = command {
                self.send_command(command);
            }
            ctx.request_repaint();
            return;
        }

        self.render_tab_strip(ctx);

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            status_line::render(ui, &mut self.state);
        });

        let feedback_commands = feedback_window::render(ctx, &mut self.state);
        for command in feedback_commands {
            self.send_command(command);
        }

        match self.state.view {
            MainView::Messages => self.render_messages_view(ctx),
            view => self.render_central_panel(ctx, view),
        }

        ctx.request_repaint();
    }
}
