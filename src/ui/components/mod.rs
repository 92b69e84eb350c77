pub mod chat_area;
pub mod feedback_window;
pub mod forum_panel;
pub mod input_bar;
pub mod login_panel;
pub mod meetings_panel;
pub mod sidebar;
pub mod status_line;
