pub mod app;
pub mod components;
pub mod format;
pub mod state;

pub use app::HubApp;
pub use state::{AppState, AuthView, MainView};
