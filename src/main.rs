use std::time::Duration;

use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;

use knowledge_hub::api::ApiClient;
use knowledge_hub::config;
use knowledge_hub::net::BackendWorker;
use knowledge_hub::ui::HubApp;

#[derive(Parser)]
#[command(
    name = "knowledge-hub",
    version,
    about = "Desktop client for the Knowledge Hub platform"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Backend base URL (overrides config and environment)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    app_config.apply_env_overrides();
    if let Some(url) = cli.api_url {
        app_config.api_base_url = url;
    }

    // UI -> worker
    let (command_sender, command_receiver) = mpsc::channel(100);
    // worker -> UI
    let (event_sender, event_receiver) = mpsc::channel(100);

    let api = match ApiClient::new(&app_config.api_base_url, app_config.api_key.clone()) {
        Ok(api) => api,
        Err(err) => {
            log::error!("Failed to build HTTP client: {err}");
            return Ok(());
        }
    };
    let poll_interval = Duration::from_millis(app_config.poll_interval_ms);

    tokio::spawn(async move {
        BackendWorker::new(api, poll_interval, event_sender, command_receiver)
            .run()
            .await;
    });

    log::info!(
        "Client started against {} (poll every {} ms)",
        app_config.api_base_url,
        app_config.poll_interval_ms
    );

    let options = eframe::NativeOptions::default();
    let mut event_receiver = Some(event_receiver);

    eframe::run_native(
        "Knowledge Hub",
        options,
        Box::new(move |cc| {
            let receiver = event_receiver
                .take()
                .expect("HubApp should only be initialized once");
            Ok(Box::new(HubApp::new(cc, command_sender.clone(), receiver)))
        }),
    )
}
