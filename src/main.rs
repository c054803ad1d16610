mod address;
mod api;
mod app;
mod config;
mod executor;
mod flow;
mod messages;
mod password;
mod utils;

use app::WalletVerifyApp;
use config::AppConfig;
use iced::{Application, Settings};

fn main() -> iced::Result {
    let _ = env_logger::try_init();
    let config = AppConfig::load();
    let mut settings = Settings::with_flags(config);
    settings.window.resizable = false;
    settings.window.size = (800, 600);
    WalletVerifyApp::run(settings)
}
