use iced::{Application, Settings, Size};
use shutter_core::ButtonConfig;
use tracing::{info, warn};

mod app;
mod ui;

use app::ShutterApp;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("info,shutter=debug,shutter_core=debug")
        .init();

    info!("Starting Shutter v{}", env!("CARGO_PKG_VERSION"));

    let config_path = ButtonConfig::default_path();
    let config = match ButtonConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config at {:?}: {}", config_path, e);
            ButtonConfig::default()
        }
    };

    ShutterApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(720.0, 520.0),
            min_size: Some(Size::new(560.0, 420.0)),
            position: iced::window::Position::Centered,
            ..Default::default()
        },
        ..Settings::with_flags(config)
    })?;

    Ok(())
}
