//! Notify-Tray: a Windows notification-area icon that logs its interactions.

mod config;
mod error;
mod logging;
#[cfg(target_os = "windows")]
mod tray_host;

pub(crate) use error::{AppError, Result as AppResult};

use crate::config::{Config, LoggingConfig};

use tracing::{error, info};

/// Application entry point.
fn main() {
    let config = Config::load();

    let logging = match &config {
        Ok(c) => c.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    logging::init(&logging);

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    info!(tooltip = %config.tray.tooltip, icon_path = ?config.tray.icon_path, "Configuration ready");

    std::process::exit(run(&config));
}

#[cfg(target_os = "windows")]
fn run(config: &Config) -> i32 {
    // TrayHost lives on the main thread - its window is owned by this thread.
    match tray_host::TrayHost::new(&config.tray) {
        Ok(host) => host.run(),
        Err(e) => {
            error!("Failed to create TrayHost: {:?}", e);
            1
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn run(_config: &Config) -> i32 {
    use std::panic::Location;

    use error_location::ErrorLocation;

    let e = AppError::UnsupportedPlatform {
        location: ErrorLocation::from(Location::caller()),
    };
    error!("Failed to create TrayHost: {:?}", e);
    1
}
