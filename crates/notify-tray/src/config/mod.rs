#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod tray_config;

pub(crate) use {config::Config, logging_config::LoggingConfig, tray_config::TrayConfig};

pub(crate) const DEFAULT_TOOLTIP: &str = "Notify Tray";
pub(crate) const DEFAULT_LOG_FILTER: &str = "notify_tray=debug,notify_tray_core=debug";

pub(crate) fn default_tooltip() -> String {
    DEFAULT_TOOLTIP.to_string()
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
