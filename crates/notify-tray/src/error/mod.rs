use notify_tray_core::TrayError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the notify-tray binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Tray subsystem error from notify-tray-core.
    #[error("Tray error: {source} {location}")]
    Tray {
        /// The underlying tray error.
        #[source]
        source: TrayError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The notification area is only available on Windows.
    #[cfg_attr(target_os = "windows", allow(dead_code))]
    #[error("The notification area is not available on this platform {location}")]
    UnsupportedPlatform {
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<TrayError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<TrayError> for AppError {
    #[track_caller]
    fn from(source: TrayError) -> Self {
        AppError::Tray {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
