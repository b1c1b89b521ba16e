use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Construction-time tray errors with source location tracking.
///
/// Every variant is fatal to the instance being built: no partially usable
/// object is ever returned alongside one of these.
#[derive(Error, Debug)]
pub enum TrayError {
    /// Image file extension is not one of `.ico`, `.bmp` or `.cur`.
    #[error("Unsupported image format: {path:?} {location}")]
    UnsupportedFormat {
        /// Path whose extension was rejected.
        path: PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The OS image loader returned an invalid handle.
    #[error("Failed to load image {path:?}, code: {code} {location}")]
    ResourceLoadFailed {
        /// Path that was handed to the loader.
        path: PathBuf,
        /// OS error code reported by the loader.
        code: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Registering the message window class failed.
    #[error("Window class registration failed for {class_name}, code: {code} {location}")]
    ClassRegistrationFailed {
        /// Class name that could not be registered.
        class_name: String,
        /// OS error code reported by the registration call.
        code: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Creating the message-only window failed.
    #[error("Message window creation failed for {class_name}, code: {code} {location}")]
    WindowCreationFailed {
        /// Class the window was created from.
        class_name: String,
        /// OS error code reported by the creation call.
        code: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`TrayError`].
pub type Result<T> = std::result::Result<T, TrayError>;
