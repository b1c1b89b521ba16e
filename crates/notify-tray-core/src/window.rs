//! Hidden message-only window that receives tray callbacks.

use crate::{MessageHandler, Shell, TrayError, TrayResult, WindowHandle};

use std::{panic::Location, rc::Weak};

use error_location::ErrorLocation;
use tracing::{debug, instrument};
use uuid::Uuid;

const CLASS_PREFIX: &str = "NotifyTray_MessageWindow";

/// A window class name unique to this process and instance.
pub(crate) fn unique_class_name() -> String {
    format!("{}_{}", CLASS_PREFIX, Uuid::new_v4().simple())
}

/// Register a fresh class and create one message-only window of it.
///
/// Neither step is retried. A failed creation leaves the class registered;
/// its name is never reused.
#[track_caller]
#[instrument(skip(shell, target))]
pub(crate) fn create_message_window<S: Shell>(
    shell: &S,
    class_name: &str,
    target: Weak<dyn MessageHandler>,
) -> TrayResult<WindowHandle> {
    shell
        .register_class(class_name)
        .map_err(|code| TrayError::ClassRegistrationFailed {
            class_name: class_name.to_string(),
            code,
            location: ErrorLocation::from(Location::caller()),
        })?;

    let window = shell
        .create_window(class_name, target)
        .map_err(|code| TrayError::WindowCreationFailed {
            class_name: class_name.to_string(),
            code,
            location: ErrorLocation::from(Location::caller()),
        })?;

    debug!(class_name, window = ?window, "Message window created");

    Ok(window)
}
