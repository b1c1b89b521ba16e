//! The seam between the tray state machine and the operating system.
//!
//! [`Shell`] covers the three collaborators the core needs: the image
//! loader, the windowing subsystem and the shell notification API.
//! [`Win32Shell`] is the production implementation on Windows.

#[cfg(target_os = "windows")]
mod win32;

#[cfg(target_os = "windows")]
pub use win32::{Win32Shell, run_message_loop};

use crate::{ImageKind, Message, TrayDescriptor};

use std::{num::NonZeroU32, path::Path, rc::Weak};

/// Native window handle owned by one `NotifyIcon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// Native image handle returned by the image loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub isize);

/// Operation submitted to the shell notification API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOp {
    /// Add the icon to the notification area.
    Add,
    /// Replace the icon's tooltip or image.
    Modify,
    /// Remove the icon from the notification area.
    Delete,
    /// Select the callback protocol version.
    SetVersion,
}

/// How a window procedure treated a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Fully handled; the procedure returns 0.
    Handled,
    /// Not ours; forward to the default window procedure.
    PassThrough,
}

/// Receiver for every message delivered to a message window.
pub trait MessageHandler {
    /// Handle one message on the window's owning thread.
    fn handle(&self, message: Message) -> Disposition;
}

/// Operating system services used by the tray core.
///
/// Every fallible call reports the OS error code on failure. Implementations
/// are used from the thread that created the window only.
pub trait Shell: Clone + 'static {
    /// Load an image file of the given kind.
    fn load_image(&self, path: &Path, kind: ImageKind) -> Result<ImageHandle, u32>;

    /// Release a handle previously returned by [`Shell::load_image`].
    fn release_image(&self, handle: ImageHandle, kind: ImageKind);

    /// Register a window class whose procedure routes to message targets.
    fn register_class(&self, class_name: &str) -> Result<(), u32>;

    /// Create a message-only window of a registered class.
    ///
    /// Every message delivered to the window is passed to `target` while it
    /// can be upgraded. The upgraded reference is held for the whole
    /// [`MessageHandler::handle`] call, so a handler that drops its owner
    /// mid-dispatch stays alive until it returns.
    fn create_window(
        &self,
        class_name: &str,
        target: Weak<dyn MessageHandler>,
    ) -> Result<WindowHandle, u32>;

    /// Destroy a window. No message reaches its target after this returns.
    fn destroy_window(&self, window: WindowHandle) -> Result<(), u32>;

    /// Queue a close request for a window.
    fn post_close(&self, window: WindowHandle) -> Result<(), u32>;

    /// Ask the thread's message loop to exit.
    fn post_quit(&self, exit_code: i32);

    /// Submit a descriptor to the shell notification API.
    fn notify(&self, op: NotifyOp, descriptor: &TrayDescriptor) -> Result<(), u32>;

    /// Identifier of the broadcast sent when the notification area is recreated.
    fn restart_message(&self) -> Option<NonZeroU32>;
}
