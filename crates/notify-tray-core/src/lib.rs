//! Notify Tray Core Library
//!
//! A single icon in the Windows notification area, driven by a hidden
//! message-only window. Button and menu messages become typed callbacks and
//! the icon is re-added automatically when the shell recreates the tray.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(target_os = "windows")]
//! # fn main() -> notify_tray_core::TrayResult<()> {
//! use notify_tray_core::{Icon, NotifyIcon, run_message_loop};
//!
//! use std::path::Path;
//!
//! let icon = Icon::from_file(Path::new("app.ico"))?;
//! let mut tray = NotifyIcon::new("Hello", Some(icon))?;
//!
//! tray.on_left_button_double_click(|point| println!("clicked at {point:?}"));
//! tray.on_menu_command(|id| println!("menu command {id}"));
//!
//! run_message_loop();
//! tray.dispose();
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "windows"))]
//! # fn main() {}
//! ```

mod error;
mod icon;
pub mod message;
mod notify_icon;
mod registration;
mod router;
mod shell;
mod window;

pub use {
    error::{Result as TrayResult, TrayError},
    icon::{Icon, ImageKind},
    message::{CALLBACK_MESSAGE, Message},
    notify_icon::{DispatchState, NotifyIcon},
    registration::{
        DescriptorFlags, NOTIFYICON_VERSION_4, TOOLTIP_CAPACITY, Tooltip, TrayDescriptor,
    },
    router::{ButtonAction, ButtonEvent, MouseButton, Point},
    shell::{Disposition, ImageHandle, MessageHandler, NotifyOp, Shell, WindowHandle},
};

#[cfg(target_os = "windows")]
pub use shell::{Win32Shell, run_message_loop};

pub(crate) use {registration::TrayRegistration, router::EventRouter};

#[cfg(test)]
mod tests;
