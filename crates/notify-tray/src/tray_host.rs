//! The tray icon this binary shows, wired to log every interaction.

use crate::{AppResult, config::TrayConfig};

use notify_tray_core::{
    ButtonEvent, Icon, NotifyIcon, Shell, Win32Shell, WindowHandle, run_message_loop,
};

use tracing::{error, info, instrument};

/// Owns the notification-area icon for the lifetime of the message loop.
pub(crate) struct TrayHost {
    notify_icon: NotifyIcon<Win32Shell>,
}

impl TrayHost {
    /// Load the configured image and add the icon.
    ///
    /// A configured image that fails to load is fatal.
    #[track_caller]
    #[instrument]
    pub(crate) fn new(config: &TrayConfig) -> AppResult<Self> {
        let icon = match &config.icon_path {
            Some(path) => Some(Icon::from_file(path)?),
            None => None,
        };

        let notify_icon = NotifyIcon::new(&config.tooltip, icon)?;
        Self::subscribe(&notify_icon);

        info!("System tray icon initialized");

        Ok(Self { notify_icon })
    }

    fn subscribe(notify_icon: &NotifyIcon<Win32Shell>) {
        for event in ButtonEvent::ALL {
            notify_icon.on_button(event, move |point| {
                info!(
                    button = ?event.button,
                    action = ?event.action,
                    x = point.x,
                    y = point.y,
                    "Tray button event"
                );
            });
        }

        notify_icon.on_menu_command(|command| info!(command, "Menu command"));

        // Double-click exits: the close request destroys the window, which
        // removes the icon and ends the message loop.
        let window = notify_icon.window_handle();
        notify_icon.on_left_button_double_click(move |_| request_exit(window));
    }

    /// Pump messages until the window is destroyed; returns the exit code.
    #[instrument(skip(self))]
    pub(crate) fn run(mut self) -> i32 {
        info!(window = ?self.notify_icon.window_handle(), "Notify Tray running");

        let exit_code = run_message_loop();
        self.notify_icon.dispose();

        info!(exit_code, "Notify Tray shut down successfully");
        exit_code
    }
}

fn request_exit(window: WindowHandle) {
    info!("Exit requested from tray icon");
    if let Err(code) = Win32Shell.post_close(window) {
        error!(code, "Failed to request close");
    }
}
