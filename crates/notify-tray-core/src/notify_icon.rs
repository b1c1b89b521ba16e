//! One notification-area icon and the window procedure that drives it.
//!
//! Construction loads nothing itself: it creates the message window,
//! describes the icon to the shell and adds it. From then on the shell talks
//! to the instance only through messages delivered to [`MessageHandler::handle`].

use crate::{
    ButtonAction, ButtonEvent, CALLBACK_MESSAGE, Disposition, EventRouter, Icon, Message,
    MessageHandler, MouseButton, Point, Shell, Tooltip, TrayDescriptor, TrayRegistration,
    TrayResult, WindowHandle,
    message::{WM_CLOSE, WM_COMMAND, WM_DESTROY},
    window::{create_message_window, unique_class_name},
};

use std::{
    cell::{Cell, RefCell},
    num::NonZeroU32,
    rc::Rc,
};

use tracing::{debug, info, instrument, warn};

/// Lifecycle of the message window as seen by the window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Window exists and routes events.
    Active,
    /// Destruction has been requested.
    Destroying,
    /// Window is gone; no further messages arrive.
    Destroyed,
}

struct Inner<S: Shell> {
    shell: S,
    class_name: String,
    window: Cell<WindowHandle>,
    state: Cell<DispatchState>,
    restart_message: Option<NonZeroU32>,
    router: EventRouter,
    registration: TrayRegistration,
    icon: RefCell<Option<Icon<S>>>,
}

impl<S: Shell> Inner<S> {
    /// Destroy the window once; later requests are ignored.
    fn request_destroy(&self) {
        if self.state.get() != DispatchState::Active {
            return;
        }

        self.state.set(DispatchState::Destroying);

        let window = self.window.get();
        if let Err(code) = self.shell.destroy_window(window) {
            warn!(window = ?window, code, "Failed to destroy message window");
        }

        self.state.set(DispatchState::Destroyed);
    }
}

impl<S: Shell> MessageHandler for Inner<S> {
    fn handle(&self, message: Message) -> Disposition {
        if self
            .restart_message
            .is_some_and(|restart| restart.get() == message.id)
        {
            info!(class_name = %self.class_name, "Notification area recreated, re-adding icon");
            self.registration.add(&self.shell);
            return Disposition::Handled;
        }

        match message.id {
            CALLBACK_MESSAGE => self.router.route_callback(message),
            WM_COMMAND => self.router.route_menu_command(message),
            WM_CLOSE => {
                debug!(class_name = %self.class_name, "Close requested");
                self.request_destroy();
            }
            WM_DESTROY => {
                self.registration.remove(&self.shell);
                self.shell.post_quit(0);
                self.state.set(DispatchState::Destroyed);
                debug!(class_name = %self.class_name, "Message window destroyed");
            }
            _ => return Disposition::PassThrough,
        }

        Disposition::Handled
    }
}

/// An icon in the notification area with typed mouse and menu events.
///
/// Must be created, used and dropped on the thread that runs its message
/// loop. Dropping it disposes it; call [`NotifyIcon::dispose`] to control
/// when the entry disappears. Dropping it from one of its own callbacks is
/// allowed: the remaining callbacks of that event still run.
pub struct NotifyIcon<S: Shell> {
    inner: Rc<Inner<S>>,
    disposed: bool,
}

impl<S: Shell> NotifyIcon<S> {
    /// Create the message window and add the icon through `shell`.
    ///
    /// Fails without adding anything to the notification area if the window
    /// class or the window cannot be created.
    #[track_caller]
    #[instrument(skip(shell, icon))]
    pub fn with_shell(shell: S, tooltip: &str, icon: Option<Icon<S>>) -> TrayResult<Self> {
        let class_name = unique_class_name();
        let restart_message = shell.restart_message();
        let descriptor = TrayDescriptor::new(
            WindowHandle(0),
            Tooltip::new(tooltip),
            icon.as_ref().map(Icon::handle),
        );

        let inner = Rc::new(Inner {
            shell,
            class_name,
            window: Cell::new(WindowHandle(0)),
            state: Cell::new(DispatchState::Active),
            restart_message,
            router: EventRouter::new(),
            registration: TrayRegistration::new(descriptor),
            icon: RefCell::new(icon),
        });

        let target = Rc::downgrade(&inner);
        let window = create_message_window(&inner.shell, &inner.class_name, target)?;

        inner.window.set(window);
        inner.registration.bind_window(window);
        inner.registration.add(&inner.shell);

        info!(class_name = %inner.class_name, window = ?window, "Tray icon created");

        Ok(Self {
            inner,
            disposed: false,
        })
    }

    fn inner(&self) -> &Inner<S> {
        &self.inner
    }

    /// Native handle of the message window, e.g. to own a popup menu.
    pub fn window_handle(&self) -> WindowHandle {
        self.inner().window.get()
    }

    /// Current lifecycle state of the message window.
    pub fn state(&self) -> DispatchState {
        self.inner().state.get()
    }

    /// Snapshot of what is submitted to the shell.
    pub fn descriptor(&self) -> TrayDescriptor {
        self.inner().registration.descriptor()
    }

    /// True while an add is outstanding without a matching delete.
    pub fn is_registered(&self) -> bool {
        self.inner().registration.is_registered()
    }

    /// Current tooltip text.
    pub fn tooltip(&self) -> String {
        self.descriptor().tooltip.to_string()
    }

    /// Replace the tooltip and update the shell entry.
    #[instrument(skip(self))]
    pub fn set_tooltip(&self, tooltip: &str) {
        let inner = self.inner();
        inner
            .registration
            .set_tooltip(&inner.shell, Tooltip::new(tooltip));
    }

    /// Replace or clear the image and update the shell entry.
    ///
    /// The previous image is released after the shell has the new one.
    pub fn set_icon(&self, icon: Option<Icon<S>>) {
        let inner = self.inner();
        inner
            .registration
            .set_icon(&inner.shell, icon.as_ref().map(Icon::handle));

        let previous = inner.icon.replace(icon);
        drop(previous);
    }

    /// Ask the message window to close. The entry is removed when it is destroyed.
    pub fn close(&self) {
        let inner = self.inner();
        if let Err(code) = inner.shell.post_close(inner.window.get()) {
            warn!(code, "Failed to post close request");
        }
    }

    /// Subscribe to one of the nine button events.
    ///
    /// Subscribing from a callback of the same event is queued: the new
    /// callback first runs on the next occurrence.
    pub fn on_button(&self, event: ButtonEvent, callback: impl FnMut(Point) + 'static) {
        self.inner().router.button(event).subscribe(Box::new(callback));
    }

    /// Left button pressed.
    pub fn on_left_button_down(&self, callback: impl FnMut(Point) + 'static) {
        self.on_button(ButtonEvent::new(MouseButton::Left, ButtonAction::Down), callback);
    }

    /// Left button released.
    pub fn on_left_button_up(&self, callback: impl FnMut(Point) + 'static) {
        self.on_button(ButtonEvent::new(MouseButton::Left, ButtonAction::Up), callback);
    }

    /// Left button double-clicked.
    pub fn on_left_button_double_click(&self, callback: impl FnMut(Point) + 'static) {
        self.on_button(
            ButtonEvent::new(MouseButton::Left, ButtonAction::DoubleClick),
            callback,
        );
    }

    /// Middle button pressed.
    pub fn on_middle_button_down(&self, callback: impl FnMut(Point) + 'static) {
        self.on_button(ButtonEvent::new(MouseButton::Middle, ButtonAction::Down), callback);
    }

    /// Middle button released.
    pub fn on_middle_button_up(&self, callback: impl FnMut(Point) + 'static) {
        self.on_button(ButtonEvent::new(MouseButton::Middle, ButtonAction::Up), callback);
    }

    /// Middle button double-clicked.
    pub fn on_middle_button_double_click(&self, callback: impl FnMut(Point) + 'static) {
        self.on_button(
            ButtonEvent::new(MouseButton::Middle, ButtonAction::DoubleClick),
            callback,
        );
    }

    /// Right button pressed.
    pub fn on_right_button_down(&self, callback: impl FnMut(Point) + 'static) {
        self.on_button(ButtonEvent::new(MouseButton::Right, ButtonAction::Down), callback);
    }

    /// Right button released.
    pub fn on_right_button_up(&self, callback: impl FnMut(Point) + 'static) {
        self.on_button(ButtonEvent::new(MouseButton::Right, ButtonAction::Up), callback);
    }

    /// Right button double-clicked.
    pub fn on_right_button_double_click(&self, callback: impl FnMut(Point) + 'static) {
        self.on_button(
            ButtonEvent::new(MouseButton::Right, ButtonAction::DoubleClick),
            callback,
        );
    }

    /// Menu item chosen from a menu owned by [`NotifyIcon::window_handle`].
    ///
    /// As with [`NotifyIcon::on_button`], a subscription made while menu
    /// callbacks are running takes effect from the next command.
    pub fn on_menu_command(&self, callback: impl FnMut(u16) + 'static) {
        self.inner()
            .router
            .menu_command()
            .subscribe(Box::new(callback));
    }

    /// Remove the entry from the notification area, then destroy the window.
    ///
    /// Runs at most once; later calls do nothing. Never fails: teardown
    /// errors are logged.
    #[instrument(skip(self))]
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let inner = self.inner();
        inner.registration.remove(&inner.shell);
        inner.request_destroy();

        info!(class_name = %inner.class_name, "Tray icon disposed");
    }

    #[cfg(test)]
    pub(crate) fn dispatch(&self, message: Message) -> Disposition {
        self.inner().handle(message)
    }
}

impl<S: Shell> Drop for NotifyIcon<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
