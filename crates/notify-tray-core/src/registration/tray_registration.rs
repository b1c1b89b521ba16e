//! Add, modify and delete of one notification-area entry.
//!
//! Shell failures are logged and never propagated. A failed add still counts
//! as registered so the matching delete is always submitted; the next
//! restart broadcast retries the add.

use crate::{ImageHandle, NotifyOp, Shell, Tooltip, TrayDescriptor, WindowHandle};

use std::cell::{Cell, RefCell};

use tracing::{debug, warn};

/// Owns the descriptor and whether an add is outstanding without a delete.
///
/// Borrows are never held across shell calls: the shell may dispatch sent
/// messages back into the owning window while a call is in flight.
pub(crate) struct TrayRegistration {
    descriptor: RefCell<TrayDescriptor>,
    registered: Cell<bool>,
}

impl TrayRegistration {
    pub(crate) fn new(descriptor: TrayDescriptor) -> Self {
        Self {
            descriptor: RefCell::new(descriptor),
            registered: Cell::new(false),
        }
    }

    pub(crate) fn bind_window(&self, window: WindowHandle) {
        self.descriptor.borrow_mut().window = window;
    }

    /// Copy of the current descriptor.
    pub(crate) fn descriptor(&self) -> TrayDescriptor {
        self.descriptor.borrow().clone()
    }

    pub(crate) fn is_registered(&self) -> bool {
        self.registered.get()
    }

    /// Submit `Add` then `SetVersion` with the current descriptor.
    pub(crate) fn add<S: Shell>(&self, shell: &S) {
        let descriptor = self.descriptor();

        let added = submit(shell, NotifyOp::Add, &descriptor);
        submit(shell, NotifyOp::SetVersion, &descriptor);

        self.registered.set(true);
        debug!(added, "Tray entry submitted");
    }

    /// Submit `Delete` once per outstanding add.
    pub(crate) fn remove<S: Shell>(&self, shell: &S) {
        if !self.registered.replace(false) {
            debug!("Tray entry not registered, nothing to delete");
            return;
        }

        let descriptor = self.descriptor();
        submit(shell, NotifyOp::Delete, &descriptor);
    }

    pub(crate) fn set_tooltip<S: Shell>(&self, shell: &S, tooltip: Tooltip) {
        self.descriptor.borrow_mut().tooltip = tooltip;
        self.update(shell);
    }

    pub(crate) fn set_icon<S: Shell>(&self, shell: &S, icon: Option<ImageHandle>) {
        self.descriptor.borrow_mut().set_icon(icon);
        self.update(shell);
    }

    /// Resubmit with `Modify` while an add is outstanding.
    fn update<S: Shell>(&self, shell: &S) {
        if !self.registered.get() {
            return;
        }

        let descriptor = self.descriptor();
        submit(shell, NotifyOp::Modify, &descriptor);
    }
}

fn submit<S: Shell>(shell: &S, op: NotifyOp, descriptor: &TrayDescriptor) -> bool {
    match shell.notify(op, descriptor) {
        Ok(()) => true,
        Err(code) => {
            warn!(op = ?op, code, "Shell notification call failed");
            false
        }
    }
}
