use std::cell::RefCell;

use tracing::debug;

type Observer<T> = Box<dyn FnMut(T)>;

/// Zero or more callbacks subscribed to one event.
pub(crate) struct Observers<T: Copy> {
    callbacks: RefCell<Vec<Observer<T>>>,
    pending: RefCell<Vec<Observer<T>>>,
}

impl<T: Copy> Observers<T> {
    pub(crate) fn new() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Add a callback. While the set is running it is queued and joins once
    /// the running invocation finishes, so it first sees the next event.
    pub(crate) fn subscribe(&self, callback: Observer<T>) {
        match self.callbacks.try_borrow_mut() {
            Ok(mut callbacks) => callbacks.push(callback),
            Err(_) => {
                debug!("Observer set running, subscription queued");
                self.pending.borrow_mut().push(callback);
            }
        }
    }

    /// Call every observer with `arg`. A nested call for the same set is dropped.
    pub(crate) fn invoke(&self, arg: T) {
        let Ok(mut callbacks) = self.callbacks.try_borrow_mut() else {
            debug!("Observer set already running, nested event dropped");
            return;
        };

        for callback in callbacks.iter_mut() {
            callback(arg);
        }

        callbacks.append(&mut self.pending.borrow_mut());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.callbacks.borrow().len() + self.pending.borrow().len()
    }
}
