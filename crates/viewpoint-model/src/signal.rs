//! Observable single-slot cells.
//!
//! A control only ever *writes* to an attached cell; any number of observers
//! read or subscribe to it. Cells are supplied by the host; controls never
//! create or own them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A single-slot observable value with last-write-wins semantics.
///
/// Methods take `&self`: cells are shared through `Rc` and mutate through
/// interior mutability. The trait is object safe so controls can hold an
/// `Rc<dyn Observable<Triple>>` without knowing the concrete cell type.
pub trait Observable<T> {
    /// Current value.
    fn get(&self) -> T;

    /// Overwrite the value and notify subscribers.
    fn set(&self, value: T);

    /// Register `callback`. It stays registered until the returned
    /// [`Subscription`] is dropped.
    fn subscribe(&self, callback: Box<dyn FnMut(&T)>) -> Subscription;
}

// ── Subscription ──────────────────────────────────────────────────────────

/// Guard for a registered subscriber. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the action that removes the subscriber.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Unsubscribe now.
    pub fn unsubscribe(self) {}

    /// Keep the subscriber registered for the lifetime of the cell.
    pub fn forget(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.cancel.is_some()).finish()
    }
}

// ── Signal ────────────────────────────────────────────────────────────────

type Callback<T> = Rc<RefCell<Box<dyn FnMut(&T)>>>;

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// Single-threaded reference [`Observable`].
///
/// Cloning yields another handle to the same cell.
///
/// - `subscribe` runs the callback once with the current value, then on every change.
/// - `set` with a value equal to the current one does not notify.
/// - Callbacks run with no internal borrow held, so they may call [`get`](Observable::get).
///   A callback that re-enters `set` on the same cell is not re-invoked recursively.
pub struct Signal<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner { value, next_id: 0, subscribers: Vec::new() })),
        }
    }

    /// Convenience over [`Observable::subscribe`] that boxes the closure.
    pub fn watch(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        self.subscribe(Box::new(callback))
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> =
            self.inner.borrow().subscribers.iter().map(|(_, cb)| cb.clone()).collect();
        for cb in callbacks {
            // Already borrowed means this callback is the one re-entering `set`.
            if let Ok(mut f) = cb.try_borrow_mut() {
                (*f)(value);
            }
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> for Signal<T> {
    fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value.clone();
        }
        self.notify(&value);
    }

    fn subscribe(&self, callback: Box<dyn FnMut(&T)>) -> Subscription {
        let cb: Callback<T> = Rc::new(RefCell::new(callback));
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, cb.clone()));
            id
        };

        let current = self.get();
        if let Ok(mut f) = cb.try_borrow_mut() {
            (*f)(&current);
        }

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().subscribers.retain(|(i, _)| *i != id);
            }
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Signal")
                .field("value", &inner.value)
                .field("subscribers", &inner.subscribers.len())
                .finish(),
            Err(_) => f.write_str("Signal { <borrowed> }"),
        }
    }
}
