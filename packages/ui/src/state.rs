//! Mutable state holders the controllers write through.
//!
//! The workflow and record-sync drivers are plain async functions. They take a
//! [`StateCell`] instead of a concrete `Signal` so they run unchanged inside a
//! component (where every write re-renders) and in tests.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

/// Somewhere a piece of view state lives.
///
/// Both methods return `None` when the state no longer exists, e.g. a request
/// finishing after its screen was torn down. Callers treat that as a no-op.
pub trait StateCell<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
}

impl<T: 'static> StateCell<T> for Signal<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.try_write().ok()?;
        Some(f(&mut *guard))
    }

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.try_peek().ok()?;
        Some(f(&*guard))
    }
}

/// Shared, single-threaded cell for driving controllers outside a component.
#[derive(Debug, Default)]
pub struct SharedCell<T>(Rc<RefCell<T>>);

impl<T> SharedCell<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }
}

impl<T: Clone> SharedCell<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for SharedCell<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> StateCell<T> for SharedCell<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.0.try_borrow_mut().ok()?;
        Some(f(&mut guard))
    }

    fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.0.try_borrow().ok()?;
        Some(f(&guard))
    }
}
