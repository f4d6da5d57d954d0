//! Observable loading flag for in-flight conversion requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

type Listener = Box<dyn Fn(bool) + Send + Sync>;

#[derive(Default)]
struct Inner {
    in_flight: usize,
    listeners: Vec<Listener>,
}

/// `true` while at least one request is in flight.
///
/// Listeners are called on every change of the flag, with the lock held, so they
/// must not register further listeners.
#[derive(Default)]
pub struct LoadingState {
    loading: AtomicBool,
    inner: Mutex<Inner>,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.lock().listeners.push(Box::new(listener));
    }

    /// Marks a request as started. The flag settles when the guard drops.
    pub fn begin(&self) -> LoadingGuard<'_> {
        let mut inner = self.lock();
        inner.in_flight += 1;
        if inner.in_flight == 1 {
            self.set(&inner, true);
        }
        LoadingGuard { state: self }
    }

    fn settle(&self) {
        let mut inner = self.lock();
        inner.in_flight = inner.in_flight.saturating_sub(1);
        if inner.in_flight == 0 {
            self.set(&inner, false);
        }
    }

    fn set(&self, inner: &Inner, value: bool) {
        if self.loading.swap(value, Ordering::SeqCst) == value {
            return;
        }
        debug!(loading = value, "Loading state changed");
        for listener in &inner.listeners {
            listener(value);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles its request on drop, whether it succeeded, failed or was abandoned.
pub struct LoadingGuard<'a> {
    state: &'a LoadingState,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.settle();
    }
}
