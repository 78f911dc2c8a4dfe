//! Mock keystroke injector for unit and integration testing.
//!
//! Records every keystroke in a `Mutex<Vec<...>>` so tests can assert
//! exactly what reached the host and in what order.  The injector is usually
//! wrapped in an `Arc`, with one clone handed to the session controller and
//! one kept by the test.
//!
//! # `should_fail` flag
//!
//! [`MockKeystrokeInjector::failing`] builds an injector whose every call
//! returns [`InjectionError::Platform`], for testing error paths.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use jogkey_core::Keystroke;

use crate::application::inject_keystrokes::{InjectionError, KeystrokeInjector};

/// An injector that records keystrokes without touching the host.
#[derive(Debug, Default)]
pub struct MockKeystrokeInjector {
    /// Every keystroke passed to `send_keystroke`, in order.
    pub keystrokes: Mutex<Vec<Keystroke>>,
    flushes: AtomicUsize,
    /// When `true`, every method returns an error and records nothing.
    pub should_fail: bool,
}

impl MockKeystrokeInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// An injector whose every call fails.
    pub fn failing() -> Self {
        Self { should_fail: true, ..Self::default() }
    }

    /// Returns a copy of the recorded keystrokes.
    pub fn sent(&self) -> Vec<Keystroke> {
        self.keystrokes.lock().expect("lock poisoned").clone()
    }

    /// Number of `flush` calls.
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl KeystrokeInjector for MockKeystrokeInjector {
    fn send_keystroke(&self, keystroke: &Keystroke) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.keystrokes.lock().expect("lock poisoned").push(*keystroke);
        Ok(())
    }

    fn flush(&self) -> Result<(), InjectionError> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        Ok(())
    }
}
