//! Keystroke injection seam.
//!
//! Injection runs inline on the event-dispatch path, so implementations must
//! return quickly: hand the keystroke off and return, do not wait for the
//! host to process it.  [`KeystrokeInjector::flush`] is the one place where
//! waiting is allowed, and it must be bounded.

use jogkey_core::Keystroke;
use thiserror::Error;

/// Error type for keystroke injection.
#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status} for {chord}")]
    Failed {
        program: String,
        chord: String,
        status: std::process::ExitStatus,
    },
    #[error("injector error: {0}")]
    Platform(String),
}

/// Delivers keystrokes to the host input stream.
pub trait KeystrokeInjector: Send + Sync {
    /// Injects one keystroke (modifiers down, key tap, modifiers up).
    fn send_keystroke(&self, keystroke: &Keystroke) -> Result<(), InjectionError>;

    /// Waits, for a bounded time, until pending keystrokes are delivered.
    fn flush(&self) -> Result<(), InjectionError>;
}
