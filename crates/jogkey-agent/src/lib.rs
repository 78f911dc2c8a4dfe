//! jogkey-agent library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the agent do? (for beginners)
//!
//! The agent owns one controller session from start to finish:
//!
//! 1. Authenticates the device and puts it in a known state (all key LEDs
//!    off, the profile's wheel-select key engaged).
//! 2. Polls the device for events: held-key snapshots, jog readings and
//!    battery reports.
//! 3. Feeds each event to the matching state machine from `jogkey-core` and
//!    applies the resulting actions: LED and jog-mode writes go back to the
//!    device, keystrokes go to the host injector.
//! 4. Tears the device down (LEDs off, jog LEDs cleared, handle closed) on
//!    every exit path: `ESC`, a transport failure, or Ctrl+C.

/// Application layer: device and injector seams, and the session controller.
pub mod application;

/// Domain layer: runtime configuration.
pub mod domain;

/// Infrastructure layer: concrete devices and keystroke injectors.
pub mod infrastructure;
