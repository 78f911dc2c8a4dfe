//! Infrastructure layer: concrete device sessions, keystroke injectors and
//! process-signal handling.

pub mod device;
pub mod injection;
pub mod signal;
