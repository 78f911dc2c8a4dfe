//! Device session implementations.
//!
//! - **`console`** – Reads device events as text lines from stdin or a
//!   script file.  Used for dry runs and demos without hardware.
//! - **`mock`** – Scripted, recording device for tests.

pub mod console;
pub mod mock;

pub use console::ConsoleDevice;
