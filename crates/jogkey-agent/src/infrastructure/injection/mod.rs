//! Keystroke injector implementations.
//!
//! - **`log`** – Dry run: records each keystroke in the log and nothing else.
//! - **`uinput`** – Linux: writes key events to a kernel virtual keyboard.
//! - **`xdotool`** – X11 sessions: hands each chord to the `xdotool` tool,
//!   one at a time.
//! - **`mock`** – Recording injector for tests.

pub mod log;
pub mod mock;
#[cfg(target_os = "linux")]
pub mod uinput;
pub mod xdotool;

pub use self::log::LogInjector;
#[cfg(target_os = "linux")]
pub use self::uinput::UinputInjector;
pub use self::xdotool::XdotoolInjector;
