//! Application layer use cases for the agent.
//!
//! - **`device`** – The [`device::DeviceSession`] trait every controller
//!   transport implements, and the events it produces.
//!
//! - **`inject_keystrokes`** – The [`inject_keystrokes::KeystrokeInjector`]
//!   trait for delivering keystrokes to the host.
//!
//! - **`session`** – [`session::SessionController`], which wires a device and
//!   an injector to the state machines and guarantees teardown.

pub mod device;
pub mod inject_keystrokes;
pub mod session;
