//! # jogkey-core
//!
//! Event-interpretation engine for a video-editing controller (the Speed
//! Editor family): discrete keys, LED toggle keys, and a jog wheel.
//!
//! This crate is pure logic.  It has zero dependencies on HID transports,
//! OS keystroke injection, or process lifecycle; those live in
//! `jogkey-agent`.
//!
//! # Architecture overview (for beginners)
//!
//! The controller reports two kinds of input:
//!
//! - A **held-key snapshot** every time any key goes down or up.  The device
//!   does not say *which* key changed, only the full set of keys held right
//!   now.  [`KeyStateMachine`] diffs successive snapshots to find edges.
//!
//! - A **jog reading** whenever the wheel turns.  Depending on the active
//!   [`JogMode`] this is a relative delta or an absolute position.
//!   [`JogAccumulator`] integrates readings and, when a rate policy is
//!   configured, turns every Nth reading into one step keystroke.
//!
//! Both state machines emit [`Action`] values.  They never touch the device
//! or the host directly; the session controller in `jogkey-agent` applies
//! actions to whichever collaborator they belong to.
//!
//! The crate is organised as:
//!
//! - **`device`** – The controller's vocabulary: keys, LED bits, jog LEDs
//!   and jog modes.
//!
//! - **`keymap`** – Host-side keys and modifier chords (`ctrl+shift+f`) and
//!   their translation to X11 keysym names.
//!
//! - **`domain`** – Bindings, profiles, and the two state machines.

pub mod device;
pub mod domain;
pub mod keymap;

pub use device::{JogLed, JogMode, Key, Led, LedMask};
pub use domain::action::Action;
pub use domain::binding::{BindingError, BindingTable, ShortcutBinding};
pub use domain::jog::{JogAccumulator, JogError, JogInput, RatePolicy};
pub use domain::key_state::{HeldKeySet, KeyStateMachine, TriggerEdge};
pub use domain::profile::{Profile, ProfileError, PROFILE_NAMES};
pub use keymap::{Keystroke, KeystrokeError};
