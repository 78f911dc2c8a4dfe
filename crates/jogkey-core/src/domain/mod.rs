//! Domain logic: bindings, profiles, and the two input state machines.
//!
//! Nothing in here performs I/O.  The state machines consume device input
//! and return [`action::Action`] lists; applying those actions is the
//! session controller's job.
//!
//! - **`binding`** – Which keystroke (and which LED toggle) each controller
//!   key produces, validated when the table is built.
//! - **`profile`** – A named bundle of bindings plus trigger edge, default
//!   wheel key and jog rate policy.
//! - **`jog`** – [`jog::JogAccumulator`], the wheel integrator.
//! - **`key_state`** – [`key_state::KeyStateMachine`], the held-key differ.

pub mod action;
pub mod binding;
pub mod jog;
pub mod key_state;
pub mod profile;
