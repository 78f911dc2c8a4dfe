//! Named shortcut profiles.
//!
//! A profile bundles everything that differs between target applications:
//! the binding table, the trigger edge, the wheel-select key engaged at
//! session start, and the jog rate policy.

use thiserror::Error;

use crate::device::Key;
use crate::domain::binding::{BindingError, BindingTable};
use crate::domain::jog::{JogAccumulator, RatePolicy};
use crate::domain::key_state::{KeyStateMachine, TriggerEdge};

/// Names accepted by [`Profile::by_name`].
pub const PROFILE_NAMES: [&str; 2] = ["jianying", "demo"];

/// Error returned when a profile cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("unknown profile {0:?} (expected one of: jianying, demo)")]
    Unknown(String),
    #[error("{0} is not a wheel-select key (expected SHTL, JOG or SCRL)")]
    NotAWheelKey(Key),
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// A complete key/wheel configuration for one target application.
#[derive(Debug, Clone)]
pub struct Profile {
    name: &'static str,
    bindings: BindingTable,
    trigger: TriggerEdge,
    default_wheel_key: Key,
    rate: Option<RatePolicy>,
}

impl Profile {
    /// Shortcuts for the Jianying (CapCut desktop) editor.
    ///
    /// Press-triggered, shuttle wheel at start, one arrow-key step per five
    /// wheel readings.
    pub fn jianying() -> Result<Self, ProfileError> {
        let bindings = BindingTable::parse(&[
            (Key::In, "i", false, None),
            (Key::Out, "o", false, None),
            (Key::Snap, "n", true, None),
            (Key::LiveOwr, "s", false, None),
            (Key::StopPlay, "space", false, None),
            (Key::FullView, "ctrl+shift+f", false, None),
            (Key::SmthCut, "ctrl+b", false, None),
            (Key::Cut, "b", true, Some("a")),
        ])?;
        Ok(Self {
            name: "jianying",
            bindings,
            trigger: TriggerEdge::Press,
            default_wheel_key: Key::Shtl,
            rate: Some(RatePolicy::default()),
        })
    }

    /// LED exerciser: every LED key toggles its own LED on release and
    /// sends nothing.
    pub fn demo() -> Self {
        Self {
            name: "demo",
            bindings: BindingTable::led_toggles(),
            trigger: TriggerEdge::Release,
            default_wheel_key: Key::Jog,
            rate: None,
        }
    }

    /// Looks a profile up by (case-insensitive) name.
    pub fn by_name(name: &str) -> Result<Self, ProfileError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "jianying" => Self::jianying(),
            "demo" => Ok(Self::demo()),
            _ => Err(ProfileError::Unknown(name.to_string())),
        }
    }

    pub fn with_trigger(mut self, trigger: TriggerEdge) -> Self {
        self.trigger = trigger;
        self
    }

    /// Replaces the wheel-select key engaged at session start.
    pub fn with_default_wheel_key(mut self, key: Key) -> Result<Self, ProfileError> {
        if key.wheel_role().is_none() {
            return Err(ProfileError::NotAWheelKey(key));
        }
        self.default_wheel_key = key;
        Ok(self)
    }

    /// Sets the rate period; 0 disables stepping.
    ///
    /// A profile without a policy gains the default arrow-key policy.
    pub fn with_jog_rate(mut self, every: u32) -> Self {
        self.rate = self.rate.unwrap_or_default().with_every(every);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn trigger(&self) -> TriggerEdge {
        self.trigger
    }

    pub fn default_wheel_key(&self) -> Key {
        self.default_wheel_key
    }

    pub fn rate(&self) -> Option<RatePolicy> {
        self.rate
    }

    /// Builds fresh per-session state machines from this profile.
    pub fn state_machines(&self) -> (KeyStateMachine, JogAccumulator) {
        (
            KeyStateMachine::new(self.bindings.clone(), self.trigger),
            JogAccumulator::new(self.rate),
        )
    }
}
