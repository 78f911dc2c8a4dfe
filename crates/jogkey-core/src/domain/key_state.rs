//! Held-key state machine.
//!
//! The controller reports the complete set of held keys every time anything
//! changes.  [`KeyStateMachine`] keeps the previous snapshot, diffs it against
//! the new one, and runs every key on the configured [`TriggerEdge`]
//! through the wheel selector, the LED toggles and the binding table.
//!
//! Edges within one snapshot are processed in key-code order, which keeps
//! the action list deterministic when several keys change at once.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::device::{Key, LedMask};
use crate::domain::action::Action;
use crate::domain::binding::BindingTable;
use crate::domain::jog::JogAccumulator;

/// The keys physically held at one instant.
pub type HeldKeySet = BTreeSet<Key>;

/// Which edge of a key fires its binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TriggerEdge {
    /// Fire when the key goes down.
    #[default]
    Press,
    /// Fire when the key comes back up.
    Release,
}

impl fmt::Display for TriggerEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TriggerEdge::Press => "press",
            TriggerEdge::Release => "release",
        })
    }
}

impl FromStr for TriggerEdge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "press" => Ok(TriggerEdge::Press),
            "release" => Ok(TriggerEdge::Release),
            other => Err(format!("unknown trigger edge {other:?} (expected press or release)")),
        }
    }
}

/// Per-session key state: previous snapshot and LED mask.
#[derive(Debug, Clone)]
pub struct KeyStateMachine {
    bindings: BindingTable,
    trigger: TriggerEdge,
    held: HeldKeySet,
    leds: LedMask,
}

impl KeyStateMachine {
    pub fn new(bindings: BindingTable, trigger: TriggerEdge) -> Self {
        Self { bindings, trigger, held: HeldKeySet::new(), leds: LedMask::NONE }
    }

    /// Processes one held-key snapshot and returns the resulting actions.
    ///
    /// A snapshot holding `ESC` and nothing else yields `[Terminate]` and
    /// skips edge processing.  Keys without a wheel role or binding are
    /// ignored.  The snapshot always becomes the new previous snapshot.
    pub fn on_key_snapshot(
        &mut self,
        snapshot: impl IntoIterator<Item = Key>,
        jog: &mut JogAccumulator,
    ) -> Vec<Action> {
        let held: HeldKeySet = snapshot.into_iter().collect();
        debug!("keys held: {}", format_held(&held));

        let mut actions = Vec::new();
        if held.len() == 1 && held.contains(&Key::Esc) {
            actions.push(Action::Terminate);
        } else {
            let edges: Vec<Key> = match self.trigger {
                TriggerEdge::Press => held.difference(&self.held).copied().collect(),
                TriggerEdge::Release => self.held.difference(&held).copied().collect(),
            };
            for key in edges {
                self.fire(key, jog, &mut actions);
            }
        }

        self.held = held;
        actions
    }

    fn fire(&mut self, key: Key, jog: &mut JogAccumulator, actions: &mut Vec<Action>) {
        jog.set_mode_for_key(key, actions);

        let Some(binding) = self.bindings.get(key).copied() else {
            return;
        };

        // The "already on" check must see the LED before it flips.
        let led_was_on = match binding.led() {
            Some(led) => {
                let was_on = self.leds.toggle(led);
                actions.push(Action::SetLeds(self.leds));
                was_on
            }
            None => false,
        };

        if let Some(keystroke) = binding.resolve(led_was_on) {
            actions.push(Action::SendKeystroke(keystroke));
        }
    }

    /// Turns every LED off and forgets the held keys.
    pub fn reset(&mut self) {
        self.leds = LedMask::NONE;
        self.held.clear();
    }

    pub fn leds(&self) -> LedMask {
        self.leds
    }

    pub fn held(&self) -> &HeldKeySet {
        &self.held
    }

    pub fn trigger(&self) -> TriggerEdge {
        self.trigger
    }
}

fn format_held(held: &HeldKeySet) -> String {
    if held.is_empty() {
        return "none".to_string();
    }
    held.iter().map(|k| k.name()).collect::<Vec<_>>().join(" ")
}
