//! Agent configuration types.
//!
//! [`AgentConfig`] is the single source of truth for runtime settings.  It
//! is built from CLI arguments in `main.rs` or from defaults in tests; the
//! domain never reads the environment itself.
//!
//! Profile overrides (`trigger`, `wheel`, `jog_rate`) are optional: `None`
//! keeps whatever the named profile specifies.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use jogkey_core::{Key, Profile, ProfileError, TriggerEdge};

/// Which keystroke injector to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InjectorKind {
    /// Log keystrokes only.
    #[default]
    Log,
    /// Inject through the `xdotool` tool (X11).
    Xdotool,
    /// Inject through a uinput virtual keyboard (Linux).
    Uinput,
}

impl fmt::Display for InjectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InjectorKind::Log => "log",
            InjectorKind::Xdotool => "xdotool",
            InjectorKind::Uinput => "uinput",
        })
    }
}

impl FromStr for InjectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(InjectorKind::Log),
            "xdotool" => Ok(InjectorKind::Xdotool),
            "uinput" => Ok(InjectorKind::Uinput),
            other => Err(format!("unknown injector {other:?} (expected log, xdotool or uinput)")),
        }
    }
}

/// All runtime configuration for one agent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Shortcut profile name (`jianying` or `demo`).
    pub profile: String,

    /// Overrides the profile's trigger edge.
    pub trigger: Option<TriggerEdge>,

    /// Overrides the wheel-select key engaged at session start.
    pub wheel: Option<Key>,

    /// Overrides the jog rate period; `Some(0)` disables stepping.
    pub jog_rate: Option<u32>,

    /// Upper bound on one device poll.  Also bounds Ctrl+C latency.
    pub poll_timeout: Duration,

    pub injector: InjectorKind,

    /// Read device events from this file instead of stdin.
    pub script: Option<PathBuf>,
}

impl AgentConfig {
    /// Resolves the named profile and applies the overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] for an unknown profile name or a `wheel`
    /// override that is not a wheel-select key.
    pub fn build_profile(&self) -> Result<Profile, ProfileError> {
        let mut profile = Profile::by_name(&self.profile)?;
        if let Some(trigger) = self.trigger {
            profile = profile.with_trigger(trigger);
        }
        if let Some(wheel) = self.wheel {
            profile = profile.with_default_wheel_key(wheel)?;
        }
        if let Some(every) = self.jog_rate {
            profile = profile.with_jog_rate(every);
        }
        Ok(profile)
    }
}

impl Default for AgentConfig {
    /// | Field          | Default      |
    /// |----------------|--------------|
    /// | profile        | `jianying`   |
    /// | overrides      | none         |
    /// | poll_timeout   | 100 ms       |
    /// | injector       | `log`        |
    /// | script         | none (stdin) |
    fn default() -> Self {
        Self {
            profile: "jianying".to_string(),
            trigger: None,
            wheel: None,
            jog_rate: None,
            poll_timeout: Duration::from_millis(100),
            injector: InjectorKind::Log,
            script: None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_jianying() {
        // Arrange / Act
        let cfg = AgentConfig::default();
        // Assert
        assert_eq!(cfg.profile, "jianying");
        assert_eq!(cfg.build_profile().unwrap().name(), "jianying");
    }

    #[test]
    fn test_default_poll_timeout_is_100ms() {
        assert_eq!(AgentConfig::default().poll_timeout, Duration::from_millis(100));
    }

    #[test]
    fn test_default_injector_is_log() {
        assert_eq!(AgentConfig::default().injector, InjectorKind::Log);
    }

    #[test]
    fn test_overrides_are_applied() {
        // Arrange
        let cfg = AgentConfig {
            profile: "demo".to_string(),
            trigger: Some(TriggerEdge::Press),
            wheel: Some(Key::Scrl),
            jog_rate: Some(4),
            ..AgentConfig::default()
        };

        // Act
        let profile = cfg.build_profile().unwrap();

        // Assert
        assert_eq!(profile.trigger(), TriggerEdge::Press);
        assert_eq!(profile.default_wheel_key(), Key::Scrl);
        assert_eq!(profile.rate().map(|r| r.every()), Some(4));
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let cfg = AgentConfig { profile: "resolve".to_string(), ..AgentConfig::default() };
        assert!(matches!(cfg.build_profile(), Err(ProfileError::Unknown(_))));
    }

    #[test]
    fn test_non_wheel_key_override_is_an_error() {
        let cfg = AgentConfig { wheel: Some(Key::Cut), ..AgentConfig::default() };
        assert_eq!(cfg.build_profile().unwrap_err(), ProfileError::NotAWheelKey(Key::Cut));
    }

    #[test]
    fn test_injector_kind_parses() {
        assert_eq!("XDOTOOL".parse::<InjectorKind>(), Ok(InjectorKind::Xdotool));
        assert_eq!("uinput".parse::<InjectorKind>(), Ok(InjectorKind::Uinput));
        assert!("ydotool".parse::<InjectorKind>().is_err());
        assert_eq!(InjectorKind::Log.to_string(), "log");
        assert_eq!(InjectorKind::Uinput.to_string(), "uinput");
    }
}
