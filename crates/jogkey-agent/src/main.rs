//! jogkey agent: entry point.
//!
//! Runs one controller session: device reports in, host keystrokes and LED
//! feedback out, until `ESC` is held alone, the device goes away, or the
//! process is asked to stop (Ctrl+C, or `SIGTERM` on Unix).
//!
//! # Usage
//!
//! ```text
//! jogkey-agent [OPTIONS]
//!
//! Options:
//!   --profile <NAME>        jianying | demo [default: jianying]
//!   --trigger <EDGE>        press | release (overrides the profile)
//!   --wheel <KEY>           SHTL | JOG | SCRL (overrides the profile)
//!   --jog-rate <N>          wheel readings per step keystroke, 0 = off
//!   --poll-timeout-ms <MS>  longest single device poll [default: 100]
//!   --injector <KIND>       log | xdotool | uinput [default: log]
//!   --script <PATH>         read device reports from a file, not stdin
//!   --log-level <FILTER>    used when RUST_LOG is unset [default: info]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                 | Flag                |
//! |--------------------------|---------------------|
//! | `JOGKEY_PROFILE`         | `--profile`         |
//! | `JOGKEY_TRIGGER`         | `--trigger`         |
//! | `JOGKEY_WHEEL`           | `--wheel`           |
//! | `JOGKEY_JOG_RATE`        | `--jog-rate`        |
//! | `JOGKEY_POLL_TIMEOUT_MS` | `--poll-timeout-ms` |
//! | `JOGKEY_INJECTOR`        | `--injector`        |
//! | `JOGKEY_SCRIPT`          | `--script`          |
//!
//! CLI args take precedence when both are present.
//!
//! # Threads
//!
//! The session loop blocks on device polls, so it runs on Tokio's blocking
//! pool.  The async side only waits for a shutdown signal and clears the shared
//! `running` flag, which the loop checks after every poll timeout.

use std::path::PathBuf;
use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jogkey_agent::application::device::DeviceSession;
use jogkey_agent::application::inject_keystrokes::KeystrokeInjector;
use jogkey_agent::application::session::SessionController;
use jogkey_agent::domain::{AgentConfig, InjectorKind};
use jogkey_agent::infrastructure::device::ConsoleDevice;
#[cfg(target_os = "linux")]
use jogkey_agent::infrastructure::injection::UinputInjector;
use jogkey_agent::infrastructure::injection::{LogInjector, XdotoolInjector};
use jogkey_agent::infrastructure::signal::{clear_on_shutdown, ShutdownSignals};
use jogkey_core::{Key, TriggerEdge};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Editing-controller keystroke bridge.
#[derive(Debug, Parser)]
#[command(
    name = "jogkey-agent",
    about = "Turns editing-controller keys and jog wheel into host keystrokes",
    version
)]
struct Cli {
    /// Shortcut profile: `jianying` or `demo`.
    #[arg(long, default_value = "jianying", env = "JOGKEY_PROFILE")]
    profile: String,

    /// Fire bindings on key `press` or on key `release`.
    #[arg(long, env = "JOGKEY_TRIGGER")]
    trigger: Option<TriggerEdge>,

    /// Wheel-select key engaged at start: SHTL, JOG or SCRL.
    #[arg(long, env = "JOGKEY_WHEEL")]
    wheel: Option<Key>,

    /// Wheel readings per step keystroke; 0 disables stepping.
    #[arg(long, env = "JOGKEY_JOG_RATE")]
    jog_rate: Option<u32>,

    /// Longest single device poll, in milliseconds.
    #[arg(long, default_value_t = 100, env = "JOGKEY_POLL_TIMEOUT_MS")]
    poll_timeout_ms: u64,

    /// Keystroke injector: `log` (dry run), `xdotool` or `uinput`.
    #[arg(long, default_value = "log", env = "JOGKEY_INJECTOR")]
    injector: InjectorKind,

    /// Read device reports from this file instead of stdin.
    #[arg(long, env = "JOGKEY_SCRIPT")]
    script: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Converts the parsed CLI arguments into an [`AgentConfig`].
    fn into_agent_config(self) -> AgentConfig {
        AgentConfig {
            profile: self.profile,
            trigger: self.trigger,
            wheel: self.wheel,
            jog_rate: self.jog_rate,
            poll_timeout: Duration::from_millis(self.poll_timeout_ms),
            injector: self.injector,
            script: self.script,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `RUST_LOG` wins; otherwise `--log-level`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = cli.into_agent_config();
    let profile = config
        .build_profile()
        .with_context(|| format!("invalid profile settings for '{}'", config.profile))?;

    info!(
        "jogkey agent starting: profile={}, injector={}",
        profile.name(),
        config.injector
    );

    // ── Device and injector ───────────────────────────────────────────────────
    let device: Box<dyn DeviceSession> = match &config.script {
        Some(path) => Box::new(
            ConsoleDevice::open(path)
                .with_context(|| format!("cannot open script '{}'", path.display()))?,
        ),
        None => Box::new(ConsoleDevice::stdin()),
    };
    let injector: Arc<dyn KeystrokeInjector> = match config.injector {
        InjectorKind::Log => Arc::new(LogInjector::new()),
        InjectorKind::Xdotool => Arc::new(XdotoolInjector::new()),
        #[cfg(target_os = "linux")]
        InjectorKind::Uinput => Arc::new(
            UinputInjector::new().context("cannot create the uinput virtual keyboard")?,
        ),
        #[cfg(not(target_os = "linux"))]
        InjectorKind::Uinput => anyhow::bail!("the uinput injector is only available on Linux"),
    };

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let signals = ShutdownSignals::register().context("cannot install signal handlers")?;
    clear_on_shutdown(signals, Arc::clone(&running));

    // ── Session ───────────────────────────────────────────────────────────────
    let mut session = SessionController::new(&profile, device, injector)
        .with_poll_timeout(config.poll_timeout)
        .with_shutdown_flag(running);

    let end = tokio::task::spawn_blocking(move || session.run())
        .await
        .context("session task panicked")?
        .context("session failed")?;

    info!("jogkey agent stopped ({end:?})");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        // Arrange / Act
        let cli = Cli::parse_from(["jogkey-agent"]);

        // Assert
        assert_eq!(cli.profile, "jianying");
        assert_eq!(cli.poll_timeout_ms, 100);
        assert_eq!(cli.injector, InjectorKind::Log);
        assert_eq!(cli.trigger, None);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "jogkey-agent",
            "--profile",
            "demo",
            "--trigger",
            "press",
            "--wheel",
            "scrl",
            "--jog-rate",
            "0",
            "--injector",
            "xdotool",
        ]);

        assert_eq!(cli.profile, "demo");
        assert_eq!(cli.trigger, Some(TriggerEdge::Press));
        assert_eq!(cli.wheel, Some(Key::Scrl));
        assert_eq!(cli.jog_rate, Some(0));
        assert_eq!(cli.injector, InjectorKind::Xdotool);
    }

    #[test]
    fn test_cli_selects_uinput_injector() {
        let cli = Cli::parse_from(["jogkey-agent", "--injector", "uinput"]);
        assert_eq!(cli.injector, InjectorKind::Uinput);
    }

    #[test]
    fn test_cli_rejects_unknown_key() {
        assert!(Cli::try_parse_from(["jogkey-agent", "--wheel", "WHEEL"]).is_err());
    }

    #[test]
    fn test_into_agent_config_converts_timeout() {
        let cli = Cli::parse_from(["jogkey-agent", "--poll-timeout-ms", "250"]);

        let config = cli.into_agent_config();

        assert_eq!(config.poll_timeout, Duration::from_millis(250));
        assert_eq!(config.script, None);
    }

    #[test]
    fn test_default_cli_matches_default_config() {
        let config = Cli::parse_from(["jogkey-agent"]).into_agent_config();
        assert_eq!(config, AgentConfig::default());
    }
}
