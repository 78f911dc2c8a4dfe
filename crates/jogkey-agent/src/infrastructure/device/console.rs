//! Line-oriented console device.
//!
//! Stands in for the USB controller during dry runs: each line of input is
//! one device report.
//!
//! ```text
//! # comment
//! keys CUT               held-key snapshot (names as printed on the keys)
//! keys                   nothing held
//! jog 2 120              wheel reading in mode 2 (RELATIVE_2)
//! jog absolute_deadzero 900   modes by name work too (any case)
//! jog 2 clear            reset the running sum
//! battery 80 charging    battery report
//! ```
//!
//! A background thread reads lines and forwards them over a channel, so
//! [`DeviceSession::poll`] can honour its timeout with `recv_timeout`.  End
//! of input is reported as [`TransportError::Disconnected`].
//!
//! Device writes (LEDs, jog mode) are logged at `info` level and the last
//! value of each is kept for inspection.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use jogkey_core::{JogLed, JogMode, Key, LedMask};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::device::{DeviceEvent, DeviceSession, TransportError};

/// Error for a console line that is not a valid device report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("unknown command {0:?} (expected keys, jog or battery)")]
    UnknownCommand(String),
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("unknown jog mode {0:?}")]
    UnknownJogMode(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("battery level {0:?} must be 0-100")]
    BadLevel(String),
    #[error("unexpected trailing input {0:?}")]
    Trailing(String),
}

/// Parses one console line.  Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<DeviceEvent>, LineError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let event = match command.to_ascii_lowercase().as_str() {
        "keys" => {
            let held = words
                .map(|w| w.parse::<Key>().map_err(|_| LineError::UnknownKey(w.to_string())))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Some(DeviceEvent::Keys(held)));
        }
        "jog" => {
            let mode = words.next().ok_or(LineError::Missing("jog mode"))?;
            let mode: JogMode =
                mode.parse().map_err(|_| LineError::UnknownJogMode(mode.to_string()))?;
            let input = words.next().ok_or(LineError::Missing("jog value"))?;
            DeviceEvent::Jog { mode, input: input.to_string() }
        }
        "battery" => {
            let level = words.next().ok_or(LineError::Missing("battery level"))?;
            let level = level
                .parse::<u8>()
                .ok()
                .filter(|l| *l <= 100)
                .ok_or_else(|| LineError::BadLevel(level.to_string()))?;
            let charging = match words.next() {
                None => false,
                Some(w) if w.eq_ignore_ascii_case("charging") => true,
                Some(w) => return Err(LineError::Trailing(w.to_string())),
            };
            DeviceEvent::Battery { charging, level }
        }
        _ => return Err(LineError::UnknownCommand(command.to_string())),
    };

    match words.next() {
        Some(extra) => Err(LineError::Trailing(extra.to_string())),
        None => Ok(Some(event)),
    }
}

/// A [`DeviceSession`] fed by text lines.
pub struct ConsoleDevice {
    lines: Receiver<io::Result<String>>,
    leds: LedMask,
    jog_led: Option<JogLed>,
    jog_mode: Option<JogMode>,
    closed: bool,
}

impl ConsoleDevice {
    /// Reads reports from standard input.
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(io::stdin()))
    }

    /// Reads reports from a script file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self::from_reader(BufReader::new(File::open(path)?)))
    }

    /// Reads reports from any line source on a background thread.
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
        Self { lines: rx, leds: LedMask::NONE, jog_led: None, jog_mode: None, closed: false }
    }

    /// Last LED mask written.
    pub fn leds(&self) -> LedMask {
        self.leds
    }

    /// Last jog LED written.
    pub fn jog_led(&self) -> Option<JogLed> {
        self.jog_led
    }

    /// Last jog mode written, if any.
    pub fn jog_mode(&self) -> Option<JogMode> {
        self.jog_mode
    }

    fn ensure_open(&self) -> Result<(), TransportError> {
        if self.closed {
            Err(TransportError::Closed)
        } else {
            Ok(())
        }
    }
}

impl DeviceSession for ConsoleDevice {
    fn authenticate(&mut self) -> Result<(), TransportError> {
        self.ensure_open()?;
        info!("console device ready");
        Ok(())
    }

    fn set_leds(&mut self, leds: LedMask) -> Result<(), TransportError> {
        self.ensure_open()?;
        self.leds = leds;
        let names: Vec<_> = leds.iter().map(|led| format!("{led:?}")).collect();
        info!("leds {leds} [{}]", names.join(" "));
        Ok(())
    }

    fn set_jog_leds(&mut self, led: Option<JogLed>) -> Result<(), TransportError> {
        self.ensure_open()?;
        self.jog_led = led;
        info!("jog led {led:?}");
        Ok(())
    }

    fn set_jog_mode(&mut self, mode: JogMode) -> Result<(), TransportError> {
        self.ensure_open()?;
        self.jog_mode = Some(mode);
        info!("jog mode {mode}");
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> Result<Option<DeviceEvent>, TransportError> {
        self.ensure_open()?;
        let line = match self.lines.recv_timeout(timeout) {
            Ok(line) => line?,
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            Err(RecvTimeoutError::Disconnected) => return Err(TransportError::Disconnected),
        };
        match parse_line(&line) {
            Ok(event) => Ok(event),
            Err(e) => {
                warn!("skipping line {line:?}: {e}");
                Ok(None)
            }
        }
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.ensure_open()?;
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WAIT: Duration = Duration::from_secs(2);

    fn device(script: &str) -> ConsoleDevice {
        ConsoleDevice::from_reader(Cursor::new(script.to_string()))
    }

    #[test]
    fn test_parse_keys_line() {
        assert_eq!(
            parse_line("keys CUT smth_cut").unwrap(),
            Some(DeviceEvent::Keys(vec![Key::Cut, Key::SmthCut]))
        );
        assert_eq!(parse_line("keys").unwrap(), Some(DeviceEvent::Keys(vec![])));
    }

    #[test]
    fn test_parse_jog_line_keeps_raw_value() {
        assert_eq!(
            parse_line("jog RELATIVE_2 abc").unwrap(),
            Some(DeviceEvent::Jog { mode: JogMode::Relative2, input: "abc".to_string() })
        );
        assert_eq!(
            parse_line("jog 1 -40").unwrap(),
            Some(DeviceEvent::Jog { mode: JogMode::AbsoluteContinuous, input: "-40".to_string() })
        );
    }

    #[test]
    fn test_parse_battery_line() {
        assert_eq!(
            parse_line("battery 80 charging").unwrap(),
            Some(DeviceEvent::Battery { charging: true, level: 80 })
        );
        assert_eq!(
            parse_line("battery 5").unwrap(),
            Some(DeviceEvent::Battery { charging: false, level: 5 })
        );
        assert_eq!(parse_line("battery 101"), Err(LineError::BadLevel("101".to_string())));
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# keys CUT").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert_eq!(parse_line("press CUT"), Err(LineError::UnknownCommand("press".to_string())));
        assert_eq!(parse_line("keys CUTT"), Err(LineError::UnknownKey("CUTT".to_string())));
        assert_eq!(parse_line("jog 9 1"), Err(LineError::UnknownJogMode("9".to_string())));
        assert_eq!(parse_line("jog 2"), Err(LineError::Missing("jog value")));
        assert_eq!(parse_line("jog 2 1 2"), Err(LineError::Trailing("2".to_string())));
    }

    #[test]
    fn test_poll_returns_events_then_disconnects() {
        // Arrange
        let mut dev = device("keys IN\n# skip\nbattery 50\n");

        // Act / Assert
        assert_eq!(dev.poll(WAIT).unwrap(), Some(DeviceEvent::Keys(vec![Key::In])));
        assert_eq!(dev.poll(WAIT).unwrap(), None);
        assert_eq!(
            dev.poll(WAIT).unwrap(),
            Some(DeviceEvent::Battery { charging: false, level: 50 })
        );
        assert!(matches!(dev.poll(WAIT), Err(TransportError::Disconnected)));
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let mut dev = device("bogus\nkeys ESC\n");

        assert_eq!(dev.poll(WAIT).unwrap(), None);
        assert_eq!(dev.poll(WAIT).unwrap(), Some(DeviceEvent::Keys(vec![Key::Esc])));
    }

    #[test]
    fn test_writes_are_remembered() {
        let mut dev = device("");
        dev.set_leds(LedMask::from(jogkey_core::Led::Cut)).unwrap();
        dev.set_jog_leds(Some(JogLed::Jog)).unwrap();
        dev.set_jog_mode(JogMode::AbsoluteContinuous).unwrap();

        assert!(dev.leds().contains(jogkey_core::Led::Cut));
        assert_eq!(dev.jog_led(), Some(JogLed::Jog));
        assert_eq!(dev.jog_mode(), Some(JogMode::AbsoluteContinuous));
    }

    #[test]
    fn test_closed_device_rejects_calls() {
        let mut dev = device("keys IN\n");
        dev.close().unwrap();

        assert!(matches!(dev.poll(WAIT), Err(TransportError::Closed)));
        assert!(matches!(dev.set_leds(LedMask::NONE), Err(TransportError::Closed)));
        assert!(matches!(dev.close(), Err(TransportError::Closed)));
    }
}
