//! Dry-run injector.

use std::sync::atomic::{AtomicU64, Ordering};

use jogkey_core::Keystroke;
use tracing::info;

use crate::application::inject_keystrokes::{InjectionError, KeystrokeInjector};

/// Logs every keystroke at `info` level instead of injecting it.
#[derive(Debug, Default)]
pub struct LogInjector {
    count: AtomicU64,
}

impl LogInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keystrokes logged so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl KeystrokeInjector for LogInjector {
    fn send_keystroke(&self, keystroke: &Keystroke) -> Result<(), InjectionError> {
        self.count.fetch_add(1, Ordering::Relaxed);
        info!("keystroke {keystroke}");
        Ok(())
    }

    fn flush(&self) -> Result<(), InjectionError> {
        info!("{} keystrokes logged", self.count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_injector_counts_keystrokes() {
        let injector = LogInjector::new();
        let ks: Keystroke = "ctrl+b".parse().unwrap();

        injector.send_keystroke(&ks).unwrap();
        injector.send_keystroke(&ks).unwrap();

        assert_eq!(injector.count(), 2);
        assert!(injector.flush().is_ok());
    }
}
