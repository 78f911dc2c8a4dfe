//! X11 keystroke injection through `xdotool`.
//!
//! Each keystroke runs `xdotool key --clearmodifiers CHORD`, where CHORD
//! is the keysym chord from [`jogkey_core::keymap::x11::chord`].
//! `--clearmodifiers` releases any modifiers the user is physically holding
//! for the duration of the chord, so a held Shift on the keyboard does not
//! turn `b` into `B`.
//!
//! # Ordering
//!
//! One worker thread owns the child processes.  `send_keystroke` queues the
//! chord and returns immediately; the worker runs the queued chords one at a
//! time and waits for each child to exit before starting the next, so
//! keystrokes reach the X server in the order they were sent.  A child that
//! hangs is killed after [`CHILD_TIMEOUT`] so it cannot stall the queue.
//!
//! # Runtime requirements
//!
//! Only the `xdotool` executable is needed, and only on the machine that
//! injects.  No X11 libraries are linked.

use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use jogkey_core::keymap::x11;
use jogkey_core::Keystroke;
use tracing::{debug, warn};

use crate::application::inject_keystrokes::{InjectionError, KeystrokeInjector};

/// Default upper bound on how long `flush` waits for queued keystrokes.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(500);

/// Longest a single child may run before it is killed.
pub const CHILD_TIMEOUT: Duration = Duration::from_secs(2);

const REAP_INTERVAL: Duration = Duration::from_millis(5);

enum Job {
    Chord(String),
    Flush(Sender<()>),
}

/// Command line shared between the injector and its worker.
#[derive(Debug, Clone)]
struct Program {
    program: String,
    leading_args: Vec<String>,
}

impl Program {
    fn command(&self, chord: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .args(["key", "--clearmodifiers", chord])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

/// Injects keystrokes by running `xdotool`, one chord at a time.
pub struct XdotoolInjector {
    program: String,
    jobs: Sender<Job>,
    queued: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
    flush_timeout: Duration,
}

impl XdotoolInjector {
    /// Uses `xdotool` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("xdotool")
    }

    /// Uses a specific executable; handy for wrappers.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self::with_command(program, Vec::<String>::new())
    }

    /// Runs `program LEADING_ARGS... key --clearmodifiers CHORD`.
    ///
    /// Lets a wrapper such as `sh script` or `ssh host xdotool` stand in
    /// for the tool.
    pub fn with_command(
        program: impl Into<String>,
        leading_args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let program = Program {
            program: program.into(),
            leading_args: leading_args.into_iter().map(Into::into).collect(),
        };
        let (jobs, rx) = mpsc::channel();
        let queued = Arc::new(AtomicUsize::new(0));
        let failures = Arc::new(AtomicUsize::new(0));

        let worker = Worker {
            program: program.clone(),
            queued: Arc::clone(&queued),
            failures: Arc::clone(&failures),
        };
        thread::spawn(move || worker.run(rx));

        Self { program: program.program, jobs, queued, failures, flush_timeout: FLUSH_TIMEOUT }
    }

    /// Sets how long `flush` waits for the queue to drain.
    pub fn with_flush_timeout(mut self, timeout: Duration) -> Self {
        self.flush_timeout = timeout;
        self
    }

    /// Number of chords queued or running.
    pub fn pending(&self) -> usize {
        self.queued.load(Ordering::Acquire)
    }
}

impl Default for XdotoolInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeystrokeInjector for XdotoolInjector {
    fn send_keystroke(&self, keystroke: &Keystroke) -> Result<(), InjectionError> {
        let chord = x11::chord(keystroke);
        self.queued.fetch_add(1, Ordering::AcqRel);
        if self.jobs.send(Job::Chord(chord)).is_err() {
            self.queued.fetch_sub(1, Ordering::AcqRel);
            return Err(InjectionError::Platform(format!("{} worker has stopped", self.program)));
        }
        Ok(())
    }

    /// Waits until every queued chord has run, bounded by the flush timeout.
    ///
    /// Fails if the timeout elapses or if any chord failed since the last
    /// flush (each failure is also logged when it happens).
    fn flush(&self) -> Result<(), InjectionError> {
        let (ack, done) = mpsc::channel();
        self.jobs
            .send(Job::Flush(ack))
            .map_err(|_| InjectionError::Platform(format!("{} worker has stopped", self.program)))?;

        if done.recv_timeout(self.flush_timeout).is_err() {
            return Err(InjectionError::Platform(format!(
                "{} keystroke(s) still queued for {} after {:?}",
                self.pending(),
                self.program,
                self.flush_timeout
            )));
        }

        match self.failures.swap(0, Ordering::AcqRel) {
            0 => Ok(()),
            n => Err(InjectionError::Platform(format!("{n} {} keystroke(s) failed", self.program))),
        }
    }
}

struct Worker {
    program: Program,
    queued: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl Worker {
    /// Runs jobs in arrival order until the injector is dropped.
    fn run(self, jobs: Receiver<Job>) {
        for job in jobs {
            match job {
                Job::Chord(chord) => {
                    if let Err(e) = self.run_chord(&chord) {
                        warn!("{e}");
                        self.failures.fetch_add(1, Ordering::AcqRel);
                    }
                    self.queued.fetch_sub(1, Ordering::AcqRel);
                }
                Job::Flush(ack) => {
                    let _ = ack.send(());
                }
            }
        }
    }

    fn run_chord(&self, chord: &str) -> Result<(), InjectionError> {
        let program = &self.program.program;
        let child = self
            .program
            .command(chord)
            .spawn()
            .map_err(|source| InjectionError::Spawn { program: program.clone(), source })?;
        debug!("{program} key {chord} (pid {})", child.id());

        let status = wait_bounded(child, CHILD_TIMEOUT).map_err(|e| {
            InjectionError::Platform(format!("{program} for {chord} did not finish: {e}"))
        })?;
        if !status.success() {
            return Err(InjectionError::Failed {
                program: program.clone(),
                chord: chord.to_string(),
                status,
            });
        }
        Ok(())
    }
}

/// Waits for `child`, killing it once `timeout` has elapsed.
fn wait_bounded(mut child: Child, timeout: Duration) -> std::io::Result<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            // The child may have exited since the last check.
            let _ = child.kill();
            child.wait()?;
            return Err(std::io::Error::new(std::io::ErrorKind::TimedOut, "killed after timeout"));
        }
        thread::sleep(REAP_INTERVAL);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const GENEROUS: Duration = Duration::from_secs(10);

    fn ks(s: &str) -> Keystroke {
        s.parse().unwrap()
    }

    /// A scratch directory unique to one test.
    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("jogkey-xdotool-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_chords_are_delivered_in_send_order() {
        // Arrange – a stand-in tool that is slow for `b` and logs each chord
        let dir = scratch_dir();
        let log = dir.join("delivered");
        let script = dir.join("fake-xdotool.sh");
        fs::write(
            &script,
            format!(
                "[ \"$3\" = b ] && sleep 0.3\necho \"$3\" >> '{}'\n",
                log.display()
            ),
        )
        .unwrap();
        let injector = XdotoolInjector::with_command("sh", [script.display().to_string()])
            .with_flush_timeout(GENEROUS);

        // Act
        injector.send_keystroke(&ks("b")).unwrap();
        injector.send_keystroke(&ks("a")).unwrap();
        let flushed = injector.flush();

        // Assert
        assert!(flushed.is_ok(), "{flushed:?}");
        let delivered = fs::read_to_string(&log).unwrap();
        assert_eq!(delivered.lines().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(injector.pending(), 0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_send_does_not_wait_for_the_child() {
        // Arrange – every chord takes 0.3 s
        let injector = XdotoolInjector::with_command("sh", ["-c", "sleep 0.3", "fake-xdotool"])
            .with_flush_timeout(GENEROUS);

        // Act
        let started = Instant::now();
        for _ in 0..3 {
            injector.send_keystroke(&ks("right")).unwrap();
        }
        let queued_in = started.elapsed();

        // Assert
        assert!(queued_in < Duration::from_millis(300), "send blocked for {queued_in:?}");
        assert!(injector.flush().is_ok());
        assert!(started.elapsed() >= Duration::from_millis(900), "chords overlapped");
    }

    #[test]
    fn test_missing_program_fails_at_flush() {
        let injector = XdotoolInjector::with_program("/nonexistent/xdotool-for-tests")
            .with_flush_timeout(GENEROUS);

        injector.send_keystroke(&ks("b")).unwrap();

        assert!(matches!(injector.flush(), Err(InjectionError::Platform(_))));
        assert_eq!(injector.pending(), 0);
    }

    #[test]
    fn test_flush_succeeds_when_every_child_exits_cleanly() {
        // `true` ignores its arguments and exits 0
        let injector = XdotoolInjector::with_program("true").with_flush_timeout(GENEROUS);
        injector.send_keystroke(&ks("ctrl+b")).unwrap();
        injector.send_keystroke(&ks("space")).unwrap();

        assert!(injector.flush().is_ok());
        assert_eq!(injector.pending(), 0);
    }

    #[test]
    fn test_failures_are_reported_once() {
        let injector = XdotoolInjector::with_program("false").with_flush_timeout(GENEROUS);
        injector.send_keystroke(&ks("i")).unwrap();

        assert!(injector.flush().is_err());
        assert!(injector.flush().is_ok(), "failure count resets after a flush");
    }

    #[test]
    fn test_flush_times_out_on_a_slow_queue() {
        let injector = XdotoolInjector::with_command("sh", ["-c", "sleep 1", "fake-xdotool"])
            .with_flush_timeout(Duration::from_millis(50));
        injector.send_keystroke(&ks("b")).unwrap();

        assert!(matches!(injector.flush(), Err(InjectionError::Platform(_))));
    }
}
