//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and the integration suites in `tests/`.
//! Compiled for tests and when the `test-support` feature is enabled.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use tracing::subscriber::DefaultGuard;

/// Deterministic clock that only moves when told to.
///
/// # Examples
/// ```
/// use ballot_backend::test_support::FixtureClock;
/// use chrono::TimeDelta;
/// use mockable::Clock;
///
/// let clock = FixtureClock::default();
/// let before = clock.utc();
/// clock.advance(TimeDelta::seconds(5));
/// assert_eq!(clock.utc() - before, TimeDelta::seconds(5));
/// ```
#[derive(Debug)]
pub struct FixtureClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixtureClock {
    /// Start the clock at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.lock_clock();
        *now += delta;
    }

    /// Jump the clock to `instant`, which may be in the past.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.lock_clock() = instant;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FixtureClock {
    /// 2024-03-01T09:00:00Z.
    fn default() -> Self {
        Self::new(Utc.timestamp_opt(1_709_283_600, 0).single().unwrap_or_default())
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Formatted log output captured for the current thread.
#[derive(Clone, Debug, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Route `tracing` events on this thread into a fresh buffer until the
    /// returned guard drops. Pair with a current-thread runtime.
    #[must_use]
    pub fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
