//! Bounded retry with exponential back-off.
//!
//! A probe is invoked until it returns a non-default value or the timeout
//! elapses. The default value of the probe's type means "not yet", so a
//! `bool` probe retries while it returns `false` and an `Option` probe
//! retries while it returns `None`.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use dialogwatch_protocols::DialogError;

/// Back-off ceiling used when none is configured.
pub const DEFAULT_MAX_SLEEP: Duration = Duration::from_millis(100);

const INITIAL_SLEEP: Duration = Duration::from_millis(1);

type MessageBuilder = Box<dyn Fn() -> String + Send + Sync>;

/// Retry-until-timeout executor.
///
/// Probe errors are recorded as [`TryUntilTimeout::last_error`] and the probe
/// is retried. When the timeout elapses the executor returns the default
/// value and sets [`TryUntilTimeout::did_time_out`], unless a message builder
/// was configured, in which case it returns [`DialogError::Timeout`] carrying
/// the last probe error.
pub struct TryUntilTimeout {
    timeout: Duration,
    max_sleep: Duration,
    message: Option<MessageBuilder>,
    last_error: Option<anyhow::Error>,
    did_time_out: bool,
}

impl TryUntilTimeout {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            max_sleep: DEFAULT_MAX_SLEEP,
            message: None,
            last_error: None,
            did_time_out: false,
        }
    }

    /// Cap the back-off between attempts.
    pub fn with_max_sleep(mut self, max_sleep: Duration) -> Self {
        self.max_sleep = max_sleep.max(INITIAL_SLEEP);
        self
    }

    /// Turn a timeout into an error. The builder runs only on timeout and its
    /// text is prefixed with "Timeout while ".
    pub fn with_message<F>(mut self, message: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.message = Some(Box::new(message));
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_sleep(&self) -> Duration {
        self.max_sleep
    }

    /// Whether the last run exhausted the timeout.
    pub fn did_time_out(&self) -> bool {
        self.did_time_out
    }

    /// Error from the most recent failing attempt of the last run.
    pub fn last_error(&self) -> Option<&anyhow::Error> {
        self.last_error.as_ref()
    }

    /// Run `probe` until it yields a non-default value or the timeout elapses.
    ///
    /// The probe always runs at least once, even with a zero timeout.
    pub fn try_until<T, F>(&mut self, mut probe: F) -> Result<T, DialogError>
    where
        T: Default + PartialEq,
        F: FnMut() -> anyhow::Result<T>,
    {
        self.did_time_out = false;
        self.last_error = None;

        let started = Instant::now();
        let mut sleep = INITIAL_SLEEP;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            match probe() {
                Ok(value) if value != T::default() => return Ok(value),
                Ok(_) => {}
                Err(e) => {
                    trace!(attempt = attempts, "Probe failed: {:#}", e);
                    self.last_error = Some(e);
                }
            }

            let elapsed = started.elapsed();
            if elapsed >= self.timeout {
                break;
            }
            thread::sleep(sleep.min(self.timeout - elapsed));
            sleep = (sleep * 2).min(self.max_sleep);
        }

        self.did_time_out = true;
        trace!(attempts, timeout_ms = self.timeout.as_millis() as u64, "Retry timed out");

        match &self.message {
            Some(message) => Err(DialogError::timeout(message(), self.last_error.take())),
            None => Ok(T::default()),
        }
    }

    /// One-off retry without a message builder.
    ///
    /// Returns the probe's value, or the default value on timeout.
    pub fn try_for<T, F>(timeout: Duration, probe: F) -> T
    where
        T: Default + PartialEq,
        F: FnMut() -> anyhow::Result<T>,
    {
        let mut executor = Self::new(timeout);
        executor.try_until(probe).unwrap_or_default()
    }
}

impl fmt::Debug for TryUntilTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryUntilTimeout")
            .field("timeout", &self.timeout)
            .field("max_sleep", &self.max_sleep)
            .field("has_message", &self.message.is_some())
            .field("did_time_out", &self.did_time_out)
            .finish()
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
