use std::time::Duration;

/// Minimum wait between API calls. Callers cannot configure a faster pace.
pub(crate) const SLEEP_MIN: Duration = Duration::from_millis(200);

/// Rate-limit configuration for both async and blocking clients.
///
/// After every successful response the client sleeps for
/// `max(SLEEP_MIN, sleep_time)`. Error responses surface immediately and skip
/// the sleep.
#[derive(Debug, Clone, Copy)]
pub struct ThrottleConfig {
    /// Requested wait between API calls.
    pub sleep_time: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            sleep_time: Duration::from_millis(500),
        }
    }
}

impl ThrottleConfig {
    #[must_use]
    pub fn new(sleep_time: Duration) -> Self {
        Self { sleep_time }
    }

    /// The enforced inter-request delay, floored at [`SLEEP_MIN`].
    #[must_use]
    pub fn effective_delay(&self) -> Duration {
        self.sleep_time.max(SLEEP_MIN)
    }
}
