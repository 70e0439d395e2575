//! Retry budget and exponential backoff.

use std::time::Duration;

/// Default number of attempts, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default delay before the second attempt.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);
/// Default growth factor between delays.
pub const DEFAULT_BACKOFF_MULTIPLIER: u32 = 2;

/// How many times a retryable request is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    backoff_multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

impl RetryPolicy {
    /// Creates the default policy: 3 attempts, 1s base, doubling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single attempt, no retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self::default().with_max_attempts(1)
    }

    /// Sets the attempt budget. Values below 1 are raised to 1.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        self
    }

    /// Sets the delay before the second attempt.
    #[must_use]
    pub const fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Sets the growth factor. Values below 1 are raised to 1.
    #[must_use]
    pub const fn with_backoff_multiplier(mut self, multiplier: u32) -> Self {
        self.backoff_multiplier = if multiplier == 0 { 1 } else { multiplier };
        self
    }

    /// Attempt budget, including the first attempt.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the second attempt.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Growth factor between delays.
    #[must_use]
    pub const fn backoff_multiplier(&self) -> u32 {
        self.backoff_multiplier
    }

    /// Delay before 1-indexed `attempt`: `base * multiplier^(attempt - 2)`, zero for the first.
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt < 2 {
            return Duration::ZERO;
        }

        let factor = self.backoff_multiplier.saturating_pow(attempt - 2);
        self.base_delay.saturating_mul(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, 0 ; "first_attempt_is_immediate")]
    #[test_case(2, 1000 ; "second_attempt_waits_base")]
    #[test_case(3, 2000 ; "third_attempt_doubles")]
    #[test_case(4, 4000 ; "fourth_attempt_doubles_again")]
    fn test_default_backoff(attempt: u32, expected_ms: u64) {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before(attempt), Duration::from_millis(expected_ms));
    }

    #[test]
    fn test_custom_multiplier() {
        let policy = RetryPolicy::new()
            .with_base_delay(Duration::from_millis(100))
            .with_backoff_multiplier(3);

        assert_eq!(policy.delay_before(2), Duration::from_millis(100));
        assert_eq!(policy.delay_before(3), Duration::from_millis(300));
        assert_eq!(policy.delay_before(4), Duration::from_millis(900));
    }

    #[test]
    fn test_delay_saturates() {
        let policy = RetryPolicy::default();
        assert!(policy.delay_before(200) >= policy.delay_before(20));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::new().with_max_attempts(0).max_attempts(), 1);
        assert_eq!(RetryPolicy::no_retry().max_attempts(), 1);
    }
}
