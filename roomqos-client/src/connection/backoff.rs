/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Bounded exponential backoff schedule for the reconnection loop.
//!
//! The schedule is a plain state object with a pure delay function, so the
//! retry timing is testable without running timers.

use std::time::Duration;

use crate::constants::{DEFAULT_MAX_RETRIES, RECONNECT_BASE_DELAY_MS, RECONNECT_MAX_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffSchedule {
    attempt: u32,
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl BackoffSchedule {
    pub fn new(max_attempts: u32) -> Self {
        Self::with_delays(
            max_attempts,
            Duration::from_millis(RECONNECT_BASE_DELAY_MS),
            Duration::from_millis(RECONNECT_MAX_DELAY_MS),
        )
    }

    pub fn with_delays(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            base_delay_ms: base_delay.as_millis() as u64,
            max_delay_ms: max_delay.as_millis() as u64,
        }
    }

    /// The attempt most recently started, 0 before the first.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempt >= self.max_attempts
    }

    /// Advance to the next attempt, or `None` when the budget is spent.
    pub fn begin_attempt(&mut self) -> Option<u32> {
        if self.is_exhausted() {
            return None;
        }
        self.attempt += 1;
        Some(self.attempt)
    }

    /// Wait before `attempt`, following `min(max, base * 2^(attempt - 2))`:
    /// the first attempt runs immediately, attempt 2 waits one base delay,
    /// attempt 3 twice that, doubling up to the cap.
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        if attempt <= 1 {
            return None;
        }
        let exponent = attempt - 2;
        let ms = self
            .base_delay_ms
            .saturating_mul(1u64.checked_shl(exponent).unwrap_or(u64::MAX))
            .min(self.max_delay_ms);
        Some(Duration::from_millis(ms))
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attempt_has_no_delay() {
        let schedule = BackoffSchedule::new(3);
        assert_eq!(schedule.delay_before(1), None);
    }

    #[test]
    fn test_reference_schedule() {
        let schedule = BackoffSchedule::new(3);
        assert_eq!(schedule.delay_before(2), Some(Duration::from_millis(700)));
        assert_eq!(schedule.delay_before(3), Some(Duration::from_millis(1400)));
    }

    #[test]
    fn test_delay_doubles_then_caps() {
        let schedule = BackoffSchedule::new(10);
        assert_eq!(schedule.delay_before(4), Some(Duration::from_millis(2800)));
        // 700 * 2^3 = 5600 is over the 5000ms cap.
        assert_eq!(schedule.delay_before(5), Some(Duration::from_millis(5000)));
        assert_eq!(schedule.delay_before(9), Some(Duration::from_millis(5000)));
    }

    #[test]
    fn test_begin_attempt_respects_budget() {
        let mut schedule = BackoffSchedule::new(3);
        assert_eq!(schedule.begin_attempt(), Some(1));
        assert_eq!(schedule.begin_attempt(), Some(2));
        assert_eq!(schedule.begin_attempt(), Some(3));
        assert!(schedule.is_exhausted());
        assert_eq!(schedule.begin_attempt(), None);
    }

    #[test]
    fn test_reset_restores_budget() {
        let mut schedule = BackoffSchedule::new(1);
        assert_eq!(schedule.begin_attempt(), Some(1));
        assert_eq!(schedule.begin_attempt(), None);
        schedule.reset();
        assert_eq!(schedule.attempt(), 0);
        assert_eq!(schedule.begin_attempt(), Some(1));
    }

    #[test]
    fn test_custom_delays() {
        let schedule = BackoffSchedule::with_delays(
            5,
            Duration::from_millis(100),
            Duration::from_millis(350),
        );
        assert_eq!(schedule.delay_before(2), Some(Duration::from_millis(100)));
        assert_eq!(schedule.delay_before(3), Some(Duration::from_millis(200)));
        assert_eq!(schedule.delay_before(4), Some(Duration::from_millis(350)));
    }
}
