//! Mock timer implementations for testing

use crate::platform::{
    error::{PlatformError, TimerError},
    traits::{OneShotTimer, TimeSource},
    Result,
};
use core::cell::Cell;

/// Mock monotonic clock
///
/// Time only moves when the test advances it.
#[derive(Debug)]
pub struct MockClock {
    now_ms: Cell<u32>,
}

impl MockClock {
    /// Create a new mock clock starting at tick zero
    pub fn new() -> Self {
        Self { now_ms: Cell::new(0) }
    }

    /// Create a mock clock starting at an arbitrary tick
    ///
    /// Useful for exercising wraparound near `u32::MAX`.
    pub fn starting_at(now_ms: u32) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    /// Advance the clock by `ms` milliseconds (wrapping)
    pub fn advance(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get().wrapping_add(ms));
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MockClock {
    fn now_ms(&self) -> u32 {
        self.now_ms.get()
    }
}

/// Mock one-shot timer
///
/// Records arm/disarm calls for test verification. Expiry is simulated by the
/// test invoking the owning component's timeout handler directly while the
/// timer is armed.
#[derive(Debug, Default)]
pub struct MockOneShot {
    armed: bool,
    start_count: u32,
    stop_count: u32,
    fail_next_start: bool,
}

impl MockOneShot {
    /// Create a new disarmed mock timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the timer is currently armed
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Number of times the timer was armed
    pub fn start_count(&self) -> u32 {
        self.start_count
    }

    /// Number of times the timer was disarmed
    pub fn stop_count(&self) -> u32 {
        self.stop_count
    }

    /// Make the next `start` call fail (for testing error handling)
    pub fn fail_next_start(&mut self) {
        self.fail_next_start = true;
    }

    /// Simulate expiry: disarm and report whether the timer was armed
    ///
    /// The test is responsible for calling the timeout handler when this
    /// returns `true`.
    pub fn fire(&mut self) -> bool {
        let was_armed = self.armed;
        self.armed = false;
        was_armed
    }
}

impl OneShotTimer for MockOneShot {
    fn start(&mut self) -> Result<()> {
        if self.fail_next_start {
            self.fail_next_start = false;
            return Err(PlatformError::Timer(TimerError::StartFailed));
        }
        self.armed = true;
        self.start_count += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.armed = false;
        self.stop_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_clock_advances() {
        let clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);

        clock.advance(120);
        assert_eq!(clock.now_ms(), 120);

        clock.advance(30);
        assert_eq!(clock.now_ms(), 150);
    }

    #[test]
    fn test_mock_clock_wraps() {
        let clock = MockClock::starting_at(u32::MAX);
        clock.advance(10);
        assert_eq!(clock.now_ms(), 9);
    }

    #[test]
    fn test_mock_one_shot_arm_disarm() {
        let mut timer = MockOneShot::new();
        assert!(!timer.is_armed());

        timer.start().unwrap();
        assert!(timer.is_armed());
        assert_eq!(timer.start_count(), 1);

        timer.stop().unwrap();
        assert!(!timer.is_armed());
        assert_eq!(timer.stop_count(), 1);
    }

    #[test]
    fn test_mock_one_shot_fire_disarms() {
        let mut timer = MockOneShot::new();
        timer.start().unwrap();

        assert!(timer.fire());
        assert!(!timer.is_armed());
        // A second fire reports the timer was already disarmed
        assert!(!timer.fire());
    }

    #[test]
    fn test_mock_one_shot_start_failure() {
        let mut timer = MockOneShot::new();
        timer.fail_next_start();

        assert_eq!(
            timer.start(),
            Err(PlatformError::Timer(TimerError::StartFailed))
        );
        assert!(!timer.is_armed());

        // Failure is one-shot
        timer.start().unwrap();
        assert!(timer.is_armed());
    }
}
