//! Mock watchdog implementation for testing

use crate::platform::traits::WatchdogInterface;

/// Mock watchdog reset-cause register
///
/// Models the sticky reset-cause flag: reading it through
/// [`WatchdogInterface::reset_by_watchdog`] clears it.
#[derive(Debug, Default)]
pub struct MockWatchdog {
    reset_flag: bool,
}

impl MockWatchdog {
    /// Create a mock with no pending reset cause
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock reporting a watchdog-triggered previous reset
    pub fn after_watchdog_reset() -> Self {
        Self { reset_flag: true }
    }
}

impl WatchdogInterface for MockWatchdog {
    fn reset_by_watchdog(&mut self) -> bool {
        let flag = self.reset_flag;
        self.reset_flag = false;
        flag
    }
}
