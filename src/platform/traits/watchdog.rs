//! Watchdog interface trait

/// Watchdog reset-cause interface
///
/// Abstracts the platform's reset-cause register so board code stays free of
/// register literals.
pub trait WatchdogInterface {
    /// Check whether the previous reset was caused by the watchdog
    ///
    /// Reads and clears the sticky reset-cause flag, so the answer is only
    /// valid once per boot.
    fn reset_by_watchdog(&mut self) -> bool;
}
