//! Timer interface traits
//!
//! This module defines the monotonic clock and one-shot timer interfaces that
//! platform implementations must provide.

use crate::platform::Result;

/// Monotonic time source
///
/// # Safety Invariants
///
/// - Timer peripheral must be initialized before use
/// - Monotonic within the wrap period (never goes backwards between wraps)
pub trait TimeSource {
    /// Get current time in milliseconds
    ///
    /// Returns a monotonic millisecond tick count since platform initialization.
    /// The count wraps around after approximately 49.7 days (2^32 ms); callers
    /// must use wrapping arithmetic when computing durations.
    fn now_ms(&self) -> u32;
}

/// One-shot timer interface
///
/// The timeout and expiry routing are fixed when the platform glue creates the
/// timer: on expiry the glue invokes the matching handler method (for example
/// [`ButtonMonitor::on_timeout`](crate::board::buttons::ButtonMonitor::on_timeout))
/// exactly once, unless the timer was stopped first.
///
/// # Safety Invariants
///
/// - Only one owner per timer instance
/// - `start` on an already-armed timer restarts the countdown
pub trait OneShotTimer {
    /// Arm the timer
    ///
    /// The expiry handler fires once after the configured timeout unless
    /// [`stop`](OneShotTimer::stop) is called first.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer(TimerError::StartFailed)` if the timer
    /// hardware cannot be armed.
    fn start(&mut self) -> Result<()>;

    /// Disarm the timer
    ///
    /// A stopped timer does not fire. Stopping an idle timer is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the timer hardware rejects the request.
    fn stop(&mut self) -> Result<()>;
}
