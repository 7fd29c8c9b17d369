//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod flash;
pub mod gpio;
pub mod timer;
pub mod watchdog;

// Re-export trait interfaces
pub use flash::FlashInterface;
pub use gpio::{GpioInterface, GpioMode, InterruptEdge};
pub use timer::{OneShotTimer, TimeSource};
pub use watchdog::WatchdogInterface;
