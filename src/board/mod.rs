//! MiCOKit-3165 board definition
//!
//! Pin-to-peripheral mapping tables and the board-level behaviors built on them.
//! Everything here talks to hardware exclusively through the
//! [`platform::traits`](crate::platform::traits) contracts, so the same code runs
//! against the real drivers and against [`platform::mock`](crate::platform::mock)
//! in host tests.

pub mod buttons;
pub mod leds;
pub mod pins;
pub mod startup;
pub mod wifi;

pub use buttons::{ButtonConfig, ButtonEvent, ButtonMonitor, IrqButtonMonitor, StandbyButton};
pub use leds::{RfLed, SysLed};
pub use pins::{BoardPin, PinMapping, Port};
pub use startup::{boot_mode, report_watchdog_reset, BootMode};
pub use wifi::WifiControl;
