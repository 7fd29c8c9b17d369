//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use emw3165_bsp::platform::mock::MockFlash;
//! use emw3165_bsp::platform::traits::FlashInterface;
//!
//! let mut flash = MockFlash::new(0x0800_0000, 512 * 1024);
//! flash.init().unwrap();
//! flash.erase(0x0804_0000, 0x0804_0FFF).unwrap();
//!
//! let mut addr = 0x0804_0000;
//! flash.write(&mut addr, &[0xDE, 0xAD]).unwrap();
//! assert_eq!(addr, 0x0804_0002);
//! ```

#![cfg(any(test, feature = "mock"))]

mod flash;
mod gpio;
mod timer;
mod watchdog;

pub use flash::MockFlash;
pub use gpio::MockGpio;
pub use timer::{MockClock, MockOneShot};
pub use watchdog::MockWatchdog;
