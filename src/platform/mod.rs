//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the peripheral drivers the BSP
//! consumes. The real STM32/MiCO drivers live outside this crate; board code only
//! sees the traits defined here.

pub mod error;
pub mod traits;

// Mock implementations (host testing only)
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
