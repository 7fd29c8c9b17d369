#![cfg_attr(not(any(test, feature = "mock")), no_std)]

//! emw3165-bsp - Board support package for the MiCOKit-3165 (EMW3165) board
//!
//! This library declares the board's pin-to-peripheral mappings and implements the
//! board-level behaviors built on them: button debounce and long-press detection,
//! status LED control, Wi-Fi radio reset/power sequencing, a watchdog-reset check,
//! and (behind the `bootloader` feature) the one-time routine that copies the radio
//! firmware image out of its staging flash region and verifies it with CRC-8.
//!
//! Hardware access goes through the traits in [`platform::traits`]; the real
//! GPIO/timer/flash drivers live outside this crate. [`platform::mock`] provides
//! in-memory implementations for host-side tests.

// Platform abstraction layer (collaborator contracts + mocks)
pub mod platform;

// Board definition: pin tables, buttons, LEDs, Wi-Fi control, startup checks
pub mod board;

// One-time radio firmware staging (bootloader builds only)
#[cfg(feature = "bootloader")]
pub mod bootloader;

// Log macros (defmt on embedded targets, println in host tests)
pub mod logging;
