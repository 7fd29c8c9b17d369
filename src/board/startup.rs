//! Boot-time checks
//!
//! The reset-button straps select which image the ROM hands control to, and the
//! watchdog reset-cause check reports (but never acts on) an unexpected reboot.

use crate::platform::traits::{GpioInterface, WatchdogInterface};

/// Image selected by the BOOT_SEL / MFG_SEL straps at reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootMode {
    /// Normal application image
    Application,
    /// Firmware-update bootloader
    Bootloader,
    /// Manufacturing test image
    Manufacturing,
}

/// Sample the boot straps and decide which image to enter
///
/// Both straps are active low: holding BOOT_SEL alone requests the bootloader,
/// holding both requests the manufacturing image.
pub fn boot_mode(boot_sel: &impl GpioInterface, mfg_sel: &impl GpioInterface) -> BootMode {
    match (boot_sel.read(), mfg_sel.read()) {
        (false, false) => BootMode::Manufacturing,
        (false, true) => BootMode::Bootloader,
        _ => BootMode::Application,
    }
}

/// Check whether the previous reset was watchdog-triggered and log it
///
/// Informational only: control flow never changes based on the answer. Returns
/// the flag so callers can surface it elsewhere (e.g. a diagnostics report).
pub fn report_watchdog_reset(watchdog: &mut impl WatchdogInterface) -> bool {
    let tripped = watchdog.reset_by_watchdog();
    if tripped {
        crate::log_warn!("watchdog reset occurred previously; check the watchdog feed points");
    }
    tripped
}
