//! Wi-Fi radio reset and power sequencing
//!
//! The radio exposes two active-low rails: `WL_RESET` holds the chip in reset
//! while low, and `WL_REG_ON` enables its internal regulator while low. The
//! host's bring-up sequencing (timing between the rails) is driven by the Wi-Fi
//! stack; this type only owns the pins and their polarity.

use crate::platform::traits::GpioInterface;
use crate::platform::Result;

/// Wi-Fi radio control lines
pub struct WifiControl<R: GpioInterface, P: GpioInterface> {
    reset: R,
    power: P,
}

impl<R: GpioInterface, P: GpioInterface> WifiControl<R, P> {
    /// Take ownership of the reset and regulator pins
    pub fn new(reset: R, power: P) -> Self {
        Self { reset, power }
    }

    /// Assert (`true`, line low) or release (`false`, line high) radio reset
    pub fn set_reset_asserted(&mut self, asserted: bool) -> Result<()> {
        if asserted {
            self.reset.set_low()
        } else {
            self.reset.set_high()
        }
    }

    /// Enable (`true`, line low) or disable (`false`, line high) the radio
    /// regulator
    pub fn set_powered(&mut self, powered: bool) -> Result<()> {
        if powered {
            self.power.set_low()
        } else {
            self.power.set_high()
        }
    }
}
