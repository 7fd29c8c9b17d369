//! Status LED control
//!
//! The board carries two status LEDs with opposite polarities: the system LED
//! is driven push-pull and lights when high, the RF LED hangs off an open-drain
//! output and lights when low. Both constructors leave the LED off, matching
//! the board's power-on state.

use crate::platform::traits::GpioInterface;
use crate::platform::Result;

/// System status LED (active high)
pub struct SysLed<P: GpioInterface> {
    pin: P,
}

impl<P: GpioInterface> SysLed<P> {
    /// Take ownership of the LED pin and switch the LED off
    pub fn new(mut pin: P) -> Result<Self> {
        pin.set_low()?;
        Ok(Self { pin })
    }

    /// Turn the LED on or off
    pub fn set(&mut self, on: bool) -> Result<()> {
        if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }
}

/// RF activity LED (active low, open drain)
pub struct RfLed<P: GpioInterface> {
    pin: P,
}

impl<P: GpioInterface> RfLed<P> {
    /// Take ownership of the LED pin and switch the LED off
    pub fn new(mut pin: P) -> Result<Self> {
        pin.set_high()?;
        Ok(Self { pin })
    }

    /// Turn the LED on or off
    pub fn set(&mut self, on: bool) -> Result<()> {
        if on {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        }
    }
}
