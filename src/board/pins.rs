//! Pin and peripheral mapping tables for the MiCOKit-3165
//!
//! Declarative configuration data only: which MCU port/pin each board signal
//! sits on, and which pins each peripheral role uses. Nothing here touches
//! hardware.

/// MCU GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
}

/// Physical location of a board signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMapping {
    pub port: Port,
    pub pin: u8,
}

/// Logical board signals
///
/// The first group is reserved for internal board functions; the `Gpio*`
/// entries are the user-facing pins on the expansion header, numbered by their
/// position on the EMW3165 module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardPin {
    /// Wi-Fi module GPIO1 strap
    WlGpio1,
    /// Wi-Fi module reset line (active low)
    WlReset,
    /// System status LED (active high)
    SysLed,
    /// RF activity LED (active low, open drain)
    RfLed,
    /// Bootloader strap, sampled at reset
    BootSel,
    /// Manufacturing-mode strap, sampled at reset
    MfgSel,
    /// EasyLink user button (active low)
    EasyLinkButton,
    /// Standby/wakeup switch (active low)
    StandbySel,
    /// Console UART receive
    StdioUartRx,
    /// Console UART transmit
    StdioUartTx,
    // Expansion header pins
    Gpio2,
    Gpio8,
    Gpio9,
    Gpio12,
    Gpio16,
    Gpio17,
    Gpio18,
    Gpio19,
    Gpio27,
    Gpio29,
    Gpio30,
    Gpio31,
    Gpio33,
    Gpio34,
    Gpio35,
    Gpio36,
    Gpio37,
    Gpio38,
}

/// Map a board signal to its MCU port and pin
///
/// Several expansion pins share an MCU pin with an internal signal (the module
/// routes one physical pad to both); only one of the two roles may be active
/// at a time.
pub const fn pin_mapping(pin: BoardPin) -> PinMapping {
    use BoardPin::*;
    use Port::*;
    match pin {
        // Internal signals
        WlGpio1 => PinMapping { port: A, pin: 0 },
        WlReset => PinMapping { port: B, pin: 14 },
        SysLed => PinMapping { port: B, pin: 10 },
        RfLed => PinMapping { port: A, pin: 4 },
        BootSel => PinMapping { port: B, pin: 1 },
        MfgSel => PinMapping { port: B, pin: 0 },
        EasyLinkButton => PinMapping { port: A, pin: 1 },
        StandbySel => PinMapping { port: C, pin: 13 },
        StdioUartRx => PinMapping { port: A, pin: 3 },
        StdioUartTx => PinMapping { port: A, pin: 2 },
        // Expansion header
        Gpio2 => PinMapping { port: B, pin: 2 },
        Gpio8 => PinMapping { port: A, pin: 2 },
        Gpio9 => PinMapping { port: A, pin: 1 },
        Gpio12 => PinMapping { port: A, pin: 3 },
        Gpio16 => PinMapping { port: C, pin: 13 },
        Gpio17 => PinMapping { port: B, pin: 10 },
        Gpio18 => PinMapping { port: B, pin: 9 },
        Gpio19 => PinMapping { port: B, pin: 12 },
        Gpio27 => PinMapping { port: A, pin: 12 },
        Gpio29 => PinMapping { port: A, pin: 10 },
        Gpio30 => PinMapping { port: B, pin: 6 },
        Gpio31 => PinMapping { port: B, pin: 8 },
        Gpio33 => PinMapping { port: B, pin: 13 },
        Gpio34 => PinMapping { port: A, pin: 5 },
        Gpio35 => PinMapping { port: A, pin: 10 },
        Gpio36 => PinMapping { port: B, pin: 1 },
        Gpio37 => PinMapping { port: B, pin: 0 },
        Gpio38 => PinMapping { port: A, pin: 4 },
    }
}

/// UART peripheral selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartPeripheral {
    Usart1,
    Usart2,
}

/// UART role-to-pin mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartMapping {
    pub peripheral: UartPeripheral,
    pub tx: BoardPin,
    pub rx: BoardPin,
}

/// Console UART, shared with the expansion header pins 8/12
pub const STDIO_UART: UartMapping = UartMapping {
    peripheral: UartPeripheral::Usart2,
    tx: BoardPin::StdioUartTx,
    rx: BoardPin::StdioUartRx,
};

/// User UART on the expansion header
pub const USER_UART: UartMapping = UartMapping {
    peripheral: UartPeripheral::Usart1,
    tx: BoardPin::Gpio30,
    rx: BoardPin::Gpio29,
};

/// ADC channel mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcMapping {
    pub pin: BoardPin,
    pub channel: u8,
}

/// PWM channel mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmMapping {
    pub pin: BoardPin,
    pub timer: u8,
    pub channel: u8,
}

/// SPI bus mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiMapping {
    pub mosi: BoardPin,
    pub miso: BoardPin,
    pub clock: BoardPin,
}

/// I2C bus mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cMapping {
    pub scl: BoardPin,
    pub sda: BoardPin,
}

// No ADC/PWM/SPI/I2C routing is committed for this board revision; the slots
// are kept so consumers can index the roles uniformly across boards.
pub const ADC_MAPPINGS: [Option<AdcMapping>; 1] = [None];
pub const PWM_MAPPINGS: [Option<PwmMapping>; 1] = [None];
pub const SPI_MAPPINGS: [Option<SpiMapping>; 1] = [None];
pub const I2C_MAPPINGS: [Option<I2cMapping>; 1] = [None];
