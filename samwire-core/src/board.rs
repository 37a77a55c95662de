//! Board configuration types
//!
//! A board configuration names the SERCOM instance wired to the I2C header,
//! its clock channel and interrupt vector, and the two pins with their
//! multiplexer function. Values come from each board's Arduino variant file.

/// Microcontroller family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Silicon {
    /// SAMD21 (Cortex-M0+, legacy GCLK CLKCTRL)
    Samd21,
    /// SAMD51 (Cortex-M4F, per-peripheral GCLK channels)
    Samd51,
}

/// PORT group
pub const PORT_A: u8 = 0;
/// PORT group
pub const PORT_B: u8 = 1;

/// Peripheral multiplexer function
///
/// SERCOM lines are on function C (primary) or D (alternate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Function {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
    J = 9,
    K = 10,
    L = 11,
    M = 12,
    N = 13,
}

impl Function {
    /// Four-bit PMUXE/PMUXO field value
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// One pin routed to a peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMux {
    /// PORT group (0 = PA, 1 = PB)
    pub port: u8,
    /// Pin number within the group (0-31)
    pub pin: u8,
    /// Multiplexer function
    pub function: Function,
}

impl PinMux {
    /// Create a new pin mux descriptor
    pub const fn new(port: u8, pin: u8, function: Function) -> Self {
        Self {
            port,
            pin,
            function,
        }
    }

    /// Index of the PMUX register shared with the neighbouring pin
    pub const fn pmux_index(&self) -> u8 {
        self.pin >> 1
    }

    /// Odd pins use the PMUXO (high) nibble
    pub const fn is_odd(&self) -> bool {
        self.pin % 2 == 1
    }
}

/// Everything that differs between boards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Human-readable board name, used in logs
    pub name: &'static str,
    /// Microcontroller family
    pub silicon: Silicon,
    /// SERCOM instance number
    pub sercom: u8,
    /// Generic clock channel of the SERCOM core clock
    pub gclk_id: u8,
    /// Interrupt vector raised for the master-on-bus flag
    pub irq: u16,
    /// Data line
    pub sda: PinMux,
    /// Clock line
    pub scl: PinMux,
}

/// Adafruit Feather M0 (tested)
pub const FEATHER_M0: BoardConfig = BoardConfig {
    name: "feather-m0",
    silicon: Silicon::Samd21,
    sercom: 3,
    gclk_id: 23,
    irq: 12,
    sda: PinMux::new(PORT_A, 22, Function::C),
    scl: PinMux::new(PORT_A, 23, Function::C),
};

/// Adafruit QT Py M0 (tested)
pub const QTPY_M0: BoardConfig = BoardConfig {
    name: "qtpy-m0",
    silicon: Silicon::Samd21,
    sercom: 1,
    gclk_id: 21,
    irq: 10,
    sda: PinMux::new(PORT_A, 16, Function::C),
    scl: PinMux::new(PORT_A, 17, Function::C),
};

/// Adafruit Trinket M0
///
/// SDA and SCL are silkscreen pins 0 and 2. Not verified on hardware.
pub const TRINKET_M0: BoardConfig = BoardConfig {
    name: "trinket-m0",
    silicon: Silicon::Samd21,
    sercom: 2,
    gclk_id: 22,
    irq: 11,
    sda: PinMux::new(PORT_A, 8, Function::D),
    scl: PinMux::new(PORT_A, 9, Function::D),
};

/// Adafruit Feather M4 Express (tested)
///
/// SAMD51 splits each SERCOM interrupt over four vectors; the
/// master-on-bus flag is on the first one (SERCOM2_0).
pub const FEATHER_M4_EXPRESS: BoardConfig = BoardConfig {
    name: "feather-m4-express",
    silicon: Silicon::Samd51,
    sercom: 2,
    gclk_id: 23,
    irq: 54,
    sda: PinMux::new(PORT_A, 12, Function::C),
    scl: PinMux::new(PORT_A, 13, Function::C),
};

/// All built-in boards
pub static BOARDS: [BoardConfig; 4] = [FEATHER_M0, QTPY_M0, TRINKET_M0, FEATHER_M4_EXPRESS];

/// Look up a built-in board by name
pub fn find_board(name: &str) -> Option<&'static BoardConfig> {
    BOARDS.iter().find(|b| b.name == name)
}
