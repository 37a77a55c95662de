//! SAMD21/SAMD51 support for the samwire I2C write driver
//!
//! This crate provides the memory-mapped implementations of the
//! `samwire-hal` traits and wires one process-wide driver to the board
//! selected at build time:
//!
//! - SERCOM I2C master, PORT and GCLK register blocks (`tock-registers`)
//! - NVIC binding for the SERCOM vector
//! - [`Wfi`] wait strategy
//! - The SERCOM interrupt vector for the selected board
//!
//! # Features
//!
//! - `feather-m0`, `qtpy-m0`, `trinket-m0` - SAMD21 boards
//! - `feather-m4` - SAMD51 board (Feather M4 Express)
//! - `custom-board` - No built-in driver; build a [`Driver`] from your own
//!   `BoardConfig` and call its `on_interrupt` from your vector. Enable
//!   `samd21` or `samd51` alongside.
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! ```ignore
//! static FRAME: [u8; 1025] = [0; 1025];
//!
//! samwire_hal_samd::write(0x3C, &FRAME);
//! while samwire_hal_samd::is_busy() {
//!     // render the next frame into the other buffer
//! }
//! ```

#![no_std]

pub mod board;
pub mod gclk;
pub mod nvic;
pub mod port;
pub mod sercom;
pub mod wait;

pub use samwire_core::{BoardConfig, Driver, Stalled};
pub use samwire_hal::I2cConfig;
pub use wait::Wfi;

use sercom::I2cmRegisters;

/// Register handle for the SERCOM and the PORT/GCLK blocks it depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Samd {
    sercom: usize,
}

impl Samd {
    /// Handle for the SERCOM used by `board`
    ///
    /// # Panics
    ///
    /// If the board names a SERCOM the silicon does not have.
    pub const fn new(board: &BoardConfig) -> Self {
        Self {
            sercom: sercom::base_address(board.sercom),
        }
    }

    /// SERCOM base address
    pub fn sercom_address(&self) -> usize {
        self.sercom
    }

    fn i2cm(&self) -> &I2cmRegisters {
        // SAFETY: address comes from the silicon's SERCOM table; every
        // register field is a volatile cell
        unsafe { &*(self.sercom as *const I2cmRegisters) }
    }
}

#[cfg(not(feature = "custom-board"))]
pub use builtin::*;

#[cfg(not(feature = "custom-board"))]
mod builtin {
    use samwire_hal::I2cConfig;

    use crate::board::ACTIVE;
    use crate::{Driver, Samd, Wfi};

    /// Driver for the board selected by cargo feature
    pub static I2C: Driver<Samd, Wfi> =
        Driver::new(ACTIVE, I2cConfig::STANDARD, Samd::new(&ACTIVE), Wfi);

    /// Start writing `data` to the device at `address`
    ///
    /// Brings the SERCOM up on first use and sleeps while a previous write
    /// is still in flight. Returns once the address phase has started.
    pub fn write(address: u8, data: &'static [u8]) {
        if let Err(stall) = I2C.write(address, data) {
            match stall.source {}
        }
    }

    /// Check whether a write is still in flight
    pub fn is_busy() -> bool {
        I2C.is_busy()
    }

    /// Sleep until the in-flight write, if any, has finished
    pub fn flush() {
        if let Err(stall) = I2C.flush() {
            match stall.source {}
        }
    }

    /// Service the SERCOM interrupt for the built-in driver
    pub fn on_interrupt() {
        if let Err(stall) = I2C.on_interrupt() {
            match stall.source {}
        }
    }

    #[cfg(feature = "feather-m0")]
    #[allow(non_snake_case)]
    #[no_mangle]
    extern "C" fn SERCOM3() {
        on_interrupt();
    }

    #[cfg(feature = "qtpy-m0")]
    #[allow(non_snake_case)]
    #[no_mangle]
    extern "C" fn SERCOM1() {
        on_interrupt();
    }

    #[cfg(feature = "trinket-m0")]
    #[allow(non_snake_case)]
    #[no_mangle]
    extern "C" fn SERCOM2() {
        on_interrupt();
    }

    // MB is routed to the first of the four SERCOM2 lines
    #[cfg(feature = "feather-m4")]
    #[allow(non_snake_case)]
    #[no_mangle]
    extern "C" fn SERCOM2_0() {
        on_interrupt();
    }
}
