//! Interrupt-driven I2C write driver for SAMD SERCOM peripherals
//!
//! This crate contains all driver logic that does not depend on real
//! register addresses:
//!
//! - Board configuration data (which SERCOM, clock channel, IRQ, pins)
//! - Pin multiplexer configuration
//! - One-time peripheral bring-up
//! - Transfer state shared with the interrupt handler
//! - The byte-serializing interrupt handler
//! - The public `write` / `is_busy` / `flush` API
//!
//! A write returns as soon as the address phase has started; one byte goes
//! out per master-on-bus interrupt. Only one transfer is ever in flight: a
//! second `write` sleeps until the first has issued its stop condition.
//!
//! # Example
//!
//! ```ignore
//! static I2C: Driver<Samd, Wfi> = Driver::new(FEATHER_M0, I2cConfig::STANDARD, Samd::new(&FEATHER_M0), Wfi);
//! static FRAME: [u8; 3] = [0x00, 0xAE, 0xAF];
//!
//! I2C.write(0x3C, &FRAME)?;
//! while I2C.is_busy() {
//!     // draw the next frame
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod board;
pub mod driver;
pub mod error;
pub mod handler;
pub mod init;
pub mod pinmux;
pub mod transfer;

#[cfg(test)]
mod sim;

pub use board::{BoardConfig, Function, PinMux, Silicon};
pub use driver::Driver;
pub use error::{Stage, Stalled};
pub use init::baud_divisor;
pub use transfer::{Step, Transfer, TransferState};

// Re-export the HAL so chip crates and applications need one dependency
pub use samwire_hal as hal;
