//! Samwire Hardware Abstraction Layer
//!
//! This crate defines the traits that sit between the board-agnostic I2C
//! write driver (`samwire-core`) and the chip-specific register access
//! (`samwire-hal-samd`). Splitting them this way lets the driver state
//! machine run on the host against a simulated peripheral.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (display driver, etc.)     │
//! └─────────────────────────────────────────┘
//!                     │  NonBlockingWrite
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  samwire-core (driver + state machine)  │
//! └─────────────────────────────────────────┘
//!                     │  I2cMaster, PortMux, InterruptController,
//!                     │  ClockGate, Wait
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  samwire-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ samwire-hal-  │       │  simulated    │
//! │ samd (MMIO)   │       │  peripheral   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`sercom::I2cMaster`] - SERCOM I2C master register operations
//! - [`port::PortMux`] - Pin multiplexer and pin configuration
//! - [`irq::InterruptController`] - NVIC operations for one vector
//! - [`clock::ClockGate`] - Peripheral core clock routing
//! - [`wait::Wait`] - Busy-wait strategy
//! - [`i2c::NonBlockingWrite`] - What consumers of the driver program against

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod i2c;
pub mod irq;
pub mod port;
pub mod sercom;
pub mod wait;

// Re-export key traits at crate root for convenience
pub use clock::ClockGate;
pub use i2c::{I2cConfig, NonBlockingWrite};
pub use irq::InterruptController;
pub use port::PortMux;
pub use sercom::{BusState, I2cMaster};
pub use wait::{Bounded, Spin, Timeout, Wait};

/// Everything the driver needs from one chip, bundled
///
/// Implemented automatically for any type providing all four peripheral
/// traits.
pub trait Hardware: I2cMaster + PortMux + InterruptController + ClockGate {}

// Blanket implementation for types that implement all peripheral traits
impl<T: I2cMaster + PortMux + InterruptController + ClockGate> Hardware for T {}
