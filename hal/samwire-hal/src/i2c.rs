//! I2C bus abstractions
//!
//! Provides the consumer-facing trait for non-blocking writes and the bus
//! configuration shared by every chip HAL.

/// Assumed core clock feeding the SERCOM peripheral
///
/// Both supported boards run the generic clock generator used by the
/// driver at 48 MHz out of reset under the Arduino cores.
pub const SYSTEM_CLOCK_HZ: u32 = 48_000_000;

/// Non-blocking I2C writer
///
/// A write hands the buffer to the driver and returns as soon as the
/// address phase has been started. The buffer must stay untouched until
/// [`is_busy`](Self::is_busy) reports `false`, which `'static` enforces.
pub trait NonBlockingWrite {
    /// Error type for write operations
    type Error;

    /// Start writing `data` to the device at `address`
    ///
    /// Waits for a previous write to finish first, so at most one
    /// transfer is ever in flight.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write (may be empty)
    fn write(&self, address: u8, data: &'static [u8]) -> Result<(), Self::Error>;

    /// Check whether a write is still in flight
    fn is_busy(&self) -> bool;

    /// Wait until the in-flight write, if any, has finished
    fn flush(&self) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}
