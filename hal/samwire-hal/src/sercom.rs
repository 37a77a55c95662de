//! SERCOM I2C master abstractions
//!
//! One method per register operation the driver performs. Implementations
//! are expected to be thin volatile accesses; all sequencing and waiting
//! lives in the driver.

/// Bus state as reported by the STATUS.BUSSTATE field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BusState {
    /// State unknown, e.g. right after enable
    Unknown = 0,
    /// Bus idle, a start condition may be issued
    Idle = 1,
    /// This controller owns the bus
    Owner = 2,
    /// Another controller owns the bus
    Busy = 3,
}

impl BusState {
    /// Decode the two-bit BUSSTATE field
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            1 => Self::Idle,
            2 => Self::Owner,
            3 => Self::Busy,
            _ => Self::Unknown,
        }
    }

    /// Raw field value
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Whether a new transfer may be started in this state
    pub const fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::Owner)
    }
}

/// SERCOM in I2C master mode
pub trait I2cMaster {
    /// Request a software reset (CTRLA.SWRST)
    fn software_reset(&self);

    /// Check if the software reset is still in progress
    ///
    /// True while CTRLA.SWRST or SYNCBUSY.SWRST reads back set.
    fn is_resetting(&self) -> bool;

    /// Select I2C master mode with run-in-standby (CTRLA.MODE, RUNSTDBY)
    fn configure_master(&self);

    /// Write the BAUD field
    fn set_baud(&self, baud: u8);

    /// Enable the peripheral (CTRLA.ENABLE)
    fn enable(&self);

    /// Check if the enable is still synchronizing (SYNCBUSY.ENABLE)
    fn is_enabling(&self) -> bool;

    /// Read the bus state field
    fn bus_state(&self) -> BusState;

    /// Force the bus state field (only `Idle` is meaningful)
    fn force_bus_state(&self, state: BusState);

    /// Check if a system operation is still synchronizing (SYNCBUSY.SYSOP)
    fn is_sysop_busy(&self) -> bool;

    /// Enable the master-on-bus (ready to transmit) interrupt source
    fn enable_ready_interrupt(&self);

    /// Disable the master-on-bus (ready to transmit) interrupt source
    fn disable_ready_interrupt(&self);

    /// Read the master-on-bus flag (INTFLAG.MB)
    fn is_ready(&self) -> bool;

    /// Write one to the master-on-bus flag
    fn clear_ready(&self);

    /// Write the ADDR field, which issues start and the address phase
    fn write_address(&self, addr: u16);

    /// Write the DATA register, which transmits one byte
    fn write_data(&self, byte: u8);

    /// Issue a stop condition (CTRLB.CMD = 3)
    fn command_stop(&self);
}
