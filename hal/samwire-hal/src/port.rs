//! Port pin multiplexer abstractions
//!
//! Register-level access to the PORT group's PMUX and PINCFG registers.
//! Nibble selection for odd and even pins is done by the caller.

/// Pin multiplexer and pin configuration registers
pub trait PortMux {
    /// Read the PMUX register holding the pin pair `index` (pin >> 1)
    fn read_pmux(&self, port: u8, index: u8) -> u8;

    /// Write the PMUX register holding the pin pair `index`
    fn write_pmux(&self, port: u8, index: u8, value: u8);

    /// Set PINCFG.PMUXEN and PINCFG.DRVSTR, leaving other bits alone
    fn enable_mux(&self, port: u8, pin: u8);
}
