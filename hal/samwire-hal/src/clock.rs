//! Peripheral clock abstractions
//!
//! SAMD51 routes generic clocks through per-peripheral channels that must be
//! disabled before reconfiguration, each change acknowledged by the CHEN bit.
//! SAMD21 has a single CLKCTRL register and a global SYNCBUSY bit. Both fit
//! the same four steps; legacy silicon makes the disable step a no-op.

/// Core clock routing for one peripheral channel
pub trait ClockGate {
    /// Stop the clock channel `id`
    fn disable_channel(&self, id: u8);

    /// Check whether the disable requested for `id` has taken effect
    fn is_channel_disabled(&self, id: u8) -> bool;

    /// Route the driver's clock generator to channel `id` and enable it
    fn enable_channel(&self, id: u8);

    /// Check whether the enable requested for `id` has taken effect
    fn is_channel_enabled(&self, id: u8) -> bool;
}
