//! Interrupt controller abstractions

/// Interrupt controller operations for a single vector
pub trait InterruptController {
    /// Number of implemented priority bits
    ///
    /// Logical priority levels run from 0 (most urgent) to
    /// `(1 << PRIORITY_BITS) - 1` (least urgent).
    const PRIORITY_BITS: u8;

    /// Clear a pending request for `irq`
    fn clear_pending(&self, irq: u16);

    /// Set the logical priority level of `irq`
    fn set_priority(&self, irq: u16, level: u8);

    /// Enable `irq`
    fn unmask(&self, irq: u16);

    /// Least urgent logical priority level
    fn lowest_priority() -> u8 {
        (1u8 << Self::PRIORITY_BITS) - 1
    }
}
