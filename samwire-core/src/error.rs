//! Driver error types
//!
//! With an unbounded wait strategy the driver cannot fail: the source error
//! type is `Infallible` and a stuck peripheral hangs the caller. A bounded
//! strategy reports which wait gave up instead.

/// Busy-wait that did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Peripheral clock channel disable/enable acknowledgment
    Clock,
    /// Software reset completion
    Reset,
    /// Peripheral enable synchronization
    Enable,
    /// Forcing the bus state to idle
    SysOp,
    /// Previous transfer still in flight
    PreviousTransfer,
    /// Bus neither idle nor owned by this controller
    BusIdle,
    /// Stop condition synchronization
    StopSync,
    /// Master-on-bus flag did not read back clear
    FlagClear,
}

/// A wait strategy gave up during `stage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stalled<E> {
    /// Which wait gave up
    pub stage: Stage,
    /// Error reported by the wait strategy
    pub source: E,
}

impl<E> Stalled<E> {
    /// Create a new stall report
    pub const fn new(stage: Stage, source: E) -> Self {
        Self { stage, source }
    }
}
