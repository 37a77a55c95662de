//! Busy-wait strategies
//!
//! Every wait in the driver is a poll loop on a hardware status bit or on
//! the busy indicator. The loop calls into a [`Wait`] strategy once per
//! unsuccessful poll, passing how many polls have failed so far. The
//! default strategies never give up; [`Bounded`] turns a stuck peripheral
//! into a [`Timeout`] instead of a hang.

use core::convert::Infallible;

/// Strategy invoked between polls
pub trait Wait {
    /// Error returned when the strategy gives up
    type Error;

    /// Called between polls of a hardware synchronization or status bit
    ///
    /// These waits are short (a few peripheral clock cycles) and may run
    /// inside the interrupt handler.
    fn spin(&self, polls: u32) -> Result<(), Self::Error>;

    /// Called between polls of the transfer busy indicator
    ///
    /// These waits last until the interrupt handler finishes a transfer,
    /// so implementations should sleep until the next interrupt. A sleeping
    /// implementation must re-check `done` with interrupts masked before it
    /// sleeps; otherwise the last interrupt can fire between the caller's
    /// poll and the sleep, and nothing wakes the core again.
    fn idle(&self, polls: u32, done: &dyn Fn() -> bool) -> Result<(), Self::Error>;
}

/// Unbounded busy-wait using the CPU spin-loop hint
///
/// Suitable for the host and for targets without a sleep instruction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin;

impl Wait for Spin {
    type Error = Infallible;

    fn spin(&self, _polls: u32) -> Result<(), Infallible> {
        core::hint::spin_loop();
        Ok(())
    }

    fn idle(&self, _polls: u32, _done: &dyn Fn() -> bool) -> Result<(), Infallible> {
        core::hint::spin_loop();
        Ok(())
    }
}

/// A wait gave up after too many polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout {
    /// Number of failed polls when the wait gave up
    pub polls: u32,
}

/// Poll-count limit around an unbounded strategy
///
/// `max_spins` bounds hardware synchronization waits, `max_idles` bounds
/// waits for a previous transfer. Idle waits wake once per interrupt, so
/// `max_idles` must cover at least one interrupt per byte of the longest
/// buffer the application sends.
#[derive(Debug, Clone, Copy)]
pub struct Bounded<W> {
    inner: W,
    max_spins: u32,
    max_idles: u32,
}

impl<W> Bounded<W> {
    /// Wrap `inner` with the given poll limits
    pub const fn new(inner: W, max_spins: u32, max_idles: u32) -> Self {
        Self {
            inner,
            max_spins,
            max_idles,
        }
    }

    /// The wrapped strategy
    pub fn inner(&self) -> &W {
        &self.inner
    }
}

impl<W: Wait<Error = Infallible>> Wait for Bounded<W> {
    type Error = Timeout;

    fn spin(&self, polls: u32) -> Result<(), Timeout> {
        if polls >= self.max_spins {
            return Err(Timeout { polls });
        }
        match self.inner.spin(polls) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }

    fn idle(&self, polls: u32, done: &dyn Fn() -> bool) -> Result<(), Timeout> {
        if polls >= self.max_idles {
            return Err(Timeout { polls });
        }
        match self.inner.idle(polls, done) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }
}
