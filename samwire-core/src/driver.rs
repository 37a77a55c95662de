//! Non-blocking I2C write driver
//!
//! The driver owns the board configuration, the peripheral handle, the wait
//! strategy and the shared transfer state. One instance exists per SERCOM;
//! on the target it lives in a `static` so the interrupt vector can reach
//! it.
//!
//! # Flow
//!
//! ```text
//! write() ──► ensure_initialized() ──► wait for previous transfer
//!         ──► wait for bus idle/owner ──► install transfer
//!         ──► enable MB interrupt ──► write ADDR (start + address phase)
//!                                          │
//!                     ┌────────────────────┘
//!                     ▼
//!  on_interrupt(): DATA ◄─ next byte ... until exhausted ─► STOP, clear
//! ```

use portable_atomic::AtomicBool;
use samwire_hal::{Hardware, I2cConfig, NonBlockingWrite, Wait};

use crate::board::BoardConfig;
use crate::error::{Stage, Stalled};
use crate::transfer::{Transfer, TransferState};

/// Interrupt-driven I2C write driver
pub struct Driver<H, W> {
    board: BoardConfig,
    config: I2cConfig,
    hw: H,
    wait: W,
    /// Set once bring-up has started
    pub(crate) initialized: AtomicBool,
    pub(crate) transfer: TransferState,
}

impl<H, W> Driver<H, W> {
    /// Create a driver for `board`
    ///
    /// Touches no hardware; the peripheral is brought up lazily by the
    /// first [`write`](Self::write).
    pub const fn new(board: BoardConfig, config: I2cConfig, hw: H, wait: W) -> Self {
        Self {
            board,
            config,
            hw,
            wait,
            initialized: AtomicBool::new(false),
            transfer: TransferState::new(),
        }
    }

    /// Board this driver was built for
    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    /// Bus configuration
    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    /// Peripheral handle
    pub fn hardware(&self) -> &H {
        &self.hw
    }

    /// Wait strategy
    pub fn wait_strategy(&self) -> &W {
        &self.wait
    }

    /// Check whether a write is still in flight
    ///
    /// False before the first write and after the interrupt handler has
    /// issued the stop condition of the last one.
    pub fn is_busy(&self) -> bool {
        self.transfer.is_busy()
    }

    /// The live transfer, if any
    pub fn current_transfer(&self) -> Option<Transfer> {
        self.transfer.current()
    }
}

impl<H: Hardware, W: Wait> Driver<H, W> {
    /// Start writing `data` to the device at `address`
    ///
    /// Brings the peripheral up on first use, then sleeps until any
    /// previous write has finished and the bus is idle or already owned.
    /// Returns once the address phase has been started; the remaining
    /// bytes go out from [`on_interrupt`](Self::on_interrupt).
    ///
    /// A zero-length write still produces start, address and stop.
    pub fn write(&self, address: u8, data: &'static [u8]) -> Result<(), Stalled<W::Error>> {
        self.ensure_initialized()?;

        self.idle_until(Stage::PreviousTransfer, || !self.transfer.is_busy())?;
        self.spin_until(Stage::BusIdle, || self.hw.bus_state().can_start())?;

        let transfer = Transfer::new(address, data);
        trace!("i2c: write {=u8:#x}, {=usize} bytes", address, data.len());

        // Only this context installs, and nothing is live past the wait above
        let installed = self.transfer.install(transfer);
        debug_assert!(installed);

        self.hw.enable_ready_interrupt();
        self.hw.write_address(transfer.address_word());
        Ok(())
    }

    /// Sleep until the in-flight write, if any, has finished
    pub fn flush(&self) -> Result<(), Stalled<W::Error>> {
        self.idle_until(Stage::PreviousTransfer, || !self.transfer.is_busy())
    }

    /// Poll `done` with the spin strategy until it returns true
    pub(crate) fn spin_until(
        &self,
        stage: Stage,
        mut done: impl FnMut() -> bool,
    ) -> Result<(), Stalled<W::Error>> {
        let mut polls: u32 = 0;
        while !done() {
            if let Err(source) = self.wait.spin(polls) {
                warn!("i2c: stalled at {}", stage);
                return Err(Stalled::new(stage, source));
            }
            polls = polls.saturating_add(1);
        }
        Ok(())
    }

    /// Poll `done` with the idle strategy until it returns true
    ///
    /// The strategy gets `done` too, so it can re-check it right before
    /// sleeping.
    pub(crate) fn idle_until(
        &self,
        stage: Stage,
        done: impl Fn() -> bool,
    ) -> Result<(), Stalled<W::Error>> {
        let mut polls: u32 = 0;
        while !done() {
            if let Err(source) = self.wait.idle(polls, &done) {
                warn!("i2c: stalled at {}", stage);
                return Err(Stalled::new(stage, source));
            }
            polls = polls.saturating_add(1);
        }
        Ok(())
    }
}

impl<H: Hardware, W: Wait> NonBlockingWrite for Driver<H, W> {
    type Error = Stalled<W::Error>;

    fn write(&self, address: u8, data: &'static [u8]) -> Result<(), Self::Error> {
        Driver::write(self, address, data)
    }

    fn is_busy(&self) -> bool {
        Driver::is_busy(self)
    }

    fn flush(&self) -> Result<(), Self::Error> {
        Driver::flush(self)
    }
}
