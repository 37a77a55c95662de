//! One-time peripheral bring-up
//!
//! Order matters: pins, interrupt controller, clock, reset, mode, baud,
//! enable, bus state. Each step that the peripheral synchronizes is
//! followed by a poll of its handshake bit.

use portable_atomic::Ordering;
use samwire_hal::i2c::SYSTEM_CLOCK_HZ;
use samwire_hal::{BusState, Hardware, Wait};

use crate::driver::Driver;
use crate::error::{Stage, Stalled};
use crate::pinmux::configure_pin;

/// SCL rise time assumed by the baud calculation, in nanoseconds
pub const RISE_TIME_NS: u32 = 125;

/// BAUD register value for `bus_hz` from a `sysclk_hz` core clock
///
/// `BAUD = f_gclk / (2 * f_scl) - 5 - f_gclk * t_rise / 2`, with the
/// rise-time term computed in MHz * ns. Saturates into the 8-bit field: a
/// zero bus frequency gives the slowest setting, one too high to represent
/// gives the fastest.
pub const fn baud_divisor(sysclk_hz: u32, bus_hz: u32) -> u8 {
    let half_period = match bus_hz.checked_mul(2) {
        Some(0) => u32::MAX,
        Some(divisor) => sysclk_hz / divisor,
        None => 0,
    };
    let rise = ((sysclk_hz / 1_000_000) * RISE_TIME_NS) / (2 * 1000);
    let baud = half_period.saturating_sub(5).saturating_sub(rise);
    if baud > u8::MAX as u32 {
        u8::MAX
    } else {
        baud as u8
    }
}

impl<H: Hardware, W: Wait> Driver<H, W> {
    /// Check whether bring-up has run
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Bring the peripheral up if this is the first call
    ///
    /// Idempotent. Only the first call touches registers; later calls
    /// return immediately. If a bounded wait strategy aborts bring-up, the
    /// next call starts over from the beginning.
    pub fn ensure_initialized(&self) -> Result<(), Stalled<W::Error>> {
        if self.initialized.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let result = self.bring_up();
        if result.is_err() {
            self.initialized.store(false, Ordering::Release);
        }
        result
    }

    fn bring_up(&self) -> Result<(), Stalled<W::Error>> {
        let board = *self.board();
        let hw = self.hardware();
        debug!("i2c: bringing up SERCOM{} on {}", board.sercom, board.name);

        configure_pin(hw, board.sda);
        configure_pin(hw, board.scl);

        // Least urgent priority so display traffic never delays anything else
        hw.clear_pending(board.irq);
        hw.set_priority(board.irq, H::lowest_priority());
        hw.unmask(board.irq);

        hw.disable_channel(board.gclk_id);
        self.spin_until(Stage::Clock, || hw.is_channel_disabled(board.gclk_id))?;
        hw.enable_channel(board.gclk_id);
        self.spin_until(Stage::Clock, || hw.is_channel_enabled(board.gclk_id))?;

        hw.software_reset();
        self.spin_until(Stage::Reset, || !hw.is_resetting())?;

        hw.configure_master();
        let baud = baud_divisor(SYSTEM_CLOCK_HZ, self.config().frequency);
        hw.set_baud(baud);

        hw.enable();
        self.spin_until(Stage::Enable, || !hw.is_enabling())?;

        hw.force_bus_state(BusState::Idle);
        self.spin_until(Stage::SysOp, || !hw.is_sysop_busy())?;

        debug!("i2c: ready, baud={=u8}", baud);
        Ok(())
    }
}
