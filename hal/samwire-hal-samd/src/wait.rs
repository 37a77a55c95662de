//! Low-power wait strategy

use core::convert::Infallible;

use samwire_hal::Wait;

/// Sleep with WFI while a transfer is in flight
///
/// Every byte of a transfer raises the SERCOM interrupt, so the core is
/// woken at least once per byte. Synchronization waits spin: they last a
/// few peripheral clocks and may run inside the handler.
///
/// The busy indicator is re-checked with interrupts masked before sleeping,
/// so a transfer that finishes just before the sleep cannot strand the core.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Wfi;

impl Wait for Wfi {
    type Error = Infallible;

    fn spin(&self, _polls: u32) -> Result<(), Infallible> {
        core::hint::spin_loop();
        Ok(())
    }

    fn idle(&self, _polls: u32, done: &dyn Fn() -> bool) -> Result<(), Infallible> {
        // WFI still wakes on an interrupt that is pending while PRIMASK is
        // set; the handler runs once `free` restores it
        cortex_m::interrupt::free(|_| {
            if !done() {
                cortex_m::asm::wfi();
            }
        });
        Ok(())
    }
}
