//! NVIC binding for the SERCOM vector

use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::NVIC;
use samwire_hal::InterruptController;

use crate::Samd;

#[cfg(feature = "samd21")]
const NVIC_PRIO_BITS: u8 = 2;
#[cfg(feature = "samd51")]
const NVIC_PRIO_BITS: u8 = 3;

/// Device interrupt number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Irq(pub u16);

// SAFETY: board tables only hold vector numbers that exist on the silicon
unsafe impl InterruptNumber for Irq {
    fn number(self) -> u16 {
        self.0
    }
}

/// Raw IPR byte for a logical priority level
///
/// Implemented bits sit at the top of the byte.
pub const fn raw_priority(level: u8) -> u8 {
    level << (8 - NVIC_PRIO_BITS)
}

impl InterruptController for Samd {
    const PRIORITY_BITS: u8 = NVIC_PRIO_BITS;

    fn clear_pending(&self, irq: u16) {
        NVIC::unpend(Irq(irq));
    }

    fn set_priority(&self, irq: u16, level: u8) {
        // SAFETY: runs once during bring-up, before the vector is unmasked,
        // so no priority-based critical section can be broken
        unsafe {
            let mut peripherals = cortex_m::Peripherals::steal();
            peripherals.NVIC.set_priority(Irq(irq), raw_priority(level));
        }
    }

    fn unmask(&self, irq: u16) {
        // SAFETY: the handler only touches state guarded by critical sections
        unsafe { NVIC::unmask(Irq(irq)) }
    }
}
