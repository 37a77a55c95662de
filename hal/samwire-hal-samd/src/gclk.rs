//! Generic clock routing to the SERCOM core clock
//!
//! SAMD21: one CLKCTRL register selects channel and generator in a single
//! write, synchronized through STATUS.SYNCBUSY. There is nothing to disable
//! first.
//!
//! SAMD51: one PCHCTRL register per channel. CHEN reads back the current
//! state, so both disable and enable are acknowledged by polling it.

use samwire_hal::ClockGate;
#[cfg(feature = "samd51")]
use tock_registers::interfaces::ReadWriteable;
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

use crate::Samd;

#[cfg(feature = "samd21")]
const GCLK_BASE: usize = 0x4000_0C00;
#[cfg(feature = "samd51")]
const GCLK_BASE: usize = 0x4000_1C00;

register_bitfields! [
    u8,
    pub STATUS [
        SYNCBUSY OFFSET(7) NUMBITS(1) []
    ]
];

register_bitfields! [
    u16,
    pub CLKCTRL [
        ID OFFSET(0) NUMBITS(6) [],
        GEN OFFSET(8) NUMBITS(4) [
            Gclk0 = 0,
            Gclk1 = 1
        ],
        CLKEN OFFSET(14) NUMBITS(1) [],
        WRTLOCK OFFSET(15) NUMBITS(1) []
    ]
];

register_bitfields! [
    u32,
    pub PCHCTRL [
        GEN OFFSET(0) NUMBITS(4) [
            Gclk0 = 0,
            Gclk1 = 1
        ],
        CHEN OFFSET(6) NUMBITS(1) [],
        WRTLOCK OFFSET(7) NUMBITS(1) []
    ]
];

register_structs! {
    pub Samd21Gclk {
        (0x0 => _reserved0),
        (0x1 => status: ReadOnly<u8, STATUS::Register>),
        (0x2 => clkctrl: ReadWrite<u16, CLKCTRL::Register>),
        (0x4 => _reserved1),
        (0xC => @END),
    }
}

register_structs! {
    pub Samd51Gclk {
        (0x00 => _reserved0),
        (0x80 => pchctrl: [ReadWrite<u32, PCHCTRL::Register>; 48]),
        (0x140 => @END),
    }
}

#[cfg(feature = "samd21")]
impl Samd {
    fn gclk(&self) -> &Samd21Gclk {
        // SAFETY: fixed MMIO block; every field is a volatile cell
        unsafe { &*(GCLK_BASE as *const Samd21Gclk) }
    }
}

#[cfg(feature = "samd51")]
impl Samd {
    fn gclk(&self) -> &Samd51Gclk {
        // SAFETY: fixed MMIO block; every field is a volatile cell
        unsafe { &*(GCLK_BASE as *const Samd51Gclk) }
    }
}

#[cfg(feature = "samd21")]
impl ClockGate for Samd {
    fn disable_channel(&self, _id: u8) {}

    fn is_channel_disabled(&self, _id: u8) -> bool {
        true
    }

    fn enable_channel(&self, id: u8) {
        self.gclk().clkctrl.write(
            CLKCTRL::ID.val(u16::from(id)) + CLKCTRL::GEN::Gclk0 + CLKCTRL::CLKEN::SET,
        );
    }

    fn is_channel_enabled(&self, _id: u8) -> bool {
        !self.gclk().status.is_set(STATUS::SYNCBUSY)
    }
}

#[cfg(feature = "samd51")]
impl ClockGate for Samd {
    fn disable_channel(&self, id: u8) {
        self.gclk().pchctrl[id as usize].modify(PCHCTRL::CHEN::CLEAR);
    }

    fn is_channel_disabled(&self, id: u8) -> bool {
        !self.gclk().pchctrl[id as usize].is_set(PCHCTRL::CHEN)
    }

    fn enable_channel(&self, id: u8) {
        self.gclk().pchctrl[id as usize].write(PCHCTRL::GEN::Gclk1 + PCHCTRL::CHEN::SET);
    }

    fn is_channel_enabled(&self, id: u8) -> bool {
        self.gclk().pchctrl[id as usize].is_set(PCHCTRL::CHEN)
    }
}
