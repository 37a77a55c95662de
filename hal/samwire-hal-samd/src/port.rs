//! PORT pin multiplexer

use samwire_hal::PortMux;
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

use crate::Samd;

#[cfg(feature = "samd21")]
const PORT_BASE: usize = 0x4100_4400;
#[cfg(feature = "samd51")]
const PORT_BASE: usize = 0x4100_8000;

/// Stride between PORT groups
const GROUP_STRIDE: usize = 0x80;

register_bitfields! [
    u8,
    pub PINCFG [
        PMUXEN OFFSET(0) NUMBITS(1) [],
        INEN OFFSET(1) NUMBITS(1) [],
        PULLEN OFFSET(2) NUMBITS(1) [],
        DRVSTR OFFSET(6) NUMBITS(1) []
    ]
];

register_structs! {
    pub PortGroup {
        (0x00 => _reserved0),
        (0x30 => pmux: [ReadWrite<u8>; 16]),
        (0x40 => pincfg: [ReadWrite<u8, PINCFG::Register>; 32]),
        (0x60 => _reserved1),
        (0x80 => @END),
    }
}

impl Samd {
    fn port_group(&self, port: u8) -> &PortGroup {
        let addr = PORT_BASE + GROUP_STRIDE * port as usize;
        // SAFETY: fixed MMIO block; every PortGroup field is a volatile cell
        unsafe { &*(addr as *const PortGroup) }
    }
}

impl PortMux for Samd {
    fn read_pmux(&self, port: u8, index: u8) -> u8 {
        self.port_group(port).pmux[index as usize].get()
    }

    fn write_pmux(&self, port: u8, index: u8, value: u8) {
        self.port_group(port).pmux[index as usize].set(value);
    }

    fn enable_mux(&self, port: u8, pin: u8) {
        self.port_group(port).pincfg[pin as usize]
            .modify(PINCFG::PMUXEN::SET + PINCFG::DRVSTR::SET);
    }
}
