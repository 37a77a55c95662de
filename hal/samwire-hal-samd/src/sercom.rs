//! SERCOM in I2C master mode
//!
//! Register layout is shared by SAMD21 and SAMD51 for everything the driver
//! touches. SAMD51 adds CTRLC at 0x08 and widens DATA to 32 bits; byte
//! access to DATA works on both.

use samwire_hal::{BusState, I2cMaster};
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

use crate::Samd;

register_bitfields! [
    u32,
    pub CTRLA [
        SWRST OFFSET(0) NUMBITS(1) [],
        ENABLE OFFSET(1) NUMBITS(1) [],
        MODE OFFSET(2) NUMBITS(3) [
            I2cSlave = 4,
            I2cMaster = 5
        ],
        RUNSTDBY OFFSET(7) NUMBITS(1) []
    ],
    pub CTRLB [
        SMEN OFFSET(8) NUMBITS(1) [],
        QCEN OFFSET(9) NUMBITS(1) [],
        CMD OFFSET(16) NUMBITS(2) [
            RepeatedStart = 1,
            ByteRead = 2,
            Stop = 3
        ],
        ACKACT OFFSET(18) NUMBITS(1) []
    ],
    pub BAUD [
        BAUD OFFSET(0) NUMBITS(8) [],
        BAUDLOW OFFSET(8) NUMBITS(8) []
    ],
    pub SYNCBUSY [
        SWRST OFFSET(0) NUMBITS(1) [],
        ENABLE OFFSET(1) NUMBITS(1) [],
        SYSOP OFFSET(2) NUMBITS(1) []
    ],
    pub ADDR [
        ADDR OFFSET(0) NUMBITS(11) [],
        LENEN OFFSET(13) NUMBITS(1) [],
        HS OFFSET(14) NUMBITS(1) [],
        TENBITEN OFFSET(15) NUMBITS(1) []
    ]
];

register_bitfields! [
    u16,
    pub STATUS [
        BUSERR OFFSET(0) NUMBITS(1) [],
        ARBLOST OFFSET(1) NUMBITS(1) [],
        RXNACK OFFSET(2) NUMBITS(1) [],
        BUSSTATE OFFSET(4) NUMBITS(2) [],
        LOWTOUT OFFSET(6) NUMBITS(1) [],
        CLKHOLD OFFSET(7) NUMBITS(1) []
    ]
];

register_bitfields! [
    u8,
    /// Shared by INTENCLR, INTENSET and INTFLAG
    pub INT [
        MB OFFSET(0) NUMBITS(1) [],
        SB OFFSET(1) NUMBITS(1) [],
        ERROR OFFSET(7) NUMBITS(1) []
    ],
    pub DATA [
        DATA OFFSET(0) NUMBITS(8) []
    ]
];

register_structs! {
    pub I2cmRegisters {
        (0x00 => ctrla: ReadWrite<u32, CTRLA::Register>),
        (0x04 => ctrlb: ReadWrite<u32, CTRLB::Register>),
        (0x08 => _reserved0),
        (0x0C => baud: ReadWrite<u32, BAUD::Register>),
        (0x10 => _reserved1),
        (0x14 => intenclr: ReadWrite<u8, INT::Register>),
        (0x15 => _reserved2),
        (0x16 => intenset: ReadWrite<u8, INT::Register>),
        (0x17 => _reserved3),
        (0x18 => intflag: ReadWrite<u8, INT::Register>),
        (0x19 => _reserved4),
        (0x1A => status: ReadWrite<u16, STATUS::Register>),
        (0x1C => syncbusy: ReadOnly<u32, SYNCBUSY::Register>),
        (0x20 => _reserved5),
        (0x24 => addr: ReadWrite<u32, ADDR::Register>),
        (0x28 => data: ReadWrite<u8, DATA::Register>),
        (0x29 => _reserved6),
        (0x2C => @END),
    }
}

/// Base address of SERCOM `index`
///
/// # Panics
///
/// If the silicon has no such SERCOM. Evaluated in const context for the
/// built-in boards, so a bad index fails the build.
#[cfg(feature = "samd21")]
pub const fn base_address(index: u8) -> usize {
    match index {
        0..=5 => 0x4200_0800 + 0x400 * index as usize,
        _ => panic!("SAMD21 has SERCOM0..SERCOM5"),
    }
}

/// Base address of SERCOM `index`
///
/// # Panics
///
/// If the silicon has no such SERCOM. Evaluated in const context for the
/// built-in boards, so a bad index fails the build.
#[cfg(feature = "samd51")]
pub const fn base_address(index: u8) -> usize {
    match index {
        0 => 0x4000_3000,
        1 => 0x4000_3400,
        2 => 0x4101_2000,
        3 => 0x4101_4000,
        4 => 0x4300_0000,
        5 => 0x4300_0400,
        _ => panic!("SAMD51 has SERCOM0..SERCOM5"),
    }
}

impl I2cMaster for Samd {
    fn software_reset(&self) {
        self.i2cm().ctrla.modify(CTRLA::SWRST::SET);
    }

    fn is_resetting(&self) -> bool {
        let regs = self.i2cm();
        regs.ctrla.is_set(CTRLA::SWRST) || regs.syncbusy.is_set(SYNCBUSY::SWRST)
    }

    fn configure_master(&self) {
        self.i2cm()
            .ctrla
            .write(CTRLA::MODE::I2cMaster + CTRLA::RUNSTDBY::SET);
    }

    fn set_baud(&self, baud: u8) {
        self.i2cm().baud.modify(BAUD::BAUD.val(u32::from(baud)));
    }

    fn enable(&self) {
        self.i2cm().ctrla.modify(CTRLA::ENABLE::SET);
    }

    fn is_enabling(&self) -> bool {
        self.i2cm().syncbusy.is_set(SYNCBUSY::ENABLE)
    }

    fn bus_state(&self) -> BusState {
        BusState::from_bits(self.i2cm().status.read(STATUS::BUSSTATE) as u8)
    }

    fn force_bus_state(&self, state: BusState) {
        self.i2cm()
            .status
            .modify(STATUS::BUSSTATE.val(u16::from(state.bits())));
    }

    fn is_sysop_busy(&self) -> bool {
        self.i2cm().syncbusy.is_set(SYNCBUSY::SYSOP)
    }

    fn enable_ready_interrupt(&self) {
        self.i2cm().intenset.write(INT::MB::SET);
    }

    fn disable_ready_interrupt(&self) {
        self.i2cm().intenclr.write(INT::MB::SET);
    }

    fn is_ready(&self) -> bool {
        self.i2cm().intflag.is_set(INT::MB)
    }

    fn clear_ready(&self) {
        // Write-one-to-clear; leave SB and ERROR alone
        self.i2cm().intflag.write(INT::MB::SET);
    }

    fn write_address(&self, addr: u16) {
        self.i2cm().addr.modify(ADDR::ADDR.val(u32::from(addr)));
    }

    fn write_data(&self, byte: u8) {
        self.i2cm().data.write(DATA::DATA.val(byte));
    }

    fn command_stop(&self) {
        self.i2cm().ctrlb.modify(CTRLB::CMD::Stop);
    }
}
