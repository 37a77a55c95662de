//! Shared transfer state
//!
//! The one piece of state touched by both the main context and the
//! interrupt handler. The main context installs a transfer only while none
//! is live; the interrupt handler advances and clears it only while one is.
//! Every access goes through a critical section, so the busy poll can never
//! observe a half-written or stale transfer.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// One write in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transfer {
    /// 7-bit device address
    address: u8,
    /// Bytes not yet handed to the data register
    remaining: &'static [u8],
}

impl Transfer {
    /// Create a transfer of `data` to `address`
    pub const fn new(address: u8, data: &'static [u8]) -> Self {
        Self {
            address,
            remaining: data,
        }
    }

    /// Target device address (7-bit)
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Bytes still to send
    pub const fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Value written to the ADDR register: address in bits 7:1, write bit clear
    pub const fn address_word(&self) -> u16 {
        (self.address as u16) << 1
    }
}

/// Outcome of [`TransferState::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// No transfer is live
    Idle,
    /// Next byte for the data register
    Byte(u8),
    /// Every byte has been sent; the stop condition is due
    Exhausted,
}

/// Process-wide holder of the live transfer
///
/// `None` means idle. This is the only busy indicator.
pub struct TransferState {
    slot: Mutex<CriticalSectionRawMutex, Cell<Option<Transfer>>>,
}

impl Default for TransferState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferState {
    /// Create an idle transfer state
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(None)),
        }
    }

    /// Check whether a transfer is live
    pub fn is_busy(&self) -> bool {
        self.slot.lock(|slot| slot.get().is_some())
    }

    /// Snapshot of the live transfer
    pub fn current(&self) -> Option<Transfer> {
        self.slot.lock(|slot| slot.get())
    }

    /// Install a new transfer
    ///
    /// Returns `false` and leaves the live transfer untouched if one is
    /// already in flight.
    pub fn install(&self, transfer: Transfer) -> bool {
        self.slot.lock(|slot| {
            if slot.get().is_some() {
                return false;
            }
            slot.set(Some(transfer));
            true
        })
    }

    /// Take the next byte to send and advance the cursor
    ///
    /// An exhausted transfer stays live until [`finish`](Self::finish) is
    /// called.
    pub fn advance(&self) -> Step {
        self.slot.lock(|slot| {
            let Some(mut transfer) = slot.get() else {
                return Step::Idle;
            };
            match transfer.remaining.split_first() {
                Some((&byte, rest)) => {
                    transfer.remaining = rest;
                    slot.set(Some(transfer));
                    Step::Byte(byte)
                }
                None => Step::Exhausted,
            }
        })
    }

    /// Drop the live transfer, making the state idle
    pub fn finish(&self) -> Option<Transfer> {
        self.slot.lock(|slot| slot.take())
    }
}
