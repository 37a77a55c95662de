//! Master-on-bus interrupt handler
//!
//! Runs once per MB flag, i.e. each time the address or a data byte has
//! been clocked out and the peripheral can take the next one.
//!
//! ```text
//!   IDLE ──write()──► SENDING ──bytes left──► SENDING (DATA = next byte)
//!                        │
//!                        └──exhausted──► STOPPING (INTENCLR, CMD=stop) ──► IDLE
//! ```
//!
//! An MB flag with no transfer live is acknowledged and otherwise ignored.
//!
//! A NACK from the device is not looked at; the next byte is sent as if
//! the previous one had been acknowledged.

use samwire_hal::{Hardware, Wait};

use crate::driver::Driver;
use crate::error::{Stage, Stalled};
use crate::transfer::Step;

impl<H: Hardware, W: Wait> Driver<H, W> {
    /// Service the SERCOM interrupt
    ///
    /// Call this from the vector bound to the board's IRQ. Does nothing if
    /// the master-on-bus flag is not set.
    pub fn on_interrupt(&self) -> Result<(), Stalled<W::Error>> {
        let hw = self.hardware();
        if !hw.is_ready() {
            return Ok(());
        }

        let stopped = match self.transfer.advance() {
            // Writing DATA also acknowledges the flag and starts the byte
            Step::Byte(byte) => {
                hw.write_data(byte);
                Ok(())
            }
            Step::Exhausted => {
                hw.disable_ready_interrupt();
                hw.command_stop();
                let synced = self.spin_until(Stage::StopSync, || !hw.is_sysop_busy());

                // Busy drops here, even if the stop never synchronized
                if let Some(done) = self.transfer.finish() {
                    trace!("i2c: {=u8:#x} done", done.address());
                }
                synced
            }
            // Nothing of ours on the bus; never issue a stop for it
            Step::Idle => {
                trace!("i2c: MB set with no transfer");
                Ok(())
            }
        };

        // MB reads as auto-clearing, but this peripheral needs the write
        hw.clear_ready();
        let cleared = self.spin_until(Stage::FlagClear, || !hw.is_ready());
        stopped.and(cleared)
    }
}

#[cfg(test)]
mod tests {
    use samwire_hal::{Bounded, I2cConfig, I2cMaster, Spin};

    use super::*;
    use crate::board::FEATHER_M0;
    use crate::sim::{run_to_completion, Event, SimPeripheral};

    static DATA: [u8; 2] = [0x10, 0x20];

    #[test]
    fn test_spurious_interrupt_is_ignored() {
        let driver = Driver::new(FEATHER_M0, I2cConfig::STANDARD, SimPeripheral::new(), Spin);
        driver.write(0x3C, &DATA).unwrap();
        let before = driver.hardware().events();

        // Address phase not finished: MB flag still clear
        driver.on_interrupt().unwrap();

        assert_eq!(driver.hardware().events(), before);
        assert_eq!(driver.current_transfer().map(|t| t.remaining()), Some(2));
    }

    #[test]
    fn test_spurious_interrupt_when_idle() {
        let driver = Driver::new(FEATHER_M0, I2cConfig::STANDARD, SimPeripheral::new(), Spin);
        driver.on_interrupt().unwrap();
        assert!(driver.hardware().events().is_empty());
        assert!(!driver.is_busy());
    }

    #[test]
    fn test_each_interrupt_sends_one_byte_and_clears_flag() {
        let driver = Driver::new(FEATHER_M0, I2cConfig::STANDARD, SimPeripheral::new(), Spin);
        driver.write(0x3C, &DATA).unwrap();
        driver.hardware().clear_events();

        driver.hardware().complete_byte();
        driver.on_interrupt().unwrap();
        assert_eq!(
            driver.hardware().events(),
            vec![Event::Data(0x10), Event::ClearReady]
        );
    }

    #[test]
    fn test_stop_branch_sequence() {
        let driver = Driver::new(FEATHER_M0, I2cConfig::STANDARD, SimPeripheral::new(), Spin);
        driver.write(0x3C, &[]).unwrap();
        driver.hardware().clear_events();

        driver.hardware().complete_byte();
        driver.on_interrupt().unwrap();
        assert_eq!(
            driver.hardware().events(),
            vec![Event::ReadyIrqOff, Event::Stop, Event::ClearReady]
        );
        assert!(!driver.is_busy());
    }

    #[test]
    fn test_nack_is_treated_as_ack() {
        let driver = Driver::new(FEATHER_M0, I2cConfig::STANDARD, SimPeripheral::new(), Spin);
        driver.write(0x3C, &DATA).unwrap();
        driver.hardware().set_nack(true);

        driver.hardware().complete_byte();
        driver.on_interrupt().unwrap();
        assert!(driver.hardware().received_nack());
        assert!(driver.hardware().events().contains(&Event::Data(0x10)));
        assert!(driver.is_busy());
    }

    #[test]
    fn test_stalled_stop_still_clears_busy() {
        let driver = Driver::new(
            FEATHER_M0,
            I2cConfig::STANDARD,
            SimPeripheral::new(),
            Bounded::new(Spin, 4, 4),
        );
        driver.write(0x3C, &[]).unwrap();
        driver.hardware().set_sync_latency(100);

        driver.hardware().complete_byte();
        let err = driver.on_interrupt().unwrap_err();
        assert_eq!(err.stage, Stage::StopSync);
        assert!(!driver.is_busy());

        // MB is still acknowledged, so the vector does not fire again
        assert_eq!(driver.hardware().events().last(), Some(&Event::ClearReady));
        assert!(!driver.hardware().is_ready());
    }

    #[test]
    fn test_ready_flag_while_idle_issues_no_stop() {
        let driver = Driver::new(FEATHER_M0, I2cConfig::STANDARD, SimPeripheral::new(), Spin);
        driver.write(0x3C, &[]).unwrap();
        run_to_completion(&driver);
        driver.hardware().clear_events();

        driver.hardware().raise_ready();
        driver.on_interrupt().unwrap();

        assert_eq!(driver.hardware().events(), vec![Event::ClearReady]);
        assert!(!driver.hardware().is_ready());
        assert!(!driver.is_busy());
    }

    #[test]
    fn test_waits_for_ready_flag_to_read_clear() {
        let driver = Driver::new(
            FEATHER_M0,
            I2cConfig::STANDARD,
            SimPeripheral::new(),
            Bounded::new(Spin, 5, 5),
        );
        driver.write(0x3C, &DATA).unwrap();
        driver.hardware().set_flag_clear_latency(5);

        driver.hardware().complete_byte();
        driver.on_interrupt().unwrap();
        assert!(!driver.hardware().is_ready());
        assert_eq!(driver.current_transfer().map(|t| t.remaining()), Some(1));
    }

    #[test]
    fn test_ready_flag_stuck_set_stalls_with_bounded_wait() {
        let driver = Driver::new(
            FEATHER_M0,
            I2cConfig::STANDARD,
            SimPeripheral::new(),
            Bounded::new(Spin, 4, 4),
        );
        driver.write(0x3C, &DATA).unwrap();
        driver.hardware().set_flag_clear_latency(5);

        driver.hardware().complete_byte();
        let err = driver.on_interrupt().unwrap_err();
        assert_eq!(err.stage, Stage::FlagClear);
        assert_eq!(err.source.polls, 4);

        // The byte itself went out
        assert!(driver.hardware().events().contains(&Event::Data(0x10)));
        assert!(driver.is_busy());
    }
}
