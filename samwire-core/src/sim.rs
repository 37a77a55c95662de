//! Simulated SERCOM peripheral for host tests
//!
//! Implements every HAL trait over plain cells and records each register
//! write as an [`Event`]. Bus timing is modelled just enough for the driver
//! state machine: writing ADDR or DATA puts a byte "on the wire", and
//! [`SimPeripheral::complete_byte`] finishes it and raises the MB flag.

use core::cell::{Cell, OnceCell, RefCell};
use core::convert::Infallible;

use samwire_hal::{
    BusState, ClockGate, I2cConfig, I2cMaster, InterruptController, PortMux, Wait,
};

use crate::board::BoardConfig;
use crate::driver::Driver;

/// Register write recorded by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Pmux { port: u8, index: u8, value: u8 },
    PinCfg { port: u8, pin: u8 },
    IrqClearPending(u16),
    IrqPriority { irq: u16, level: u8 },
    IrqEnable(u16),
    ClockDisable(u8),
    ClockEnable(u8),
    Reset,
    Master,
    Baud(u8),
    Enable,
    ForceBus(BusState),
    ReadyIrqOn,
    ReadyIrqOff,
    Address(u16),
    Data(u8),
    Stop,
    ClearReady,
}

/// Simulated peripheral
#[derive(Debug)]
pub struct SimPeripheral {
    events: RefCell<Vec<Event>>,
    pmux: RefCell<[[u8; 16]; 2]>,
    bus: Cell<BusState>,
    bus_after_init: Cell<Option<BusState>>,
    ready: Cell<bool>,
    ready_irq: Cell<bool>,
    in_flight: Cell<bool>,
    nack: Cell<bool>,
    sync_latency: Cell<u32>,
    sync_pending: Cell<u32>,
    flag_latency: Cell<u32>,
    flag_pending: Cell<u32>,
}

impl Default for SimPeripheral {
    fn default() -> Self {
        Self::new()
    }
}

impl SimPeripheral {
    /// Fresh peripheral: bus state unknown, everything else clear
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            pmux: RefCell::new([[0; 16]; 2]),
            bus: Cell::new(BusState::Unknown),
            bus_after_init: Cell::new(None),
            ready: Cell::new(false),
            ready_irq: Cell::new(false),
            in_flight: Cell::new(false),
            nack: Cell::new(false),
            sync_latency: Cell::new(0),
            sync_pending: Cell::new(0),
            flag_latency: Cell::new(0),
            flag_pending: Cell::new(0),
        }
    }

    /// All recorded events, oldest first
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Forget recorded events
    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    /// Current PMUX register value
    pub fn pmux(&self, port: u8, index: u8) -> u8 {
        self.pmux.borrow()[port as usize][index as usize]
    }

    /// Preload a PMUX register without recording an event
    pub fn preset_pmux(&self, port: u8, index: u8, value: u8) {
        self.pmux.borrow_mut()[port as usize][index as usize] = value;
    }

    /// Make the bus report `state` once bring-up forces it idle
    pub fn set_bus_after_init(&self, state: BusState) {
        self.bus_after_init.set(Some(state));
    }

    /// Number of polls each synchronized operation stays busy for
    pub fn set_sync_latency(&self, polls: u32) {
        self.sync_latency.set(polls);
        self.sync_pending.set(0);
    }

    /// Number of polls MB keeps reading set after it has been cleared
    pub fn set_flag_clear_latency(&self, polls: u32) {
        self.flag_latency.set(polls);
    }

    /// Raise MB with nothing on the wire
    pub fn raise_ready(&self) {
        self.ready.set(true);
    }

    /// Make the device answer the next bytes with NACK
    pub fn set_nack(&self, nack: bool) {
        self.nack.set(nack);
    }

    /// Whether the device has been NACKing
    pub fn received_nack(&self) -> bool {
        self.nack.get()
    }

    /// Whether the MB interrupt source is enabled
    pub fn ready_interrupt_enabled(&self) -> bool {
        self.ready_irq.get()
    }

    /// Finish the byte on the wire and raise MB
    pub fn complete_byte(&self) {
        if self.in_flight.replace(false) {
            self.ready.set(true);
        }
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    fn start_sync(&self) {
        self.sync_pending.set(self.sync_latency.get());
    }

    fn poll_sync(&self) -> bool {
        let pending = self.sync_pending.get();
        if pending == 0 {
            return false;
        }
        self.sync_pending.set(pending - 1);
        true
    }
}

impl PortMux for SimPeripheral {
    fn read_pmux(&self, port: u8, index: u8) -> u8 {
        self.pmux(port, index)
    }

    fn write_pmux(&self, port: u8, index: u8, value: u8) {
        self.preset_pmux(port, index, value);
        self.record(Event::Pmux { port, index, value });
    }

    fn enable_mux(&self, port: u8, pin: u8) {
        self.record(Event::PinCfg { port, pin });
    }
}

impl InterruptController for SimPeripheral {
    const PRIORITY_BITS: u8 = 2;

    fn clear_pending(&self, irq: u16) {
        self.record(Event::IrqClearPending(irq));
    }

    fn set_priority(&self, irq: u16, level: u8) {
        self.record(Event::IrqPriority { irq, level });
    }

    fn unmask(&self, irq: u16) {
        self.record(Event::IrqEnable(irq));
    }
}

impl ClockGate for SimPeripheral {
    fn disable_channel(&self, id: u8) {
        self.record(Event::ClockDisable(id));
        self.start_sync();
    }

    fn is_channel_disabled(&self, _id: u8) -> bool {
        !self.poll_sync()
    }

    fn enable_channel(&self, id: u8) {
        self.record(Event::ClockEnable(id));
        self.start_sync();
    }

    fn is_channel_enabled(&self, _id: u8) -> bool {
        !self.poll_sync()
    }
}

impl I2cMaster for SimPeripheral {
    fn software_reset(&self) {
        self.record(Event::Reset);
        self.start_sync();
    }

    fn is_resetting(&self) -> bool {
        self.poll_sync()
    }

    fn configure_master(&self) {
        self.record(Event::Master);
    }

    fn set_baud(&self, baud: u8) {
        self.record(Event::Baud(baud));
    }

    fn enable(&self) {
        self.record(Event::Enable);
        self.start_sync();
    }

    fn is_enabling(&self) -> bool {
        self.poll_sync()
    }

    fn bus_state(&self) -> BusState {
        self.bus.get()
    }

    fn force_bus_state(&self, state: BusState) {
        self.record(Event::ForceBus(state));
        self.bus.set(self.bus_after_init.get().unwrap_or(state));
        self.start_sync();
    }

    fn is_sysop_busy(&self) -> bool {
        self.poll_sync()
    }

    fn enable_ready_interrupt(&self) {
        self.record(Event::ReadyIrqOn);
        self.ready_irq.set(true);
    }

    fn disable_ready_interrupt(&self) {
        self.record(Event::ReadyIrqOff);
        self.ready_irq.set(false);
    }

    fn is_ready(&self) -> bool {
        let pending = self.flag_pending.get();
        if pending > 0 {
            self.flag_pending.set(pending - 1);
            return true;
        }
        self.ready.get()
    }

    fn clear_ready(&self) {
        self.record(Event::ClearReady);
        self.ready.set(false);
        self.flag_pending.set(self.flag_latency.get());
    }

    fn write_address(&self, addr: u16) {
        self.record(Event::Address(addr));
        self.bus.set(BusState::Owner);
        self.in_flight.set(true);
    }

    fn write_data(&self, byte: u8) {
        self.record(Event::Data(byte));
        self.ready.set(false);
        self.in_flight.set(true);
    }

    fn command_stop(&self) {
        self.record(Event::Stop);
        self.bus.set(BusState::Idle);
        self.start_sync();
    }
}

/// Wait strategy that plays the interrupt while the driver idles
///
/// Each idle poll finishes the byte on the wire and runs the handler, the
/// way a real MB interrupt would wake the core out of WFI.
#[derive(Default)]
pub struct Pump {
    driver: OnceCell<&'static Driver<SimPeripheral, Pump>>,
}

impl Wait for Pump {
    type Error = Infallible;

    fn spin(&self, _polls: u32) -> Result<(), Infallible> {
        Ok(())
    }

    fn idle(&self, _polls: u32, done: &dyn Fn() -> bool) -> Result<(), Infallible> {
        if done() {
            return Ok(());
        }
        if let Some(driver) = self.driver.get() {
            driver.hardware().complete_byte();
            if let Err(stall) = driver.on_interrupt() {
                match stall.source {}
            }
        }
        Ok(())
    }
}

/// Driver whose idle waits service the simulated interrupt
pub fn leaked_driver(board: BoardConfig) -> &'static Driver<SimPeripheral, Pump> {
    let driver: &'static Driver<SimPeripheral, Pump> = Box::leak(Box::new(Driver::new(
        board,
        I2cConfig::STANDARD,
        SimPeripheral::new(),
        Pump::default(),
    )));
    let _ = driver.wait_strategy().driver.set(driver);
    driver
}

/// Play interrupts until the live transfer is done
pub fn run_to_completion<W: Wait>(driver: &Driver<SimPeripheral, W>)
where
    W::Error: core::fmt::Debug,
{
    let mut guard = 0;
    while driver.is_busy() {
        driver.hardware().complete_byte();
        driver.on_interrupt().unwrap();
        guard += 1;
        assert!(guard < 100_000, "transfer never finished");
    }
}
