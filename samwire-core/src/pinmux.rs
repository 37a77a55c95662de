//! Pin multiplexer configuration
//!
//! Two pins share each PMUX register: the even pin owns the low nibble
//! (PMUXE), the odd pin the high nibble (PMUXO). Only the pin's own nibble
//! is replaced.

use samwire_hal::PortMux;

use crate::board::PinMux;

/// Route `pin` to its peripheral function and enable strong drive
pub fn configure_pin<P: PortMux>(port: &P, pin: PinMux) {
    let index = pin.pmux_index();
    let current = port.read_pmux(pin.port, index);
    let function = pin.function.bits() & 0x0F;

    let value = if pin.is_odd() {
        (current & 0x0F) | (function << 4)
    } else {
        (current & 0xF0) | function
    };

    port.write_pmux(pin.port, index, value);
    port.enable_mux(pin.port, pin.pin);
}
