//! Board GPIO ports
//!
//! The RP2040 has one flat bank of pins, so ports are assembled from eight
//! `Flex` pins each. Pin assignments (UART0 keeps GPIO0/1):
//!
//! | Port | Pins            |
//! |------|-----------------|
//! | A    | GPIO2..=9       |
//! | B    | GPIO10..=17     |
//! | C    | GPIO18..=22, GPIO26..=28 |
//! | D    | not wired       |

use embassy_rp::gpio::{Flex, Level};
use yasp_hal::{Port, PortBank, PortName};

/// Pins per port
pub const PORT_WIDTH: usize = 8;

/// Eight pins behaving like one 8-bit port
///
/// Direction and latch are shadowed in RAM; writing either one updates
/// every pin. Ports come up as all inputs with a cleared latch.
pub struct FlexPort {
    pins: [Flex<'static>; PORT_WIDTH],
    direction: u8,
    latch: u8,
}

impl FlexPort {
    /// Build a port from pins, bit 0 first
    pub fn new(pins: [Flex<'static>; PORT_WIDTH]) -> Self {
        let mut port = Self {
            pins,
            direction: 0xFF,
            latch: 0x00,
        };
        port.set_latch(0x00);
        port.set_direction(0xFF);
        port
    }
}

fn bit(value: u8, n: usize) -> bool {
    value & (1 << n) != 0
}

impl Port for FlexPort {
    fn direction(&self) -> u8 {
        self.direction
    }

    fn set_direction(&mut self, mask: u8) {
        for (n, pin) in self.pins.iter_mut().enumerate() {
            if bit(mask, n) {
                pin.set_as_input();
            } else {
                pin.set_as_output();
            }
        }
        self.direction = mask;
    }

    fn latch(&self) -> u8 {
        self.latch
    }

    fn set_latch(&mut self, value: u8) {
        for (n, pin) in self.pins.iter_mut().enumerate() {
            pin.set_level(Level::from(bit(value, n)));
        }
        self.latch = value;
    }

    fn read(&self) -> u8 {
        self.pins
            .iter()
            .enumerate()
            .fold(0, |acc, (n, pin)| acc | (u8::from(pin.is_high()) << n))
    }
}

/// Ports wired on this board
pub struct BoardPorts {
    pub a: FlexPort,
    pub b: FlexPort,
    pub c: FlexPort,
}

impl PortBank for BoardPorts {
    type Port = FlexPort;

    fn port_mut(&mut self, name: PortName) -> Option<&mut FlexPort> {
        match name {
            PortName::A => Some(&mut self.a),
            PortName::B => Some(&mut self.b),
            PortName::C => Some(&mut self.c),
            PortName::D => None,
        }
    }
}
