//! GPIO port abstractions
//!
//! Ports are modelled the way small microcontrollers expose them: eight pins
//! sharing a direction register, an output latch and an input register.
//! Implementations map these onto whatever the chip actually provides.

/// An 8-bit GPIO port
///
/// Bit `n` of every register refers to pin `n` of the port.
pub trait Port {
    /// Direction register (1 = input, 0 = output)
    fn direction(&self) -> u8;

    /// Write the direction register
    fn set_direction(&mut self, mask: u8);

    /// Output latch register
    fn latch(&self) -> u8;

    /// Write the output latch register
    fn set_latch(&mut self, value: u8);

    /// Sample the input levels of all eight pins
    fn read(&self) -> u8;
}

/// Port identifier as sent on the wire (ASCII letter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortName {
    A,
    B,
    C,
    D,
}

impl PortName {
    /// Parse a port from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(PortName::A),
            b'B' => Some(PortName::B),
            b'C' => Some(PortName::C),
            b'D' => Some(PortName::D),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            PortName::A => b'A',
            PortName::B => b'B',
            PortName::C => b'C',
            PortName::D => b'D',
        }
    }
}

/// A set of named ports
///
/// Boards that only wire up some of the ports return `None` for the rest.
pub trait PortBank {
    /// Concrete port type
    type Port: Port;

    /// Borrow the named port, if the board has it
    fn port_mut(&mut self, name: PortName) -> Option<&mut Self::Port>;
}
