//! GPIO port commands
//!
//! Both commands take the same three-byte payload:
//!
//! ```text
//! ┌──────┬────┬──────┐
//! │ PORT │ OP │ MASK │
//! │ 'A'  │ 0  │ 0x0F │
//! └──────┴────┴──────┘
//! ```
//!
//! OP selects how MASK is combined with the current register value:
//! 0 = OR, 1 = AND, 2 = SET.
//!
//! Ports are shared between the commands through a `RefCell`, the engine
//! never runs two handlers at once.

pub mod direction;
pub mod level;

pub use direction::GpioInOut;
pub use level::GpioHiLo;

use yasp_hal::PortName;

/// Configure pin directions
pub const CMD_GPIO_INOUT: u16 = 0x0010;

/// Drive outputs and sample inputs
pub const CMD_GPIO_HILO: u16 = 0x0011;

// Payload layout
const PORT_POS: usize = 0;
const OPERATION_POS: usize = 1;
const MASK_POS: usize = 2;

/// Size of a GPIO request payload
pub const REQUEST_SIZE: usize = 3;

/// Reasons a GPIO request is not acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Fewer than three payload bytes
    ShortPayload,
    /// Port letter not wired on this board
    UnknownPort,
    /// Operation byte out of range
    UnknownOp,
    /// Port bank already borrowed
    Busy,
}

/// How the mask is combined with a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortOp {
    /// Set the bits in the mask
    Or,
    /// Keep only the bits in the mask
    And,
    /// Replace the register with the mask
    Set,
}

// Wire format values
const OP_BITWISE_OR: u8 = 0;
const OP_BITWISE_AND: u8 = 1;
const OP_SET_PORT: u8 = 2;

impl PortOp {
    /// Parse an operation from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            OP_BITWISE_OR => Some(PortOp::Or),
            OP_BITWISE_AND => Some(PortOp::And),
            OP_SET_PORT => Some(PortOp::Set),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            PortOp::Or => OP_BITWISE_OR,
            PortOp::And => OP_BITWISE_AND,
            PortOp::Set => OP_SET_PORT,
        }
    }

    /// New register value
    pub fn apply(self, current: u8, mask: u8) -> u8 {
        match self {
            PortOp::Or => current | mask,
            PortOp::And => current & mask,
            PortOp::Set => mask,
        }
    }
}

/// A decoded GPIO request
///
/// Port and operation stay raw: the two commands react differently to
/// values they do not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioRequest {
    /// Port letter as received
    pub port: u8,
    /// Operation byte as received
    pub op: u8,
    /// Bit mask
    pub mask: u8,
}

impl GpioRequest {
    /// Decode a request payload
    ///
    /// Extra trailing bytes are ignored.
    pub fn parse(payload: &[u8]) -> Result<Self, GpioError> {
        if payload.len() < REQUEST_SIZE {
            return Err(GpioError::ShortPayload);
        }
        Ok(Self {
            port: payload[PORT_POS],
            op: payload[OPERATION_POS],
            mask: payload[MASK_POS],
        })
    }

    /// Port this request addresses
    pub fn port_name(&self) -> Result<PortName, GpioError> {
        PortName::from_byte(self.port).ok_or(GpioError::UnknownPort)
    }

    /// Operation this request asks for
    pub fn operation(&self) -> Result<PortOp, GpioError> {
        PortOp::from_byte(self.op).ok_or(GpioError::UnknownOp)
    }

    /// Encode as a payload (for hosts and tests)
    pub fn to_payload(&self) -> [u8; REQUEST_SIZE] {
        [self.port, self.op, self.mask]
    }
}
