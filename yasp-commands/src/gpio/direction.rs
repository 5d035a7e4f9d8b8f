//! Pin direction command
//!
//! Applies the requested operation to a port's direction register and
//! acknowledges with an empty payload. Requests for a port the board does
//! not have, or with an unknown operation, are left unanswered.

use core::cell::RefCell;

use yasp_hal::{Port, PortBank, UartTx};
use yasp_protocol::{Handler, Link};

use super::{GpioError, GpioRequest, CMD_GPIO_INOUT};

/// `GPIO_INOUT` handler
pub struct GpioInOut<'a, B> {
    bank: &'a RefCell<B>,
}

impl<'a, B: PortBank> GpioInOut<'a, B> {
    /// Create a handler operating on `bank`
    pub fn new(bank: &'a RefCell<B>) -> Self {
        Self { bank }
    }

    /// Apply a request, returning the new direction register
    pub fn execute(&mut self, payload: &[u8]) -> Result<u8, GpioError> {
        let request = GpioRequest::parse(payload)?;
        let name = request.port_name()?;

        let mut bank = self.bank.try_borrow_mut().map_err(|_| GpioError::Busy)?;
        let port = bank.port_mut(name).ok_or(GpioError::UnknownPort)?;
        let op = request.operation()?;

        let direction = op.apply(port.direction(), request.mask);
        port.set_direction(direction);
        Ok(direction)
    }
}

impl<'a, T: UartTx, B: PortBank> Handler<T> for GpioInOut<'a, B> {
    fn call(&mut self, payload: &[u8], link: &mut Link<'_, T>) {
        match self.execute(payload) {
            Ok(direction) => {
                trace!("GPIO direction now {=u8:#x}", direction);
                if let Err(e) = link.send_ack(CMD_GPIO_INOUT, &[]) {
                    warn!("Failed to ack GPIO_INOUT: {:?}", e);
                }
            }
            Err(e) => debug!("GPIO_INOUT rejected: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::mock::{request, MockBank, Wire};
    use yasp_protocol::{Engine, EngineConfig, ACK_FLAG};

    fn engine(bank: &RefCell<MockBank>) -> Engine<Wire, GpioInOut<'_, MockBank>, 2> {
        let mut engine = Engine::new(Wire::default(), EngineConfig::default()).unwrap();
        engine
            .register(CMD_GPIO_INOUT, GpioInOut::new(bank))
            .unwrap();
        engine
    }

    #[test]
    fn test_set_direction_and_ack() {
        let bank = RefCell::new(MockBank::default());
        let mut engine = engine(&bank);

        let data = request(CMD_GPIO_INOUT, &[b'A', 2, 0xF0]);
        assert_eq!(engine.receive(&data), data.len());

        assert_eq!(bank.borrow().a.direction, 0xF0);
        assert_eq!(
            engine.transport().replies(),
            vec![(CMD_GPIO_INOUT | ACK_FLAG, vec![])]
        );
    }

    #[test]
    fn test_or_then_and() {
        let bank = RefCell::new(MockBank::default());
        let mut engine = engine(&bank);

        engine.receive(&request(CMD_GPIO_INOUT, &[b'B', 0, 0b0000_1111]));
        engine.receive(&request(CMD_GPIO_INOUT, &[b'B', 0, 0b1000_0000]));
        assert_eq!(bank.borrow().b.direction, 0b1000_1111);

        engine.receive(&request(CMD_GPIO_INOUT, &[b'B', 1, 0b1000_0001]));
        assert_eq!(bank.borrow().b.direction, 0b1000_0001);
        assert_eq!(bank.borrow().a.direction, 0);
        assert_eq!(engine.transport().replies().len(), 3);
    }

    #[test]
    fn test_unknown_port_is_not_acked() {
        let bank = RefCell::new(MockBank::default());
        let mut engine = engine(&bank);

        let data = request(CMD_GPIO_INOUT, &[b'C', 2, 0xFF]);
        assert_eq!(engine.receive(&data), data.len());
        assert!(engine.transport().0.is_empty());
    }

    #[test]
    fn test_unknown_op_leaves_register_alone() {
        let bank = RefCell::new(MockBank::default());
        bank.borrow_mut().a.direction = 0x55;
        let mut engine = engine(&bank);

        engine.receive(&request(CMD_GPIO_INOUT, &[b'A', 7, 0xFF]));
        assert_eq!(bank.borrow().a.direction, 0x55);
        assert!(engine.transport().0.is_empty());
    }

    #[test]
    fn test_short_payload_is_not_acked() {
        let bank = RefCell::new(MockBank::default());
        let mut engine = engine(&bank);

        engine.receive(&request(CMD_GPIO_INOUT, &[b'A']));
        assert!(engine.transport().0.is_empty());
    }

    #[test]
    fn test_busy_bank() {
        let bank = RefCell::new(MockBank::default());
        let mut handler = GpioInOut::new(&bank);

        let _guard = bank.borrow();
        assert_eq!(handler.execute(&[b'A', 2, 1]), Err(GpioError::Busy));
    }
}
