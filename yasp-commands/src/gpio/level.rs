//! Pin level command
//!
//! Samples the port inputs, then applies the requested operation to the
//! output latch. The reply carries the port letter and the sample, so a
//! host can read a port with an OR of zero.

use core::cell::RefCell;

use yasp_hal::{Port, PortBank, UartTx};
use yasp_protocol::{Handler, Link};

use super::{GpioError, GpioRequest, PortOp, CMD_GPIO_HILO};

/// `GPIO_HILO` handler
pub struct GpioHiLo<'a, B> {
    bank: &'a RefCell<B>,
}

impl<'a, B: PortBank> GpioHiLo<'a, B> {
    /// Create a handler operating on `bank`
    pub fn new(bank: &'a RefCell<B>) -> Self {
        Self { bank }
    }

    /// Apply a request, returning the reply payload
    ///
    /// An unknown operation still samples the port but leaves the latch
    /// as it was.
    pub fn execute(&mut self, payload: &[u8]) -> Result<[u8; 2], GpioError> {
        let request = GpioRequest::parse(payload)?;
        let name = request.port_name()?;

        let mut bank = self.bank.try_borrow_mut().map_err(|_| GpioError::Busy)?;
        let port = bank.port_mut(name).ok_or(GpioError::UnknownPort)?;

        let input = port.read();
        match PortOp::from_byte(request.op) {
            Some(op) => {
                let latch = op.apply(port.latch(), request.mask);
                port.set_latch(latch);
            }
            None => debug!("GPIO_HILO: unknown op {=u8}, latch untouched", request.op),
        }

        Ok([name.to_byte(), input])
    }
}

impl<'a, T: UartTx, B: PortBank> Handler<T> for GpioHiLo<'a, B> {
    fn call(&mut self, payload: &[u8], link: &mut Link<'_, T>) {
        match self.execute(payload) {
            Ok(reply) => {
                if let Err(e) = link.send_ack(CMD_GPIO_HILO, &reply) {
                    warn!("Failed to ack GPIO_HILO: {:?}", e);
                }
            }
            Err(e) => debug!("GPIO_HILO rejected: {:?}", e),
        }
    }
}
