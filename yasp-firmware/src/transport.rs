//! UART transmit adapter for the protocol engine

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io::Write;
use yasp_hal::UartTx;

/// Blocking writer over the buffered UART
///
/// The engine sends replies from inside handlers, so writes block until the
/// ring buffer has room rather than awaiting.
pub struct SerialTx {
    tx: BufferedUartTx,
}

impl SerialTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl UartTx for SerialTx {
    fn write_blocking(&mut self, data: &[u8]) {
        if let Err(e) = self.tx.write_all(data) {
            warn!("UART write error: {:?}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = Write::flush(&mut self.tx) {
            warn!("UART flush error: {:?}", e);
        }
    }
}
