//! Serial protocol task
//!
//! Owns the protocol engine: reads whatever the UART has, feeds it to the
//! engine through an `RxBuffer` and lets the handlers answer.

use core::cell::RefCell;

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::Read;

use yasp_commands::{register_gpio_commands, DeviceCommand};
use yasp_protocol::{Engine, EngineConfig, RxBuffer};

use crate::ports::BoardPorts;
use crate::transport::SerialTx;

/// Receive buffer size, reported to the host by the info command
pub const RX_BUF_SIZE: usize = 64;

/// Registry slots: info plus the two GPIO commands, with room to spare
const MAX_COMMANDS: usize = 4;

type DeviceEngine = Engine<SerialTx, DeviceCommand<'static, BoardPorts>, MAX_COMMANDS>;

/// Serial task - runs the protocol engine on UART0
#[embassy_executor::task]
pub async fn serial_task(
    tx: BufferedUartTx,
    mut rx: BufferedUartRx,
    ports: &'static RefCell<BoardPorts>,
) {
    info!("Serial task started");

    let config = EngineConfig::default().with_rx_buffer_size(RX_BUF_SIZE as u16);
    let mut engine: DeviceEngine = match Engine::new(SerialTx::new(tx), config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Cannot create engine: {:?}", e);
            return;
        }
    };
    if let Err(e) = register_gpio_commands(&mut engine, ports) {
        error!("Cannot register GPIO commands: {:?}", e);
        return;
    }
    info!(
        "Engine ready: {} of {} commands registered",
        engine.registry().len(),
        engine.registry().capacity()
    );

    let mut rx_buf: RxBuffer<RX_BUF_SIZE> = RxBuffer::new();

    loop {
        match rx.read(rx_buf.spare_mut()).await {
            Ok(n) => {
                trace!("RX: {} bytes", n);
                rx_buf.commit(n);
                drain(&mut rx_buf, &mut engine);
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Process buffered bytes until the engine wants more input
///
/// A resync stops the engine on the frame it just aligned to, so keep
/// going while it makes progress.
fn drain(rx_buf: &mut RxBuffer<RX_BUF_SIZE>, engine: &mut DeviceEngine) {
    while !rx_buf.is_empty() {
        match rx_buf.process(engine) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("RX stalled: {:?}", e);
                break;
            }
        }
    }
}
