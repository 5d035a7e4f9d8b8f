//! Command handlers and the reply link they answer through

use yasp_hal::UartTx;

use crate::config::EngineConfig;
use crate::frame::{self, FrameError};
use crate::messages::{DeviceInfo, Notice};

/// A command implementation registered with the engine
///
/// Handlers run synchronously on the receive path and must not block.
/// Replies go through the [`Link`]; a handler that sends nothing leaves
/// the peer without an answer.
pub trait Handler<T: UartTx> {
    /// Execute the command with its payload
    fn call(&mut self, payload: &[u8], link: &mut Link<'_, T>);
}

/// Outbound side of the engine, lent to a handler for one call
pub struct Link<'a, T> {
    tx: &'a mut T,
    config: &'a EngineConfig,
    registry_capacity: usize,
}

impl<'a, T: UartTx> Link<'a, T> {
    pub(crate) fn new(tx: &'a mut T, config: &'a EngineConfig, registry_capacity: usize) -> Self {
        Self {
            tx,
            config,
            registry_capacity,
        }
    }

    /// Encode and transmit a frame
    pub fn send(&mut self, command: u16, payload: &[u8], ack: bool) -> Result<(), FrameError> {
        frame::send(&mut *self.tx, command, payload, ack)
    }

    /// Transmit an acknowledgement (ack flag set)
    pub fn send_ack(&mut self, command: u16, payload: &[u8]) -> Result<(), FrameError> {
        self.send(command, payload, true)
    }

    /// Transmit an out-of-band notice under the configured notice id
    pub fn notify(&mut self, notice: Notice) {
        let command = self.config.notice_command;
        if let Err(e) = self.send_ack(command, notice.payload()) {
            warn!("Failed to send notice: {:?}", e);
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Self-description of the engine this link belongs to
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            registry_capacity: self.registry_capacity.min(u8::MAX as usize) as u8,
            rx_buffer_size: self.config.rx_buffer_size,
        }
    }

    /// Answer the info command
    pub(crate) fn report_info(&mut self) {
        let command = self.config.info_command;
        let payload = self.device_info().to_payload();
        if let Err(e) = self.send_ack(command, &payload) {
            warn!("Failed to send info: {:?}", e);
        }
    }
}
