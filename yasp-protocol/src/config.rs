//! Engine configuration
//!
//! Registry capacity is a const generic on [`crate::Engine`]; everything
//! else that differs between deployments lives here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::messages::{CMD_INFO, CMD_NOTICE};

/// Default receive buffer size reported by the info command
pub const DEFAULT_RX_BUFFER_SIZE: u16 = 64;

/// Protocol engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Command id the self-description handler is registered under
    pub info_command: u16,
    /// Command id notices are sent under (ack flag added on the wire)
    pub notice_command: u16,
    /// Receive buffer size of the transport, reported to the peer
    pub rx_buffer_size: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            info_command: CMD_INFO,
            notice_command: CMD_NOTICE,
            rx_buffer_size: DEFAULT_RX_BUFFER_SIZE,
        }
    }
}

impl EngineConfig {
    /// Override the reported receive buffer size
    pub fn with_rx_buffer_size(mut self, size: u16) -> Self {
        self.rx_buffer_size = size;
        self
    }
}
