//! YASP command/response protocol
//!
//! This crate implements the protocol engine a device runs to accept binary
//! commands from a host over a UART, plus the helpers a host needs to read
//! the answers. Frames are integrity-checked with CRC-32 and the engine
//! resynchronizes on its own after line noise.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌──────┬────────┬─────────┬─────────────┬──────────┐
//! │ SYNC │ LENGTH │ COMMAND │ PAYLOAD     │ CRC-32   │
//! │ 1B   │ 2B BE  │ 2B BE   │ LENGTH - 4  │ 4B       │
//! └──────┴────────┴─────────┴─────────────┴──────────┘
//! ```
//!
//! The high bit of COMMAND marks acknowledgements. When something goes
//! wrong the engine tells the peer with a short text notice rather than
//! dropping data silently.
//!
//! # Usage
//!
//! ```ignore
//! let mut engine: Engine<_, MyCommand, 8> = Engine::new(uart_tx, EngineConfig::default())?;
//! engine.register(0x0010, MyCommand::Blink)?;
//!
//! let mut rx_buf: RxBuffer<64> = RxBuffer::new();
//! loop {
//!     let _ = rx_buf.poll(&mut uart_rx, &mut engine);
//! }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod checksum;
pub mod config;
pub mod engine;
pub mod frame;
pub mod handler;
pub mod messages;
pub mod registry;
pub mod reply;
pub mod stream;

pub use config::EngineConfig;
pub use engine::{Decode, Engine, Slot};
pub use frame::{FrameError, FrameRef, ACK_FLAG, MAX_PAYLOAD_SIZE, MIN_FRAME_SIZE, SYNC_BYTE};
pub use handler::{Handler, Link};
pub use messages::{DeviceInfo, Notice, CMD_INFO, CMD_NOTICE};
pub use registry::{Registry, RegistryError};
pub use reply::{Replies, Reply};
pub use stream::{RxBuffer, StreamError};
