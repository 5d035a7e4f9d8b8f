//! YASP Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits the protocol engine and its
//! command handlers are written against. Chip-specific code (the RP2040
//! firmware, host-side test doubles) implements them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Command handlers (yasp-commands)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  yasp-protocol (engine, codec)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  yasp-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  yasp-firmware / test doubles           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`gpio::Port`], [`gpio::PortBank`] - 8-bit register-style GPIO ports

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{Port, PortBank, PortName};
pub use uart::{UartConfig, UartRx, UartTx};
