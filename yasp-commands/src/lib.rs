//! Command handlers for YASP devices
//!
//! The protocol engine only knows how to move frames; the commands a
//! device actually answers live here:
//!
//! - `GPIO_INOUT`: configure pin directions on a port
//! - `GPIO_HILO`: drive a port's output latch and sample its inputs
//!
//! Handlers are hardware-independent and operate on a [`yasp_hal::PortBank`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod command;
pub mod gpio;

pub use command::{register_gpio_commands, DeviceCommand};
pub use gpio::{GpioError, GpioHiLo, GpioInOut, PortOp, CMD_GPIO_HILO, CMD_GPIO_INOUT};
