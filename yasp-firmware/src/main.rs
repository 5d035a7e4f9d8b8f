//! YASP - device firmware for RP2040-based boards
//!
//! Answers YASP frames on UART0 (GPIO0 TX, GPIO1 RX) and exposes three
//! 8-bit GPIO ports to the host through the GPIO commands.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Flex;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as RpUartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use yasp_hal::UartConfig;

use crate::ports::{BoardPorts, FlexPort};

mod ports;
mod tasks;
mod transport;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Shared by both GPIO command handlers
static PORTS: StaticCell<RefCell<BoardPorts>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("YASP firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let link = UartConfig::default();
    let mut uart_config = RpUartConfig::default();
    uart_config.baudrate = link.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", link.baudrate);

    let ports = PORTS.init(RefCell::new(BoardPorts {
        a: FlexPort::new([
            Flex::new(p.PIN_2),
            Flex::new(p.PIN_3),
            Flex::new(p.PIN_4),
            Flex::new(p.PIN_5),
            Flex::new(p.PIN_6),
            Flex::new(p.PIN_7),
            Flex::new(p.PIN_8),
            Flex::new(p.PIN_9),
        ]),
        b: FlexPort::new([
            Flex::new(p.PIN_10),
            Flex::new(p.PIN_11),
            Flex::new(p.PIN_12),
            Flex::new(p.PIN_13),
            Flex::new(p.PIN_14),
            Flex::new(p.PIN_15),
            Flex::new(p.PIN_16),
            Flex::new(p.PIN_17),
        ]),
        c: FlexPort::new([
            Flex::new(p.PIN_18),
            Flex::new(p.PIN_19),
            Flex::new(p.PIN_20),
            Flex::new(p.PIN_21),
            Flex::new(p.PIN_22),
            Flex::new(p.PIN_26),
            Flex::new(p.PIN_27),
            Flex::new(p.PIN_28),
        ]),
    }));

    info!("GPIO ports A, B and C initialized");

    unwrap!(spawner.spawn(tasks::serial_task(tx, rx, ports)));

    info!("Serial task spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
