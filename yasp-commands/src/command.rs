//! The device's command set
//!
//! An engine stores one handler type, so every command a device answers is
//! a variant here.

use core::cell::RefCell;

use yasp_hal::{PortBank, UartTx};
use yasp_protocol::{Engine, Handler, Link, RegistryError};

use crate::gpio::{GpioHiLo, GpioInOut, CMD_GPIO_HILO, CMD_GPIO_INOUT};

/// Any command this crate provides
pub enum DeviceCommand<'a, B> {
    /// `GPIO_INOUT`
    InOut(GpioInOut<'a, B>),
    /// `GPIO_HILO`
    HiLo(GpioHiLo<'a, B>),
}

impl<'a, T: UartTx, B: PortBank> Handler<T> for DeviceCommand<'a, B> {
    fn call(&mut self, payload: &[u8], link: &mut Link<'_, T>) {
        match self {
            DeviceCommand::InOut(handler) => handler.call(payload, link),
            DeviceCommand::HiLo(handler) => handler.call(payload, link),
        }
    }
}

/// Register both GPIO commands on `engine`, sharing `bank`
pub fn register_gpio_commands<'a, T, B, const N: usize>(
    engine: &mut Engine<T, DeviceCommand<'a, B>, N>,
    bank: &'a RefCell<B>,
) -> Result<(), RegistryError>
where
    B: PortBank,
{
    engine.register(CMD_GPIO_INOUT, DeviceCommand::InOut(GpioInOut::new(bank)))?;
    engine.register(CMD_GPIO_HILO, DeviceCommand::HiLo(GpioHiLo::new(bank)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::mock::{request, MockBank, Wire};
    use yasp_protocol::{DeviceInfo, EngineConfig, Notice, Replies, ACK_FLAG, CMD_INFO};

    type TestEngine<'a> = Engine<Wire, DeviceCommand<'a, MockBank>, 3>;

    fn engine(bank: &RefCell<MockBank>) -> TestEngine<'_> {
        let mut engine = Engine::new(Wire::default(), EngineConfig::default()).unwrap();
        register_gpio_commands(&mut engine, bank).unwrap();
        engine
    }

    #[test]
    fn test_registers_both_commands() {
        let bank = RefCell::new(MockBank::default());
        let engine = engine(&bank);

        assert!(engine.registry().contains(CMD_INFO));
        assert!(engine.registry().contains(CMD_GPIO_INOUT));
        assert!(engine.registry().contains(CMD_GPIO_HILO));
        assert!(engine.registry().is_full());
    }

    #[test]
    fn test_too_small_engine() {
        let bank = RefCell::new(MockBank::default());
        let mut engine: Engine<Wire, DeviceCommand<'_, MockBank>, 2> =
            Engine::new(Wire::default(), EngineConfig::default()).unwrap();

        assert_eq!(
            register_gpio_commands(&mut engine, &bank),
            Err(RegistryError::Full)
        );
    }

    #[test]
    fn test_blink_session() {
        let bank = RefCell::new(MockBank::default());
        bank.borrow_mut().a.input = 0x01;
        let mut engine = engine(&bank);

        let mut data = request(CMD_GPIO_INOUT, &[b'A', 2, 0x01]);
        data.extend_from_slice(&request(CMD_GPIO_HILO, &[b'A', 0, 0x80]));
        data.extend_from_slice(&request(CMD_GPIO_HILO, &[b'A', 1, 0x7F]));
        assert_eq!(engine.receive(&data), data.len());

        assert_eq!(bank.borrow().a.direction, 0x01);
        assert_eq!(bank.borrow().a.latch, 0x00);
        assert_eq!(
            engine.transport().replies(),
            vec![
                (CMD_GPIO_INOUT | ACK_FLAG, vec![]),
                (CMD_GPIO_HILO | ACK_FLAG, vec![b'A', 0x01]),
                (CMD_GPIO_HILO | ACK_FLAG, vec![b'A', 0x01]),
            ]
        );
    }

    #[test]
    fn test_info_lists_capacity() {
        let bank = RefCell::new(MockBank::default());
        let mut engine = engine(&bank);
        let config = *engine.config();

        engine.receive(&request(CMD_INFO, &[]));

        let wire = &engine.transport().0;
        let reply = Replies::new(wire).next().unwrap().unwrap();
        assert_eq!(
            reply.device_info(&config),
            Some(DeviceInfo {
                registry_capacity: 3,
                rx_buffer_size: config.rx_buffer_size,
            })
        );
    }

    #[test]
    fn test_unknown_command_gets_notice() {
        let bank = RefCell::new(MockBank::default());
        let mut engine = engine(&bank);
        let config = *engine.config();

        engine.receive(&request(0x0042, &[b'A', 2, 0xFF]));

        let wire = &engine.transport().0;
        let reply = Replies::new(wire).next().unwrap().unwrap();
        assert_eq!(reply.notice(&config), Some(Notice::NotRegistered));
        assert_eq!(bank.borrow().a.latch, 0);
    }
}
