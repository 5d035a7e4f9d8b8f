//! Protocol engine
//!
//! Owns the transport, the command registry and the configuration. One
//! engine is one protocol instance; nothing is global. The engine is not
//! reentrant: callers feed it from a single context.

use yasp_hal::UartTx;

use crate::config::EngineConfig;
use crate::frame::{self, FrameError, SYNC_BYTE};
use crate::handler::{Handler, Link};
use crate::messages::Notice;
use crate::registry::{Registry, RegistryError};

/// Result of one decode attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decode {
    /// A frame of this many bytes was decoded and its handler has run
    Consumed(usize),
    /// Not enough bytes yet; retry from the same offset with more data
    Incomplete,
    /// First byte is not the sync marker
    NoSync,
    /// Checksum mismatch
    Corrupt,
    /// Valid frame, but no handler for its command id
    Unregistered,
}

/// Registry slot: the built-in info command or an application handler
#[derive(Debug, Clone)]
pub enum Slot<H> {
    /// Self-description
    Info,
    /// Application command
    Command(H),
}

impl<T: UartTx, H: Handler<T>> Handler<T> for Slot<H> {
    fn call(&mut self, payload: &[u8], link: &mut Link<'_, T>) {
        match self {
            Slot::Info => link.report_info(),
            Slot::Command(handler) => handler.call(payload, link),
        }
    }
}

/// YASP protocol engine with room for `N` commands (info included)
pub struct Engine<T, H, const N: usize> {
    tx: T,
    registry: Registry<Slot<H>, N>,
    config: EngineConfig,
}

impl<T, H, const N: usize> Engine<T, H, N> {
    /// Create an engine and register the info command
    ///
    /// Fails only when `N` is zero.
    pub fn new(tx: T, config: EngineConfig) -> Result<Self, RegistryError> {
        let mut registry = Registry::new();
        registry.register(config.info_command, Slot::Info)?;
        Ok(Self {
            tx,
            registry,
            config,
        })
    }

    /// Register an application command
    ///
    /// Registration happens at startup; running out of slots is a
    /// configuration error the caller should treat as fatal.
    pub fn register(&mut self, id: u16, handler: H) -> Result<(), RegistryError> {
        self.registry.register(id, Slot::Command(handler)).map_err(|e| {
            warn!("Registry full, cannot register command {=u16:#x}", id);
            e
        })
    }

    /// Application handler registered for `id`
    pub fn handler(&self, id: u16) -> Option<&H> {
        match self.registry.get(id) {
            Some(Slot::Command(handler)) => Some(handler),
            _ => None,
        }
    }

    /// Application handler registered for `id`, mutably
    pub fn handler_mut(&mut self, id: u16) -> Option<&mut H> {
        match self.registry.get_mut(id) {
            Some(Slot::Command(handler)) => Some(handler),
            _ => None,
        }
    }

    /// Command table
    pub fn registry(&self) -> &Registry<Slot<H>, N> {
        &self.registry
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.tx
    }

    /// Borrow the transport mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.tx
    }

    /// Take the transport back
    pub fn into_transport(self) -> T {
        self.tx
    }
}

impl<T: UartTx, H: Handler<T>, const N: usize> Engine<T, H, N> {
    /// Decode the frame at the start of `buf` and dispatch it
    pub fn process(&mut self, buf: &[u8]) -> Decode {
        let (frame, used) = match frame::parse(buf) {
            Ok(parsed) => parsed,
            Err(FrameError::Incomplete) => return Decode::Incomplete,
            Err(FrameError::NoSync) => return Decode::NoSync,
            Err(_) => return Decode::Corrupt,
        };
        trace!("RX frame: {=[u8]:x}", &buf[..used]);

        let mut link = Link::new(&mut self.tx, &self.config, N);
        if self.registry.dispatch(frame.command, frame.payload, &mut link) {
            trace!(
                "Dispatched command {=u16:#x} ({} byte payload)",
                frame.command,
                frame.payload.len()
            );
            Decode::Consumed(used)
        } else {
            Decode::Unregistered
        }
    }

    /// Run every complete frame in `buf` through the engine
    ///
    /// Returns how many bytes the caller may discard. Bytes past that point
    /// are the start of a frame still being received and must be presented
    /// again, with more data appended, on the next call.
    ///
    /// Framing errors are reported to the peer. After a resync the call
    /// returns at the next sync byte without decoding from it.
    pub fn receive(&mut self, buf: &[u8]) -> usize {
        let mut handled = 0;

        loop {
            match self.process(&buf[handled..]) {
                Decode::Consumed(n) => {
                    handled += n;
                    if handled < buf.len() {
                        continue;
                    }
                }
                Decode::Incomplete => {}
                Decode::NoSync => {
                    self.notify(Notice::Resync);
                    let skipped = buf[handled..]
                        .iter()
                        .position(|&byte| byte == SYNC_BYTE)
                        .unwrap_or(buf.len() - handled);
                    debug!("Resync: skipped {} bytes", skipped);
                    handled += skipped;
                }
                Decode::Corrupt => {
                    warn!("Corrupt frame, discarding {} bytes", buf.len() - handled);
                    self.notify(Notice::Corrupt);
                    handled = buf.len();
                }
                Decode::Unregistered => {
                    warn!("Unregistered command, discarding {} bytes", buf.len() - handled);
                    self.notify(Notice::NotRegistered);
                    handled = buf.len();
                }
            }
            break;
        }

        handled
    }

    /// Encode and transmit a frame
    pub fn send(&mut self, command: u16, payload: &[u8], ack: bool) -> Result<(), FrameError> {
        frame::send(&mut self.tx, command, payload, ack)
    }

    /// Transmit an acknowledgement (ack flag set)
    pub fn send_ack(&mut self, command: u16, payload: &[u8]) -> Result<(), FrameError> {
        self.send(command, payload, true)
    }

    /// Transmit an out-of-band notice
    pub fn notify(&mut self, notice: Notice) {
        Link::new(&mut self.tx, &self.config, N).notify(notice);
    }
}
