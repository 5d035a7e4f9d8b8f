//! Receive buffering
//!
//! The engine never keeps partial frames; whoever feeds it has to hold on
//! to the unconsumed tail until more bytes arrive. [`RxBuffer`] is that
//! holder: append inbound bytes, run the engine, keep what it left.

use yasp_hal::{UartRx, UartTx};

use crate::engine::Engine;
use crate::handler::Handler;

/// Stream errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError {
    /// Buffer filled up without the engine consuming anything, so the frame
    /// being received can never fit. The buffer was cleared.
    Stalled,
}

/// Fixed-size receive buffer of `N` bytes
#[derive(Debug, Clone)]
pub struct RxBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for RxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RxBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// Bytes waiting to be processed
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of bytes waiting
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total size of the buffer
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Free space, to be filled by a reader and then [`commit`](Self::commit)ted
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.len..]
    }

    /// Mark `n` bytes of the spare space as received
    pub fn commit(&mut self, n: usize) {
        self.len = (self.len + n).min(N);
    }

    /// Append bytes, returning how many fit
    pub fn extend(&mut self, bytes: &[u8]) -> usize {
        let spare = self.spare_mut();
        let n = bytes.len().min(spare.len());
        spare[..n].copy_from_slice(&bytes[..n]);
        self.commit(n);
        n
    }

    /// Remove the first `n` bytes, keeping the rest in order
    fn discard(&mut self, n: usize) {
        let n = n.min(self.len);
        self.buf.copy_within(n..self.len, 0);
        self.len -= n;
    }

    /// Run the engine over the buffered bytes and drop what it consumed
    ///
    /// Returns the number of bytes consumed.
    pub fn process<T, H, const R: usize>(
        &mut self,
        engine: &mut Engine<T, H, R>,
    ) -> Result<usize, StreamError>
    where
        T: UartTx,
        H: Handler<T>,
    {
        let consumed = engine.receive(self.as_slice());
        self.discard(consumed);

        if consumed == 0 && self.len == N {
            warn!("RX buffer full with no complete frame, dropping {} bytes", N);
            self.clear();
            return Err(StreamError::Stalled);
        }

        Ok(consumed)
    }

    /// Pull available bytes from `rx` and process them
    pub fn poll<U, T, H, const R: usize>(
        &mut self,
        rx: &mut U,
        engine: &mut Engine<T, H, R>,
    ) -> Result<usize, StreamError>
    where
        U: UartRx,
        T: UartTx,
        H: Handler<T>,
    {
        let n = rx.read_available(self.spare_mut());
        self.commit(n);

        if self.is_empty() {
            return Ok(0);
        }
        trace!("RX: {} bytes buffered", self.len);

        self.process(engine)
    }
}
