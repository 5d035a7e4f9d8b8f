//! UART serial communication abstractions
//!
//! The protocol engine treats the transport as an in-order byte sink that
//! either accepts data or blocks until it can. Write failures are the
//! implementation's business; nothing is reported back to the engine.

/// UART transmitter
pub trait UartTx {
    /// Write data to the UART
    ///
    /// Blocks until all data has been queued for transmission.
    fn write_blocking(&mut self, data: &[u8]);

    /// Flush any buffered data
    fn flush(&mut self) {}
}

/// UART receiver
pub trait UartRx {
    /// Copy whatever bytes are currently available into `buf`
    ///
    /// Returns the number of bytes written, which may be zero. Never blocks.
    fn read_available(&mut self, buf: &mut [u8]) -> usize;
}

impl<T: UartTx + ?Sized> UartTx for &mut T {
    fn write_blocking(&mut self, data: &[u8]) {
        (**self).write_blocking(data)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baudrate: 115200 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sink {
        bytes: [u8; 8],
        len: usize,
        flushes: u8,
    }

    impl UartTx for Sink {
        fn write_blocking(&mut self, data: &[u8]) {
            self.bytes[self.len..self.len + data.len()].copy_from_slice(data);
            self.len += data.len();
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    fn send_all<T: UartTx>(mut tx: T) {
        tx.write_blocking(&[1, 2]);
        tx.write_blocking(&[3]);
        tx.flush();
    }

    #[test]
    fn test_mut_ref_forwards_writes() {
        let mut sink = Sink {
            bytes: [0; 8],
            len: 0,
            flushes: 0,
        };
        send_all(&mut sink);
        assert_eq!(&sink.bytes[..sink.len], &[1, 2, 3]);
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn test_default_baudrate() {
        assert_eq!(UartConfig::default().baudrate, 115200);
    }
}
