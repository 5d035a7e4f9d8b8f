//! Frame encoding and decoding for the YASP protocol.
//!
//! Frame format:
//! - SYNC (1 byte): 0x05 synchronization byte
//! - LENGTH (2 bytes, big-endian): length field + command + payload bytes,
//!   i.e. payload length + 4
//! - COMMAND (2 bytes, big-endian): command id, bit 15 is the ack flag
//! - PAYLOAD (LENGTH - 4 bytes): command-specific data
//! - CHECKSUM (4 bytes): CRC-32 over LENGTH, COMMAND and PAYLOAD
//!
//! Decoding is a pure function over a byte slice. Encoding either streams
//! the pieces straight to a [`UartTx`] or fills a caller-provided buffer.

use yasp_hal::UartTx;

use crate::checksum::{self, CHECKSUM_SIZE};

/// Frame synchronization byte
pub const SYNC_BYTE: u8 = 0x05;

/// Size of the sync marker
pub const SYNC_SIZE: usize = 1;

/// Size of the length field
pub const LENGTH_SIZE: usize = 2;

/// Size of the command id
pub const COMMAND_SIZE: usize = 2;

/// Bytes between the sync marker and the payload
pub const HEADER_SIZE: usize = SYNC_SIZE + LENGTH_SIZE + COMMAND_SIZE;

/// Smallest complete frame (empty payload)
pub const MIN_FRAME_SIZE: usize = HEADER_SIZE + CHECKSUM_SIZE;

/// Largest payload the 16-bit length field can describe
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize - LENGTH_SIZE - COMMAND_SIZE;

/// Ack flag: bit 7 of the command id's high byte
pub const ACK_FLAG: u16 = 0x8000;

// Byte offsets within a frame
const LENGTH_POS: usize = SYNC_SIZE;
const COMMAND_POS: usize = LENGTH_POS + LENGTH_SIZE;
const PAYLOAD_POS: usize = COMMAND_POS + COMMAND_SIZE;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame is incomplete (need more bytes)
    Incomplete,
    /// First byte is not the sync marker
    NoSync,
    /// Checksum mismatch or impossible length field
    Corrupt,
    /// Payload exceeds what the length field can describe
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Total encoded size of a frame carrying `payload_len` bytes
pub const fn encoded_len(payload_len: usize) -> usize {
    MIN_FRAME_SIZE + payload_len
}

/// Set or clear the ack flag on a command id
pub const fn with_ack(command: u16, ack: bool) -> u16 {
    if ack {
        command | ACK_FLAG
    } else {
        command
    }
}

/// A validated frame borrowed from a receive buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRef<'a> {
    /// Command id exactly as received, ack flag included
    pub command: u16,
    /// Payload bytes
    pub payload: &'a [u8],
}

impl<'a> FrameRef<'a> {
    /// Whether the ack flag is set
    pub fn is_ack(&self) -> bool {
        self.command & ACK_FLAG != 0
    }

    /// Number of bytes this frame occupies on the wire
    pub fn wire_len(&self) -> usize {
        encoded_len(self.payload.len())
    }
}

/// Validate and decode the frame at the start of `buf`
///
/// Returns the frame and the number of bytes it occupies. Only the sync
/// marker, length and checksum are checked here; command lookup is up to
/// the caller.
pub fn parse(buf: &[u8]) -> Result<(FrameRef<'_>, usize), FrameError> {
    if buf.len() < MIN_FRAME_SIZE {
        return Err(FrameError::Incomplete);
    }

    if buf[0] != SYNC_BYTE {
        return Err(FrameError::NoSync);
    }

    let length = u16::from_be_bytes([buf[LENGTH_POS], buf[LENGTH_POS + 1]]) as usize;

    // Sync byte is not counted in the length field
    let total = SYNC_SIZE + length + CHECKSUM_SIZE;
    if buf.len() < total {
        return Err(FrameError::Incomplete);
    }

    let crc_pos = LENGTH_POS + length;
    let calculated = checksum::update(checksum::SEED, &buf[LENGTH_POS..crc_pos]);
    let received = checksum::deserialize([
        buf[crc_pos],
        buf[crc_pos + 1],
        buf[crc_pos + 2],
        buf[crc_pos + 3],
    ]);

    if calculated != received {
        return Err(FrameError::Corrupt);
    }

    // A length field that cannot even cover itself and the command id
    if length < LENGTH_SIZE + COMMAND_SIZE {
        return Err(FrameError::Corrupt);
    }

    let command = u16::from_be_bytes([buf[COMMAND_POS], buf[COMMAND_POS + 1]]);

    Ok((
        FrameRef {
            command,
            payload: &buf[PAYLOAD_POS..crc_pos],
        },
        total,
    ))
}

/// Bytes the frame at the start of `buf` claims to occupy
///
/// Reads only the sync marker and the length field, so it also works on
/// frames whose checksum does not match. `None` if `buf` does not start
/// with a sync byte or is too short to hold the length field.
pub fn declared_len(buf: &[u8]) -> Option<usize> {
    if buf.len() < COMMAND_POS || buf[0] != SYNC_BYTE {
        return None;
    }
    let length = u16::from_be_bytes([buf[LENGTH_POS], buf[LENGTH_POS + 1]]) as usize;
    Some(SYNC_SIZE + length + CHECKSUM_SIZE)
}

/// Header bytes (sync, length, command) for a frame
fn header(command: u16, payload_len: usize, ack: bool) -> Result<[u8; HEADER_SIZE], FrameError> {
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge);
    }

    let length = (LENGTH_SIZE + COMMAND_SIZE + payload_len) as u16;
    let [len_hi, len_lo] = length.to_be_bytes();
    let [cmd_hi, cmd_lo] = with_ack(command, ack).to_be_bytes();

    Ok([SYNC_BYTE, len_hi, len_lo, cmd_hi, cmd_lo])
}

/// Encode a frame and write it to the transport piece by piece
///
/// Header, payload and checksum are written in that order as soon as each
/// is known, then the transport is flushed. Nothing is written if the
/// payload is too large.
pub fn send<T: UartTx + ?Sized>(
    tx: &mut T,
    command: u16,
    payload: &[u8],
    ack: bool,
) -> Result<(), FrameError> {
    let header = header(command, payload.len(), ack)?;
    tx.write_blocking(&header);

    let mut crc = checksum::update(checksum::SEED, &header[LENGTH_POS..]);
    if !payload.is_empty() {
        crc = checksum::update(crc, payload);
        tx.write_blocking(payload);
    }

    let crc = checksum::serialize(crc);
    tx.write_blocking(&crc);
    tx.flush();

    trace!(
        "TX frame: {=[u8]:x} {=[u8]:x} {=[u8]:x}",
        &header[..],
        payload,
        &crc[..]
    );
    Ok(())
}

/// Encode a frame into a byte buffer
///
/// Returns the number of bytes written
pub fn encode_into(
    command: u16,
    payload: &[u8],
    ack: bool,
    buffer: &mut [u8],
) -> Result<usize, FrameError> {
    let header = header(command, payload.len(), ack)?;

    let frame_len = encoded_len(payload.len());
    if buffer.len() < frame_len {
        return Err(FrameError::BufferTooSmall);
    }

    let crc_pos = PAYLOAD_POS + payload.len();
    buffer[..HEADER_SIZE].copy_from_slice(&header);
    buffer[PAYLOAD_POS..crc_pos].copy_from_slice(payload);

    let crc = checksum::update(checksum::SEED, &buffer[LENGTH_POS..crc_pos]);
    buffer[crc_pos..frame_len].copy_from_slice(&checksum::serialize(crc));

    Ok(frame_len)
}
