//! Host-side decoding of frames sent by a device
//!
//! The device engine dispatches what it receives; a host mostly wants to
//! look at what comes back. [`Replies`] walks a receive buffer and yields
//! each frame without dispatching it.

use crate::config::EngineConfig;
use crate::frame::{self, FrameError, FrameRef, ACK_FLAG, SYNC_BYTE};
use crate::messages::{DeviceInfo, Notice};

/// A frame received from a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply<'a> {
    frame: FrameRef<'a>,
}

impl<'a> Reply<'a> {
    /// Decode the reply at the start of `buf`
    pub fn parse(buf: &'a [u8]) -> Result<(Self, usize), FrameError> {
        let (frame, used) = frame::parse(buf)?;
        Ok((Self { frame }, used))
    }

    /// Command id without the ack flag
    pub fn command(&self) -> u16 {
        self.frame.command & !ACK_FLAG
    }

    /// Command id as received
    pub fn raw_command(&self) -> u16 {
        self.frame.command
    }

    /// Whether the device flagged this as an acknowledgement
    pub fn is_ack(&self) -> bool {
        self.frame.is_ack()
    }

    /// Payload bytes
    pub fn payload(&self) -> &'a [u8] {
        self.frame.payload
    }

    /// The engine notice this reply carries, if any
    pub fn notice(&self, config: &EngineConfig) -> Option<Notice> {
        if self.is_ack() && self.command() == config.notice_command {
            Notice::from_payload(self.payload())
        } else {
            None
        }
    }

    /// The device description this reply carries, if any
    pub fn device_info(&self, config: &EngineConfig) -> Option<DeviceInfo> {
        if self.is_ack() && self.command() == config.info_command {
            DeviceInfo::from_payload(self.payload())
        } else {
            None
        }
    }
}

/// Iterator over the replies in a receive buffer
///
/// Stops at the first incomplete frame; [`consumed`](Self::consumed) tells
/// how much of the buffer may be dropped. Damaged data is yielded as an
/// error and skipped: a frame failing its checksum is dropped whole, using
/// its length field, and anything else up to the next sync byte. Sync bytes
/// inside a damaged frame are never taken as frame starts.
#[derive(Debug, Clone)]
pub struct Replies<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Replies<'a> {
    /// Iterate over the frames in `buf`
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes fully handled so far
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Move to the next sync byte strictly after the current position
    fn skip_to_sync(&mut self) {
        let rest = &self.buf[self.pos..];
        let skipped = rest
            .iter()
            .skip(1)
            .position(|&byte| byte == SYNC_BYTE)
            .map_or(rest.len(), |i| i + 1);
        self.pos += skipped;
    }
}

impl<'a> Iterator for Replies<'a> {
    type Item = Result<Reply<'a>, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }

        let buf: &'a [u8] = self.buf;
        match Reply::parse(&buf[self.pos..]) {
            Ok((reply, used)) => {
                self.pos += used;
                Some(Ok(reply))
            }
            Err(FrameError::Incomplete) => None,
            Err(FrameError::Corrupt) => {
                match frame::declared_len(&buf[self.pos..]) {
                    Some(len) => self.pos = (self.pos + len).min(buf.len()),
                    None => self.skip_to_sync(),
                }
                Some(Err(FrameError::Corrupt))
            }
            Err(e) => {
                self.skip_to_sync();
                Some(Err(e))
            }
        }
    }
}
