//! Reserved command ids and engine-generated notices
//!
//! The engine answers framing problems on the same link they came from:
//! a short NUL-terminated text under the broadcast notice id, ack flag set.

/// Self-description command, registered by every engine
pub const CMD_INFO: u16 = 0x0000;

/// Broadcast id used for out-of-band notices
pub const CMD_NOTICE: u16 = 0x00FF;

// Notice texts, NUL terminator included as sent on the wire
const TEXT_RESYNC: &[u8] = b"Resynch!\0";
const TEXT_CORRUPT: &[u8] = b"Corrupt!\0";
const TEXT_NOT_REGISTERED: &[u8] = b"NotRegistered!\0";

/// Why the engine dropped inbound bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    /// Bytes did not start with the sync marker; skipped to the next one
    Resync,
    /// Checksum mismatch; rest of the chunk discarded
    Corrupt,
    /// Well-formed frame for a command nobody registered
    NotRegistered,
}

impl Notice {
    /// Wire payload for this notice
    pub fn payload(self) -> &'static [u8] {
        match self {
            Notice::Resync => TEXT_RESYNC,
            Notice::Corrupt => TEXT_CORRUPT,
            Notice::NotRegistered => TEXT_NOT_REGISTERED,
        }
    }

    /// Recognize a notice payload
    ///
    /// A missing NUL terminator is tolerated.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let text = match payload.split_last() {
            Some((0, rest)) => rest,
            _ => payload,
        };

        [Notice::Resync, Notice::Corrupt, Notice::NotRegistered]
            .into_iter()
            .find(|notice| {
                let expected = notice.payload();
                &expected[..expected.len() - 1] == text
            })
    }
}

/// Self-description reported by the info command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    /// Registry capacity (saturated at 255)
    pub registry_capacity: u8,
    /// Largest chunk the device's receive buffer holds
    pub rx_buffer_size: u16,
}

impl DeviceInfo {
    /// Size of the encoded info payload
    pub const SIZE: usize = 3;

    /// Encode as `[capacity, size_hi, size_lo]`
    pub fn to_payload(&self) -> [u8; Self::SIZE] {
        let [hi, lo] = self.rx_buffer_size.to_be_bytes();
        [self.registry_capacity, hi, lo]
    }

    /// Decode an info payload
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        match *payload {
            [registry_capacity, hi, lo] => Some(Self {
                registry_capacity,
                rx_buffer_size: u16::from_be_bytes([hi, lo]),
            }),
            _ => None,
        }
    }
}
