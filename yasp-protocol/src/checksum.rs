//! CRC-32 integrity check
//!
//! Standard CRC-32 (IEEE 802.3 polynomial, reflected) in its incremental
//! zlib form: feeding a range in pieces gives the same value as feeding it
//! at once, starting from a running value of 0.
//!
//! The wire representation is big-endian. Both ends of a link must agree on
//! it or every frame is rejected as corrupt.

use crc32fast::Hasher;

/// Size of a serialized checksum in bytes
pub const CHECKSUM_SIZE: usize = 4;

/// Starting value for a fresh checksum
pub const SEED: u32 = 0;

/// Continue a running checksum over `bytes`
pub fn update(crc: u32, bytes: &[u8]) -> u32 {
    let mut hasher = Hasher::new_with_initial(crc);
    hasher.update(bytes);
    hasher.finalize()
}

/// Convert a checksum to its wire representation
pub fn serialize(crc: u32) -> [u8; CHECKSUM_SIZE] {
    crc.to_be_bytes()
}

/// Convert a wire representation back to a checksum
pub fn deserialize(bytes: [u8; CHECKSUM_SIZE]) -> u32 {
    u32::from_be_bytes(bytes)
}
