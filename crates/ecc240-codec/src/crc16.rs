//! CRC16 over frames of big-endian 16-bit words, table driven.

use ecc240_core::EccErr;

use crate::profile::{FIXED_FRAME_BYTES, FIXED240_PARAMS, GENERAL_PARAMS};
use crate::reduce::ReductionTable;

/// Folds the frame into the register one word at a time: r = reduce(r ^ w).
/// Initial value 0, no final XOR, so the checksum is XOR-additive over error patterns.
#[inline]
pub fn fold_words(table: &ReductionTable, frame: &[u8]) -> u16 {
    frame
        .chunks_exact(2)
        .fold(0u16, |r, w| table.reduce(r ^ u16::from_be_bytes([w[0], w[1]])))
}

/// Checksum of an even-length frame of 2 to 30 bytes, general profile.
pub fn generate(frame: &[u8]) -> Result<u16, EccErr> {
    GENERAL_PARAMS.generate(frame)
}

/// Checksum of a 30-byte frame, fixed 240-bit profile.
pub fn generate_fixed(frame: &[u8; FIXED_FRAME_BYTES]) -> u16 {
    FIXED240_PARAMS.generate_unchecked(frame)
}
