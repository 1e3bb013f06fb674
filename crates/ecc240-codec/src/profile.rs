use ecc240_core::{BitOrder, EccErr, MAX_FRAME_BYTES, ProfileKind};

use crate::crc16;
use crate::reduce::ReductionTable;

/// x^16 + x^14 + x^12 + x^11 + x^8 + x^5 + x^4 + x^2 + 1 (Koopman 0xac9a).
/// HD=5 up to 241 data bits; the order of x is 257, so every bit of a 30-byte frame plus its
/// checksum (256 bits) has its own single-bit syndrome.
pub const POLY_GENERAL: u32 = 0x15935;

/// x^16 + x^14 + x^7 + x^6 + x^3 + x^2 + 1.
/// Primitive. Over 240 LSB-first data bits, bursts of equal length up to 240 have distinct
/// syndromes, and all bursts of 1..=15 bits have distinct syndromes.
pub const POLY_FIXED240: u32 = 0x140cd;

pub const FIXED_FRAME_BYTES: usize = 30;

/// Each profile binds a generator polynomial to the frame geometry it was chosen for.
#[derive(Debug, Clone)]
pub struct EccProfile {
    pub kind: ProfileKind,
    /// Generator polynomial, leading coefficient included (17 bits)
    pub poly: u32,
    pub reduce: ReductionTable,
    pub min_bytes: usize,
    pub max_bytes: usize,
    /// Numbering of error offsets within the protected field
    pub bit_order: BitOrder,
    /// Whether the protected field extends over the 16 checksum bits
    pub corrects_checksum: bool,
    /// Longest correctable burst, in bits
    pub max_burst_len: usize,
    /// Checksum of the `max_bytes` long frame data[i] = i
    pub known_answer: u16,
}

/// Parameters for the general profile, any even length from 2 to 30 bytes
pub static GENERAL_PARAMS: EccProfile = EccProfile {
    kind: ProfileKind::General,
    poly: POLY_GENERAL,
    reduce: ReductionTable::new(POLY_GENERAL),
    min_bytes: 2,
    max_bytes: MAX_FRAME_BYTES,
    bit_order: BitOrder::MsbFirst,
    corrects_checksum: true,
    max_burst_len: 1,
    known_answer: 3995,
};

/// Parameters for the fixed 240-bit profile
pub static FIXED240_PARAMS: EccProfile = EccProfile {
    kind: ProfileKind::Fixed240,
    poly: POLY_FIXED240,
    reduce: ReductionTable::new(POLY_FIXED240),
    min_bytes: FIXED_FRAME_BYTES,
    max_bytes: FIXED_FRAME_BYTES,
    bit_order: BitOrder::LsbFirst,
    corrects_checksum: false,
    max_burst_len: 15,
    known_answer: 2460,
};

/// Gets the compiled-in parameters for a profile.
pub fn get_params(kind: ProfileKind) -> &'static EccProfile {
    match kind {
        ProfileKind::General => &GENERAL_PARAMS,
        ProfileKind::Fixed240 => &FIXED240_PARAMS,
    }
}

impl EccProfile {
    /// Frame lengths are whole 16-bit words within the profile's range
    pub fn check_len(&self, len: usize) -> Result<(), EccErr> {
        if len % 2 != 0 || len < self.min_bytes || len > self.max_bytes {
            return Err(EccErr::InvalidFrameLength { profile: self.kind, len });
        }
        Ok(())
    }

    pub fn generate(&self, frame: &[u8]) -> Result<u16, EccErr> {
        self.check_len(frame.len())?;
        Ok(self.generate_unchecked(frame))
    }

    /// Checksum without the length check; a trailing odd byte is ignored.
    #[inline]
    pub fn generate_unchecked(&self, frame: &[u8]) -> u16 {
        crc16::fold_words(&self.reduce, frame)
    }

    /// Number of bits in which errors are located for a frame of `len` bytes
    pub const fn field_bits(&self, len: usize) -> usize {
        if self.corrects_checksum { 8 * len + 16 } else { 8 * len }
    }

    /// The known-answer frame data[i] = i, `max_bytes` long
    pub fn known_answer_frame(&self) -> Vec<u8> {
        (0..self.max_bytes).map(|i| i as u8).collect()
    }
}
