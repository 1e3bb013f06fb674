use ecc240_core::bits::flip_run;
use ecc240_core::{CRC_BYTES, EccErr, MAX_FRAME_BYTES, ProfileKind};

use crate::gf2;
use crate::profile::{EccProfile, FIXED_FRAME_BYTES, FIXED240_PARAMS, GENERAL_PARAMS};
use crate::run_inverse::{ErrorDescriptor, RunInverseTable};

/// Successful outcomes of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Syndrome was zero, the frame is accepted as received
    NoChangeNeeded,
    /// The described bits were flipped back and the frame now matches its checksum.
    /// An offset at or past `8 * len` means the error was in the checksum itself and
    /// the data was already intact.
    Corrected(ErrorDescriptor),
}

/// How a nonzero syndrome is turned into an error location
#[derive(Debug, Clone, Copy)]
pub enum Locator<'a> {
    /// Run the CRC backwards from the syndrome; finds single-bit errors at any frame length
    BackwardSearch,
    /// Look the syndrome up; finds bursts, for the one frame length the table was built for
    RunInverse(&'a RunInverseTable),
}

impl Locator<'static> {
    /// Default locator of a compiled-in profile
    pub fn for_profile(profile: &EccProfile) -> Self {
        match profile.kind {
            ProfileKind::General => Locator::BackwardSearch,
            ProfileKind::Fixed240 => Locator::RunInverse(RunInverseTable::fixed240()),
        }
    }
}

impl Locator<'_> {
    pub fn locate(&self, profile: &EccProfile, syndrome: u16, len: usize) -> Option<ErrorDescriptor> {
        let desc = match self {
            Locator::BackwardSearch => {
                locate_single_bit(profile.poly, syndrome, profile.field_bits(len))
                    .map(|offset| ErrorDescriptor { offset, run_len: 1 })
            }
            Locator::RunInverse(table) => table.lookup(syndrome),
        }?;

        // A table built for another geometry may point outside this frame
        if desc.offset + desc.run_len > profile.field_bits(len) {
            tracing::debug!(profile = ?profile.kind, "locate: {:?} outside {} byte frame", desc, len);
            return None;
        }
        Some(desc)
    }
}

/// Finds the single flipped bit whose syndrome is `syndrome`.
///
/// A flip at field bit `p` (MSB first over data then checksum) contributes x^(field_bits-1-p),
/// so running the register backwards k times reaches exactly 1 iff p = field_bits-1-k.
/// Returns the bit position, or None if no step within the field reaches 1.
pub fn locate_single_bit(poly: u32, syndrome: u16, field_bits: usize) -> Option<usize> {
    let mut crc = syndrome;
    for steps in 0..field_bits {
        if crc == 1 {
            return Some(field_bits - 1 - steps);
        }
        crc = gf2::div_x(poly, crc);
    }
    None
}

/// Checks a frame against its received checksum and repairs it if the error is locatable.
///
/// The correction is applied to a scratch copy of data and checksum and only written back
/// to `frame` once the copy verifies. On every error outcome `frame` is left as received.
pub fn check_and_correct_with(
    profile: &EccProfile,
    locator: Locator<'_>,
    frame: &mut [u8],
    claimed: u16,
) -> Result<CheckOutcome, EccErr> {
    let len = frame.len();
    profile.check_len(len)?;

    let syndrome = profile.generate_unchecked(frame) ^ claimed;
    if syndrome == 0 {
        tracing::trace!(profile = ?profile.kind, "check: {} bytes clean", len);
        return Ok(CheckOutcome::NoChangeNeeded);
    }
    tracing::trace!(profile = ?profile.kind, "check: {} bytes syndrome {:#06x}", len, syndrome);

    let Some(desc) = locator.locate(profile, syndrome, len) else {
        tracing::debug!(profile = ?profile.kind, "check: syndrome {:#06x} uncorrectable", syndrome);
        return Err(EccErr::Uncorrectable { syndrome });
    };

    // Scratch field: data || checksum, big-endian, as it travelled
    let mut scratch = [0u8; MAX_FRAME_BYTES + CRC_BYTES];
    let field = &mut scratch[..len + CRC_BYTES];
    field[..len].copy_from_slice(frame);
    field[len..].copy_from_slice(&claimed.to_be_bytes());
    flip_run(field, desc.offset, desc.run_len, profile.bit_order);

    let (data, crc) = field.split_at(len);
    let crc = u16::from_be_bytes([crc[0], crc[1]]);
    if profile.generate_unchecked(data) != crc {
        tracing::warn!(
            profile = ?profile.kind,
            "check: correcting {:?} did not verify (syndrome {:#06x}), rejecting",
            desc,
            syndrome
        );
        return Err(EccErr::VerificationFailed { syndrome, offset: desc.offset, run_len: desc.run_len });
    }

    frame.copy_from_slice(data);
    tracing::debug!(profile = ?profile.kind, "check: corrected {:?}", desc);
    Ok(CheckOutcome::Corrected(desc))
}

impl EccProfile {
    /// Checks and corrects with the profile's default locator
    pub fn check_and_correct(&self, frame: &mut [u8], claimed: u16) -> Result<CheckOutcome, EccErr> {
        check_and_correct_with(self, Locator::for_profile(self), frame, claimed)
    }
}

/// General profile: even frames of 2 to 30 bytes, any single flipped bit in data or checksum.
pub fn check_and_correct(frame: &mut [u8], claimed: u16) -> Result<CheckOutcome, EccErr> {
    GENERAL_PARAMS.check_and_correct(frame, claimed)
}

/// Fixed 240-bit profile: 30-byte frames, any burst of 1 to 15 flipped data bits.
pub fn check_and_correct_fixed(frame: &mut [u8; FIXED_FRAME_BYTES], claimed: u16) -> Result<CheckOutcome, EccErr> {
    FIXED240_PARAMS.check_and_correct(frame, claimed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crc16;
    use crate::profile::POLY_GENERAL;

    #[test]
    fn test_locate_single_bit_positions() {
        // Last checksum bit: syndrome 1, zero steps
        assert_eq!(locate_single_bit(POLY_GENERAL, 1, 256), Some(255));
        // First checksum bit: x^15
        assert_eq!(locate_single_bit(POLY_GENERAL, 0x8000, 256), Some(240));
        // Last data bit: x^16
        assert_eq!(locate_single_bit(POLY_GENERAL, 0x5935, 256), Some(239));
        // Beyond the field of a 2-byte frame
        assert_eq!(locate_single_bit(POLY_GENERAL, gf2::mul_xn(POLY_GENERAL, 1, 40), 32), None);
    }

    #[test]
    fn test_clean_frame() {
        let mut frame = [0xa5u8; 12];
        let crc = crc16::generate(&frame).unwrap();
        assert_eq!(check_and_correct(&mut frame, crc), Ok(CheckOutcome::NoChangeNeeded));
        assert_eq!(frame, [0xa5u8; 12]);
    }

    #[test]
    fn test_corrects_data_bit() {
        let orig: Vec<u8> = (0..30).collect();
        let crc = crc16::generate(&orig).unwrap();
        let mut frame = orig.clone();
        frame[3] ^= 0x10;
        let outcome = check_and_correct(&mut frame, crc);
        assert_eq!(outcome, Ok(CheckOutcome::Corrected(ErrorDescriptor { offset: 27, run_len: 1 })));
        assert_eq!(frame, orig);
    }

    #[test]
    fn test_corrects_checksum_bit() {
        let orig: Vec<u8> = (0..30).collect();
        let crc = crc16::generate(&orig).unwrap();
        let mut frame = orig.clone();
        let outcome = check_and_correct(&mut frame, crc ^ 0x0001);
        assert_eq!(outcome, Ok(CheckOutcome::Corrected(ErrorDescriptor { offset: 255, run_len: 1 })));
        assert_eq!(frame, orig);
    }

    #[test]
    fn test_bad_length_rejected_untouched() {
        let mut frame = [1u8, 2, 3];
        assert_eq!(
            check_and_correct(&mut frame, 0),
            Err(EccErr::InvalidFrameLength { profile: ProfileKind::General, len: 3 })
        );
        assert_eq!(frame, [1, 2, 3]);
    }

    #[test]
    fn test_fixed_burst() {
        let orig: [u8; 30] = core::array::from_fn(|i| (i * 7) as u8);
        let crc = crc16::generate_fixed(&orig);
        let mut frame = orig;
        flip_run(&mut frame, 100, 12, FIXED240_PARAMS.bit_order);
        let outcome = check_and_correct_fixed(&mut frame, crc);
        assert_eq!(outcome, Ok(CheckOutcome::Corrected(ErrorDescriptor { offset: 100, run_len: 12 })));
        assert_eq!(frame, orig);
    }
}
