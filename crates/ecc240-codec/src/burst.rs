use ecc240_core::MAX_FRAME_BYTES;
use ecc240_core::bits::flip_nth_bit;

use crate::profile::EccProfile;
use crate::run_inverse::ErrorDescriptor;

/// Slides a window of `run_len` flipped bits across an all-zero frame of `len` bytes,
/// yielding each window with the checksum it produces.
///
/// The zero frame checksums to 0, so by additivity each yielded value is the syndrome the
/// receiver would see for that burst on any frame. The window is moved by toggling the bit
/// it leaves and the bit it enters, one checksum per position.
pub struct BurstSweep<'a> {
    profile: &'a EccProfile,
    buf: [u8; MAX_FRAME_BYTES],
    len: usize,
    run_len: usize,
    offset: usize,
}

impl<'a> BurstSweep<'a> {
    /// `len` must be a valid frame length for `profile`
    pub fn new(profile: &'a EccProfile, len: usize, run_len: usize) -> Self {
        let len = len.min(MAX_FRAME_BYTES);
        let mut buf = [0u8; MAX_FRAME_BYTES];
        for bit in 0..run_len.min(8 * len) {
            flip_nth_bit(&mut buf, bit, profile.bit_order);
        }
        Self { profile, buf, len, run_len, offset: 0 }
    }
}

impl Iterator for BurstSweep<'_> {
    type Item = (ErrorDescriptor, u16);

    fn next(&mut self) -> Option<Self::Item> {
        let bits = 8 * self.len;
        if self.run_len == 0 || self.offset + self.run_len > bits {
            return None;
        }

        let syndrome = self.profile.generate_unchecked(&self.buf[..self.len]);
        let desc = ErrorDescriptor { offset: self.offset, run_len: self.run_len };

        // Advance the window by one bit
        flip_nth_bit(&mut self.buf, self.offset, self.profile.bit_order);
        if self.offset + self.run_len < bits {
            flip_nth_bit(&mut self.buf, self.offset + self.run_len, self.profile.bit_order);
        }
        self.offset += 1;

        Some((desc, syndrome))
    }
}
