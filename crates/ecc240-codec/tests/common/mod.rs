#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ecc240_core::CRC_BYTES;

/// data[i] = i + start
pub fn counter_frame(len: usize, start: u8) -> Vec<u8> {
    (0..len).map(|i| start.wrapping_add(i as u8)).collect()
}

/// Reproducible random frames
pub fn random_frames(len: usize, count: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut frame = vec![0u8; len];
            rng.fill(&mut frame[..]);
            frame
        })
        .collect()
}

/// Data followed by the big-endian checksum, as transmitted
pub fn to_field(data: &[u8], crc: u16) -> Vec<u8> {
    let mut field = Vec::with_capacity(data.len() + CRC_BYTES);
    field.extend_from_slice(data);
    field.extend_from_slice(&crc.to_be_bytes());
    field
}

/// Splits a received field back into data and checksum
pub fn from_field(field: &[u8]) -> (Vec<u8>, u16) {
    let (data, crc) = field.split_at(field.len() - CRC_BYTES);
    (data.to_vec(), u16::from_be_bytes([crc[0], crc[1]]))
}
