//! Error-correcting CRC16 for short frames
//!
//! A 16-bit CRC whose generator polynomial is chosen so that, besides detecting errors, the
//! syndrome (recomputed checksum XOR received checksum) identifies small error patterns:
//! - General profile: any even frame length up to 30 bytes, one flipped bit anywhere in the
//!   data or checksum, located by running the CRC register backwards
//! - Fixed240 profile: 30-byte frames, any burst of 1 to 15 flipped bits, located by a
//!   precomputed syndrome table
//!
//! The self-test exhaustively proves both profiles' guarantees over every error pattern.

pub mod burst;
pub mod correct;
pub mod crc16;
pub mod gf2;
pub mod profile;
pub mod reduce;
pub mod run_inverse;
pub mod selftest;
pub mod syndrome_set;

// Re-export commonly used items
pub use correct::{CheckOutcome, Locator, check_and_correct, check_and_correct_fixed, check_and_correct_with};
pub use crc16::{generate, generate_fixed};
pub use profile::{EccProfile, FIXED_FRAME_BYTES, FIXED240_PARAMS, GENERAL_PARAMS, get_params};
pub use reduce::ReductionTable;
pub use run_inverse::{ErrorDescriptor, RunInverseTable};
pub use selftest::{QualityFault, SelfTestErr, self_test};
