//! Core utilities for the ECC240 error-correcting CRC16
//!
//! This crate provides the vocabulary shared by the codec, the config loader and the tools:
//! - Bit addressing helpers for byte buffers (MSB-first and LSB-first numbering)
//! - ProfileKind, selecting one of the compiled-in polynomial/frame-length profiles
//! - EccErr, the error taxonomy of the check-and-correct operations
//! - Logging setup and debug utilities

pub mod bits;
pub mod debug;
pub mod ecc_err;
pub mod profile_kind;

// Re-export commonly used items
pub use bits::BitOrder;
pub use ecc_err::EccErr;
pub use profile_kind::ProfileKind;

/// Number of bytes in a CRC16 checksum as it travels after the data
pub const CRC_BYTES: usize = 2;

/// Largest frame, in bytes, any profile accepts
pub const MAX_FRAME_BYTES: usize = 30;
