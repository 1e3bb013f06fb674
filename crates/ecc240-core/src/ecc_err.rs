use core::fmt;

use crate::ProfileKind;

/// Failure outcomes of generating or checking a frame.
/// A clean frame and a successful correction are not errors; see `CheckOutcome` in the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EccErr {
    /// Frame length is odd, empty, too long, or not the profile's fixed length.
    /// Caller contract violation; the frame was not looked at.
    InvalidFrameLength { profile: ProfileKind, len: usize },
    /// Nonzero syndrome with no known error pattern within the correction bound.
    /// The frame is left untouched and must be rejected.
    Uncorrectable { syndrome: u16 },
    /// A correction was located but the corrected frame still fails the checksum.
    /// The error pattern lies outside the guaranteed bound. The frame is left untouched.
    VerificationFailed { syndrome: u16, offset: usize, run_len: usize },
}

impl fmt::Display for EccErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EccErr::InvalidFrameLength { profile, len } => {
                write!(f, "invalid frame length {} for profile {}", len, profile)
            }
            EccErr::Uncorrectable { syndrome } => {
                write!(f, "uncorrectable error pattern (syndrome {:#06x})", syndrome)
            }
            EccErr::VerificationFailed { syndrome, offset, run_len } => write!(
                f,
                "verification failed after correcting {} bit(s) at offset {} (syndrome {:#06x})",
                run_len, offset, syndrome
            ),
        }
    }
}

impl std::error::Error for EccErr {}
