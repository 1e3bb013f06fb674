use core::fmt;
use std::sync::OnceLock;

use crate::burst::BurstSweep;
use crate::profile::{EccProfile, FIXED240_PARAMS};
use crate::syndrome_set::SyndromeSet;

pub const RUN_INVERSE_ENTRIES: usize = 1 << 16;

/// A contiguous run of flipped bits: `run_len` bits starting at bit `offset` of the
/// protected field, numbered in the profile's bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDescriptor {
    pub offset: usize,
    pub run_len: usize,
}

impl ErrorDescriptor {
    /// Packs as `offset * 32 + run_len`. Requires run_len in 1..=31 and offset < 2048.
    pub const fn pack(self) -> u16 {
        (self.offset * 32 + self.run_len) as u16
    }

    /// Packed 0 (and any value with run length 0) means no known correction.
    pub const fn unpack(packed: u16) -> Option<Self> {
        let run_len = (packed % 32) as usize;
        if run_len == 0 {
            return None;
        }
        Some(Self { offset: (packed / 32) as usize, run_len })
    }
}

/// Maps every syndrome to the unique burst of 1..=max_burst_len bits producing it, packed
/// as an `ErrorDescriptor`, or to 0 if no burst within the bound (or more than one) does.
#[derive(Clone)]
pub struct RunInverseTable {
    entries: Box<[u16]>,
}

impl RunInverseTable {
    /// Enumerates every burst over a `max_bytes` frame of `profile`.
    /// Syndromes reached by two different bursts are left at 0: ambiguous means uncorrectable.
    pub fn build(profile: &EccProfile) -> Self {
        let mut entries = vec![0u16; RUN_INVERSE_ENTRIES].into_boxed_slice();
        let mut ambiguous = SyndromeSet::new();

        for run_len in 1..=profile.max_burst_len {
            for (desc, syndrome) in BurstSweep::new(profile, profile.max_bytes, run_len) {
                if syndrome == 0 || ambiguous.contains(syndrome) {
                    continue;
                }
                let slot = &mut entries[syndrome as usize];
                if *slot != 0 {
                    tracing::warn!(
                        profile = ?profile.kind,
                        "run-inverse: syndrome {:#06x} shared by {:?} and {:?}, dropping",
                        syndrome,
                        ErrorDescriptor::unpack(*slot),
                        desc
                    );
                    *slot = 0;
                    ambiguous.insert(syndrome);
                    continue;
                }
                *slot = desc.pack();
            }
        }

        let table = Self { entries };
        tracing::debug!(profile = ?profile.kind, "run-inverse: built, {} correctable syndromes", table.populated());
        table
    }

    /// The table for the fixed 240-bit profile, built on first use
    pub fn fixed240() -> &'static Self {
        static TABLE: OnceLock<RunInverseTable> = OnceLock::new();
        TABLE.get_or_init(|| Self::build(&FIXED240_PARAMS))
    }

    /// Wraps raw packed entries. Returns None unless there is exactly one entry per syndrome.
    pub fn from_raw(entries: Box<[u16]>) -> Option<Self> {
        if entries.len() != RUN_INVERSE_ENTRIES {
            return None;
        }
        Some(Self { entries })
    }

    pub fn as_raw(&self) -> &[u16] {
        &self.entries
    }

    #[inline]
    pub fn lookup(&self, syndrome: u16) -> Option<ErrorDescriptor> {
        ErrorDescriptor::unpack(self.entries[syndrome as usize])
    }

    /// Number of syndromes with a known correction
    pub fn populated(&self) -> usize {
        self.entries.iter().filter(|&&e| e != 0).count()
    }
}

impl fmt::Debug for RunInverseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunInverseTable").field("populated", &self.populated()).finish()
    }
}
