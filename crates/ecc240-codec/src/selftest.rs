//! Exhaustive verification of the compiled-in profiles.
//!
//! The general profile must locate a single flipped bit anywhere in the largest frame plus
//! its checksum. The fixed profile must be a maximal-period generator, detect every burst of
//! 1..=240 bits, and map every burst of 1..=15 bits back to itself through its run-inverse
//! table. A failure here means the polynomial or a table is wrong and the engine must not
//! be used.

use core::fmt;

use ecc240_core::bits::flip_nth_bit;
use ecc240_core::{CRC_BYTES, MAX_FRAME_BYTES, ProfileKind};

use crate::burst::BurstSweep;
use crate::correct::locate_single_bit;
use crate::gf2;
use crate::profile::{EccProfile, FIXED240_PARAMS, GENERAL_PARAMS};
use crate::run_inverse::RunInverseTable;
use crate::syndrome_set::SyndromeSet;

/// Number of nonzero 16-bit states
const FULL_PERIOD: usize = (1 << 16) - 1;

/// What was wrong with a profile's polynomial or reduction table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityFault {
    /// Reduction table entry (table 0 = low byte, 1 = high byte) disagrees with the polynomial
    TableMismatch { table: usize, index: usize },
    KnownAnswer { expected: u16, found: u16 },
    /// The LFSR returned to its seed after `period` steps instead of 65535
    ShortPeriod { period: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTestErr {
    PolynomialQuality { profile: ProfileKind, fault: QualityFault },
    /// A burst was undetected (zero syndrome) or collided with another burst of the same length
    Detection { profile: ProfileKind, offset: usize, run_len: usize },
    /// A correctable error pattern does not map back to itself, or the table holds an entry
    /// no such pattern produces
    Correction { profile: ProfileKind, offset: usize, run_len: usize },
}

impl fmt::Display for SelfTestErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelfTestErr::PolynomialQuality { profile, fault } => {
                write!(f, "{}: polynomial quality failure: {:?}", profile, fault)
            }
            SelfTestErr::Detection { profile, offset, run_len } => write!(
                f,
                "{}: detection guarantee failure for {} bit burst at offset {}",
                profile, run_len, offset
            ),
            SelfTestErr::Correction { profile, offset, run_len } => write!(
                f,
                "{}: correction guarantee failure for {} bit burst at offset {}",
                profile, run_len, offset
            ),
        }
    }
}

impl std::error::Error for SelfTestErr {}

/// Runs every check over both compiled-in profiles. Fails fast on the first violation.
pub fn self_test() -> Result<(), SelfTestErr> {
    let result = verify_general(&GENERAL_PARAMS)
        .and_then(|_| verify_fixed(&FIXED240_PARAMS, RunInverseTable::fixed240()));
    match &result {
        Ok(()) => tracing::info!("self-test: pass"),
        Err(e) => tracing::error!("self-test: {}", e),
    }
    result
}

/// General profile: tables, known answer, and single-bit location over every bit of the
/// largest frame and its checksum.
pub fn verify_general(profile: &EccProfile) -> Result<(), SelfTestErr> {
    check_table(profile)?;
    check_known_answer(profile)?;
    check_single_bits(profile)?;
    tracing::debug!(profile = ?profile.kind, "self-test: single-bit location ok");
    Ok(())
}

/// Fixed profile: tables, known answer, maximal period, burst detection and burst correction.
pub fn verify_fixed(profile: &EccProfile, table: &RunInverseTable) -> Result<(), SelfTestErr> {
    check_table(profile)?;
    check_known_answer(profile)?;
    check_max_period(profile)?;

    // One marker set for both passes, dropped on return
    let mut seen = SyndromeSet::new();
    check_detection(profile, &mut seen)?;
    check_correction(profile, table, &mut seen)?;
    tracing::debug!(profile = ?profile.kind, "self-test: burst detection and correction ok");
    Ok(())
}

fn quality(profile: &EccProfile, fault: QualityFault) -> SelfTestErr {
    SelfTestErr::PolynomialQuality { profile: profile.kind, fault }
}

fn check_table(profile: &EccProfile) -> Result<(), SelfTestErr> {
    match profile.reduce.first_mismatch(profile.poly) {
        Some((table, index)) => Err(quality(profile, QualityFault::TableMismatch { table, index })),
        None => Ok(()),
    }
}

fn check_known_answer(profile: &EccProfile) -> Result<(), SelfTestErr> {
    let found = profile.generate_unchecked(&profile.known_answer_frame());
    if found != profile.known_answer {
        return Err(quality(profile, QualityFault::KnownAnswer { expected: profile.known_answer, found }));
    }
    Ok(())
}

/// LFSR seeded with 1 must come back to 1 after exactly 65535 steps, visiting every
/// nonzero state once. Then x generates the whole multiplicative group.
fn check_max_period(profile: &EccProfile) -> Result<(), SelfTestErr> {
    let mut visited = SyndromeSet::new();
    let mut state: u16 = 1;
    visited.insert(state);
    for step in 1..=FULL_PERIOD {
        state = gf2::mul_x(profile.poly, state);
        if state == 1 {
            if step == FULL_PERIOD && visited.len() == FULL_PERIOD {
                return Ok(());
            }
            return Err(quality(profile, QualityFault::ShortPeriod { period: step }));
        }
        // Entered a cycle that does not pass through the seed
        if !visited.insert(state) {
            return Err(quality(profile, QualityFault::ShortPeriod { period: step }));
        }
    }
    Err(quality(profile, QualityFault::ShortPeriod { period: visited.len() }))
}

/// Every bit of the largest field, flipped alone on a zero frame, must be located back.
fn check_single_bits(profile: &EccProfile) -> Result<(), SelfTestErr> {
    let len = profile.max_bytes;
    let field_bits = profile.field_bits(len);
    for pos in 0..field_bits {
        let mut field = [0u8; MAX_FRAME_BYTES + CRC_BYTES];
        flip_nth_bit(&mut field, pos, profile.bit_order);
        let crc = u16::from_be_bytes([field[len], field[len + 1]]);
        let syndrome = profile.generate_unchecked(&field[..len]) ^ crc;

        if locate_single_bit(profile.poly, syndrome, field_bits) != Some(pos) {
            return Err(SelfTestErr::Correction { profile: profile.kind, offset: pos, run_len: 1 });
        }
    }
    Ok(())
}

/// For each run length, every window position must give a nonzero syndrome not given by
/// another window of that length. The marker set starts over for each run length.
fn check_detection(profile: &EccProfile, seen: &mut SyndromeSet) -> Result<(), SelfTestErr> {
    let len = profile.max_bytes;
    for run_len in 1..=8 * len {
        seen.clear();
        for (desc, syndrome) in BurstSweep::new(profile, len, run_len) {
            if syndrome == 0 || !seen.insert(syndrome) {
                return Err(SelfTestErr::Detection { profile: profile.kind, offset: desc.offset, run_len });
            }
        }
    }
    Ok(())
}

/// Over all run lengths 1..=max_burst_len together, syndromes must be pairwise distinct and
/// the table must return each burst for its own syndrome. Afterwards every table entry not
/// produced by some burst must be empty.
fn check_correction(profile: &EccProfile, table: &RunInverseTable, seen: &mut SyndromeSet) -> Result<(), SelfTestErr> {
    let len = profile.max_bytes;
    seen.clear();
    for run_len in 1..=profile.max_burst_len {
        for (desc, syndrome) in BurstSweep::new(profile, len, run_len) {
            if syndrome == 0 || !seen.insert(syndrome) || table.lookup(syndrome) != Some(desc) {
                return Err(SelfTestErr::Correction { profile: profile.kind, offset: desc.offset, run_len });
            }
        }
    }

    for (syndrome, &packed) in table.as_raw().iter().enumerate() {
        if packed != 0 && !seen.contains(syndrome as u16) {
            return Err(SelfTestErr::Correction {
                profile: profile.kind,
                offset: (packed / 32) as usize,
                run_len: (packed % 32) as usize,
            });
        }
    }
    Ok(())
}
