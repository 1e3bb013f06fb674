use ecc240_codec::run_inverse::ErrorDescriptor;
use ecc240_codec::selftest::{verify_fixed, verify_general};
use ecc240_codec::{FIXED240_PARAMS, GENERAL_PARAMS, QualityFault, ReductionTable, RunInverseTable, SelfTestErr, self_test};
use ecc240_core::ProfileKind;

fn corrupted_run_inverse(edit: impl FnOnce(&mut [u16])) -> RunInverseTable {
    let mut raw = RunInverseTable::fixed240().as_raw().to_vec();
    edit(&mut raw);
    RunInverseTable::from_raw(raw.into_boxed_slice()).unwrap()
}

#[test]
fn test_self_test_passes() {
    assert_eq!(self_test(), Ok(()));
    // Deterministic and repeatable
    assert_eq!(self_test(), Ok(()));
}

#[test]
fn test_self_test_concurrent() {
    let handles: Vec<_> = (0..4).map(|_| std::thread::spawn(self_test)).collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), Ok(()));
    }
}

#[test]
fn test_corrupted_fixed_reduction_table() {
    let mut profile = FIXED240_PARAMS.clone();
    let mut lo = *profile.reduce.lo();
    lo[3] ^= 1;
    profile.reduce = ReductionTable::from_parts(lo, *profile.reduce.hi());

    assert_eq!(
        verify_fixed(&profile, RunInverseTable::fixed240()),
        Err(SelfTestErr::PolynomialQuality {
            profile: ProfileKind::Fixed240,
            fault: QualityFault::TableMismatch { table: 0, index: 3 }
        })
    );
}

#[test]
fn test_corrupted_general_reduction_table() {
    let mut profile = GENERAL_PARAMS.clone();
    let mut hi = *profile.reduce.hi();
    hi[200] ^= 0x8000;
    profile.reduce = ReductionTable::from_parts(*profile.reduce.lo(), hi);

    assert_eq!(
        verify_general(&profile),
        Err(SelfTestErr::PolynomialQuality {
            profile: ProfileKind::General,
            fault: QualityFault::TableMismatch { table: 1, index: 200 }
        })
    );
}

#[test]
fn test_wrong_run_inverse_entry() {
    // Single bit at offset 0 has syndrome 25956
    let table = corrupted_run_inverse(|raw| raw[25956] = ErrorDescriptor { offset: 1, run_len: 1 }.pack());
    assert_eq!(
        verify_fixed(&FIXED240_PARAMS, &table),
        Err(SelfTestErr::Correction { profile: ProfileKind::Fixed240, offset: 0, run_len: 1 })
    );
}

#[test]
fn test_missing_run_inverse_entry() {
    // Three-bit burst at offset 5 has syndrome 23420
    let table = corrupted_run_inverse(|raw| raw[23420] = 0);
    assert_eq!(
        verify_fixed(&FIXED240_PARAMS, &table),
        Err(SelfTestErr::Correction { profile: ProfileKind::Fixed240, offset: 5, run_len: 3 })
    );
}

#[test]
fn test_spurious_run_inverse_entry() {
    let table = corrupted_run_inverse(|raw| {
        let slot = (1..raw.len()).find(|&s| raw[s] == 0).unwrap();
        raw[slot] = ErrorDescriptor { offset: 7, run_len: 3 }.pack();
    });
    assert_eq!(
        verify_fixed(&FIXED240_PARAMS, &table),
        Err(SelfTestErr::Correction { profile: ProfileKind::Fixed240, offset: 7, run_len: 3 })
    );
}

#[test]
fn test_error_display() {
    let e = SelfTestErr::Detection { profile: ProfileKind::Fixed240, offset: 12, run_len: 40 };
    assert_eq!(e.to_string(), "Fixed240: detection guarantee failure for 40 bit burst at offset 12");
}
