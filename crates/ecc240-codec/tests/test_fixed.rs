mod common;

use ecc240_codec::{
    CheckOutcome, ErrorDescriptor, FIXED_FRAME_BYTES, FIXED240_PARAMS, Locator, RunInverseTable,
    check_and_correct_fixed, check_and_correct_with, generate_fixed,
};
use ecc240_core::bits::flip_run;
use ecc240_core::{BitOrder, EccErr, ProfileKind};

use common::{counter_frame, random_frames};

fn to_array(v: &[u8]) -> [u8; FIXED_FRAME_BYTES] {
    let mut a = [0u8; FIXED_FRAME_BYTES];
    a.copy_from_slice(v);
    a
}

/// Injects every burst of 1..=15 bits at every offset and expects each to be undone
fn assert_all_bursts_corrected(orig: [u8; FIXED_FRAME_BYTES]) {
    let crc = generate_fixed(&orig);
    let mut count = 0;
    for run_len in 1..=15 {
        for offset in 0..=240 - run_len {
            let mut frame = orig;
            flip_run(&mut frame, offset, run_len, BitOrder::LsbFirst);
            let outcome = check_and_correct_fixed(&mut frame, crc);
            assert_eq!(
                outcome,
                Ok(CheckOutcome::Corrected(ErrorDescriptor { offset, run_len })),
                "offset {} run_len {}",
                offset,
                run_len
            );
            assert_eq!(frame, orig, "offset {} run_len {}", offset, run_len);
            count += 1;
        }
    }
    assert_eq!(count, 3495);
}

#[test]
fn test_known_answer() {
    assert_eq!(generate_fixed(&to_array(&counter_frame(30, 0))), 2460);
}

#[test]
fn test_all_bursts_counter_frame() {
    assert_all_bursts_corrected(to_array(&counter_frame(30, 0)));
}

#[test]
fn test_all_bursts_random_frames() {
    for frame in random_frames(30, 4, 240) {
        assert_all_bursts_corrected(to_array(&frame));
    }
}

#[test]
fn test_clean_frame_idempotent() {
    for frame in random_frames(30, 10, 5) {
        let orig = to_array(&frame);
        let crc = generate_fixed(&orig);
        let mut frame = orig;
        assert_eq!(check_and_correct_fixed(&mut frame, crc), Ok(CheckOutcome::NoChangeNeeded));
        assert_eq!(check_and_correct_fixed(&mut frame, crc), Ok(CheckOutcome::NoChangeNeeded));
        assert_eq!(frame, orig);
    }
}

#[test]
fn test_checksum_bit_errors_not_corrected() {
    let orig = to_array(&counter_frame(30, 0));
    let crc = generate_fixed(&orig);
    for bit in 0..16 {
        let mut frame = orig;
        let rx_crc = crc ^ (1 << bit);
        assert_eq!(
            check_and_correct_fixed(&mut frame, rx_crc),
            Err(EccErr::Uncorrectable { syndrome: 1 << bit })
        );
        assert_eq!(frame, orig);
    }
}

#[test]
fn test_wrong_length_rejected() {
    let mut frame = vec![0u8; 28];
    assert_eq!(
        FIXED240_PARAMS.check_and_correct(&mut frame, 0),
        Err(EccErr::InvalidFrameLength { profile: ProfileKind::Fixed240, len: 28 })
    );
    assert_eq!(FIXED240_PARAMS.generate(&frame), Err(EccErr::InvalidFrameLength { profile: ProfileKind::Fixed240, len: 28 }));
}

#[test]
fn test_corrupted_table_rejected_by_verification() {
    let orig = to_array(&counter_frame(30, 0));
    let crc = generate_fixed(&orig);
    let mut frame = orig;
    flip_run(&mut frame, 50, 4, BitOrder::LsbFirst);
    let received = frame;
    let syndrome = generate_fixed(&frame) ^ crc;

    // Entry for this syndrome points one bit off
    let mut raw = RunInverseTable::fixed240().as_raw().to_vec();
    raw[syndrome as usize] = ErrorDescriptor { offset: 51, run_len: 4 }.pack();
    let table = RunInverseTable::from_raw(raw.into_boxed_slice()).unwrap();

    let outcome = check_and_correct_with(&FIXED240_PARAMS, Locator::RunInverse(&table), &mut frame, crc);
    assert_eq!(outcome, Err(EccErr::VerificationFailed { syndrome, offset: 51, run_len: 4 }));
    assert_eq!(frame, received);
}

#[test]
fn test_table_entry_outside_frame_rejected() {
    let orig = to_array(&counter_frame(30, 0));
    let crc = generate_fixed(&orig);
    let mut frame = orig;
    flip_run(&mut frame, 0, 1, BitOrder::LsbFirst);
    let received = frame;
    let syndrome = generate_fixed(&frame) ^ crc;

    let mut raw = vec![0u16; 1 << 16];
    raw[syndrome as usize] = ErrorDescriptor { offset: 230, run_len: 15 }.pack();
    let table = RunInverseTable::from_raw(raw.into_boxed_slice()).unwrap();

    let outcome = check_and_correct_with(&FIXED240_PARAMS, Locator::RunInverse(&table), &mut frame, crc);
    assert_eq!(outcome, Err(EccErr::Uncorrectable { syndrome }));
    assert_eq!(frame, received);
}
