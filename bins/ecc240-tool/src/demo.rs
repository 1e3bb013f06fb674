use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ecc240_codec::{CheckOutcome, EccProfile, ErrorDescriptor, get_params};
use ecc240_config::{CfgHarness, FramePattern};
use ecc240_core::CRC_BYTES;
use ecc240_core::bits::flip_run;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DemoReport {
    pub frames: usize,
    pub injected: usize,
    pub failures: usize,
}

/// Builds the configured synthetic frames, injects every burst of 1..=max_run_len bits at
/// every offset of the protected field and requires the profile's corrector to restore
/// each frame exactly.
pub fn run_demo(h: &CfgHarness) -> DemoReport {
    let params = get_params(h.profile);
    let mut rng = StdRng::seed_from_u64(h.seed);
    let mut report = DemoReport::default();

    for frame_idx in 0..h.frames {
        let orig = build_frame(h, frame_idx, &mut rng);
        let crc = match params.generate(&orig) {
            Ok(crc) => crc,
            Err(e) => {
                tracing::error!(profile = ?h.profile, "demo: frame {}: {}", frame_idx, e);
                report.failures += 1;
                continue;
            }
        };
        tracing::info!(profile = ?h.profile, "demo: frame {} {} crc {}", frame_idx, hex::encode(&orig), crc);

        let field_bits = params.field_bits(orig.len());
        for run_len in 1..=h.max_run_len {
            for offset in 0..(field_bits + 1).saturating_sub(run_len) {
                let expected = ErrorDescriptor { offset, run_len };
                if !inject_and_correct(params, &orig, crc, expected) {
                    report.failures += 1;
                }
                report.injected += 1;
            }
        }
        report.frames += 1;
    }
    report
}

fn build_frame(h: &CfgHarness, frame_idx: usize, rng: &mut StdRng) -> Vec<u8> {
    match h.pattern {
        FramePattern::Counter => (0..h.frame_len).map(|i| (i + frame_idx) as u8).collect(),
        FramePattern::Random => {
            let mut frame = vec![0u8; h.frame_len];
            rng.fill(&mut frame[..]);
            frame
        }
    }
}

/// Flips `err` in data || checksum as it would arrive and runs the corrector on it.
fn inject_and_correct(params: &EccProfile, orig: &[u8], crc: u16, err: ErrorDescriptor) -> bool {
    let len = orig.len();
    let mut field = Vec::with_capacity(len + CRC_BYTES);
    field.extend_from_slice(orig);
    field.extend_from_slice(&crc.to_be_bytes());
    flip_run(&mut field, err.offset, err.run_len, params.bit_order);

    let (data, rx_crc) = field.split_at_mut(len);
    let rx_crc = u16::from_be_bytes([rx_crc[0], rx_crc[1]]);

    match params.check_and_correct(data, rx_crc) {
        Ok(CheckOutcome::Corrected(found)) if found == err && *data == *orig => {
            tracing::trace!(profile = ?params.kind, "demo: {:?} corrected", err);
            true
        }
        outcome => {
            tracing::warn!(profile = ?params.kind, "demo: {:?} gave {:?}", err, outcome);
            false
        }
    }
}
