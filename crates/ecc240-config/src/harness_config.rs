use serde::Deserialize;

use ecc240_codec::get_params;
use ecc240_core::ProfileKind;

/// How the data bytes of each synthetic frame are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum FramePattern {
    /// data[i] = i, the known-answer frame
    Counter,
    /// Seeded random bytes, a fresh frame per iteration
    Random,
}

#[derive(Debug, Clone)]
pub struct CfgHarness {
    pub profile: ProfileKind,
    /// Frame length in bytes
    pub frame_len: usize,
    /// Every burst of 1..=max_run_len bits is injected at every offset
    pub max_run_len: usize,
    pub pattern: FramePattern,
    pub seed: u64,
    pub frames: usize,
}

impl Default for CfgHarness {
    fn default() -> Self {
        Self {
            profile: ProfileKind::General,
            frame_len: default_frame_len(),
            max_run_len: 1,
            pattern: FramePattern::Counter,
            seed: default_seed(),
            frames: 1,
        }
    }
}

#[inline]
fn default_frame_len() -> usize {
    30
}

#[inline]
fn default_seed() -> u64 {
    1
}

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub debug_log: Option<String>,
    pub self_test_on_start: bool,
    pub harness: CfgHarness,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            debug_log: None,
            self_test_on_start: true,
            harness: CfgHarness::default(),
        }
    }
}

impl HarnessConfig {
    /// Validate the harness settings against the selected profile's geometry.
    pub fn validate(&self) -> Result<(), &'static str> {
        let h = &self.harness;
        let params = get_params(h.profile);

        if params.check_len(h.frame_len).is_err() {
            return Err("frame_len must be even and within the profile's frame length range");
        }
        if h.max_run_len == 0 {
            return Err("max_run_len must be at least 1");
        }
        if h.max_run_len > params.max_burst_len {
            return Err("max_run_len exceeds the longest burst the profile corrects");
        }
        if h.frames == 0 {
            return Err("frames must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(HarnessConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_geometry() {
        let mut cfg = HarnessConfig::default();
        cfg.harness.frame_len = 7;
        assert!(cfg.validate().is_err());

        cfg.harness.frame_len = 30;
        cfg.harness.max_run_len = 2;
        assert!(cfg.validate().is_err(), "general profile corrects single bits only");

        cfg.harness.profile = ProfileKind::Fixed240;
        cfg.harness.max_run_len = 15;
        assert_eq!(cfg.validate(), Ok(()));

        cfg.harness.frame_len = 28;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_counts() {
        let mut cfg = HarnessConfig::default();
        cfg.harness.frames = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = HarnessConfig::default();
        cfg.harness.max_run_len = 0;
        assert!(cfg.validate().is_err());
    }
}
