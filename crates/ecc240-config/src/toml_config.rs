use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;

use ecc240_core::ProfileKind;

use super::harness_config::{CfgHarness, FramePattern, HarnessConfig};

const EXPECTED_CONFIG_VERSION: &str = "0.1";

/// Build `HarnessConfig` from a TOML configuration string
pub fn from_toml_str(toml_str: &str) -> Result<HarnessConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    if root.config_version != EXPECTED_CONFIG_VERSION {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, EXPECTED_CONFIG_VERSION
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if let Some(ref h) = root.harness {
        if !h.extra.is_empty() {
            return Err(format!("Unrecognized fields in harness: {:?}", sorted_keys(&h.extra)).into());
        }
    }

    let mut cfg = HarnessConfig {
        debug_log: root.debug_log,
        ..HarnessConfig::default()
    };

    if let Some(h) = root.harness {
        apply_harness_patch(&mut cfg, h);
    }

    cfg.validate()
        .map_err(|e| format!("Invalid harness configuration: {}", e))?;
    Ok(cfg)
}

/// Build `HarnessConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<HarnessConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `HarnessConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<HarnessConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_harness_patch(cfg: &mut HarnessConfig, src: HarnessDto) {
    if let Some(v) = src.self_test_on_start {
        cfg.self_test_on_start = v;
    }

    let dst: &mut CfgHarness = &mut cfg.harness;
    dst.profile = src.profile;
    if let Some(v) = src.frame_len {
        dst.frame_len = v;
    }
    if let Some(v) = src.max_run_len {
        dst.max_run_len = v;
    }
    if let Some(v) = src.pattern {
        dst.pattern = v;
    }
    if let Some(v) = src.seed {
        dst.seed = v;
    }
    if let Some(v) = src.frames {
        dst.frames = v;
    }
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    #[serde(default)]
    harness: Option<HarnessDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct HarnessDto {
    pub profile: ProfileKind,
    pub frame_len: Option<usize>,
    pub max_run_len: Option<usize>,
    pub pattern: Option<FramePattern>,
    pub seed: Option<u64>,
    pub frames: Option<usize>,
    pub self_test_on_start: Option<bool>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}
