//! ecc240 harness configuration
//!
//! TOML configuration for the test harness: which profile to exercise, the synthetic frames
//! to build and the error patterns to inject into them.

pub mod harness_config;
pub mod toml_config;

pub use harness_config::*;
pub use toml_config::*;
