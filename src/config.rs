//! YAML configuration for the page behaviors
//!
//! ```yaml
//! log_level: debug
//! swipe:
//!   container_selector: .deck
//!   threshold: 120
//! smooth_scroll:
//!   lerp: 0.1
//! ```

use serde::Deserialize;

use crate::error::Result;
use crate::scroll::SmoothScrollConfig;
use crate::swipe::SwipeConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`
    pub log_level: String,
    pub swipe: SwipeConfig,
    pub smooth_scroll: SmoothScrollConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            swipe: SwipeConfig::default(),
            smooth_scroll: SmoothScrollConfig::default(),
        }
    }
}

impl MotionConfig {
    /// Parse from YAML string; missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}
