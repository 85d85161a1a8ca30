use pawmatch_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default number of candidates shown to the adopter
pub const DEFAULT_DISPLAY_COUNT: usize = 5;

/// How the final pool is cut down to the display count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// First rows in dataset order
    #[default]
    Head,
    /// Uniform sample without replacement, returned in dataset order
    Sample,
}

/// Configuration for candidate selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendConfig {
    pub display_count: usize,
    #[serde(default)]
    pub mode: DisplayMode,
    /// Fixed seed for sampling; every request draws the same sample
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            display_count: DEFAULT_DISPLAY_COUNT,
            mode: DisplayMode::Head,
            seed: None,
        }
    }
}

impl RecommendConfig {
    pub fn validate(&self) -> Result<()> {
        if self.display_count == 0 {
            return Err(Error::InvalidConfig("display_count must be at least 1".to_string()));
        }
        Ok(())
    }
}
