//! Page controller configuration.
//!
//! Resolved once at startup and handed to [`PageController`](crate::PageController);
//! handlers never read the environment themselves.

use crate::constants::REVEAL_THRESHOLD;

pub const REVEAL_THRESHOLD_VAR: &str = "FINDTHEM_REVEAL_THRESHOLD";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid reveal threshold {0:?}: expected a number between 0 and 1")]
    InvalidRevealThreshold(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Page configuration resolved at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    reveal_threshold: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: REVEAL_THRESHOLD,
        }
    }
}

impl PageConfig {
    /// Create a new `PageConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRevealThreshold` if the threshold is not
    /// within `0.0..=1.0`.
    pub fn new(reveal_threshold: f64) -> ConfigResult<Self> {
        if !(0.0..=1.0).contains(&reveal_threshold) {
            return Err(ConfigError::InvalidRevealThreshold(
                reveal_threshold.to_string(),
            ));
        }
        Ok(Self { reveal_threshold })
    }

    pub fn reveal_threshold(&self) -> f64 {
        self.reveal_threshold
    }
}

/// Parse the reveal threshold from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns the default threshold.
pub fn reveal_threshold_from_env_value(value: Option<String>) -> ConfigResult<f64> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(REVEAL_THRESHOLD),
        Some(v) => v
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidRevealThreshold(v.clone())),
    }
}
