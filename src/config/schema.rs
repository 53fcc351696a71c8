//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for a decoder.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct DecoderConfig {
    /// Structure analysis settings.
    pub analysis: AnalysisConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl DecoderConfig {
    /// Parse a config from TOML text without validating it.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Structure analysis configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Remember analysis failures so a type with malformed tags is not
    /// re-analyzed on every decode.
    pub cache_failures: bool,

    /// Upper bound in bytes for a compiled `regex` rule.
    pub regex_size_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cache_failures: false,
            regex_size_limit: 10 * (1 << 20), // regex crate default
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
