//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (regex size limit > 0)
//! - Validate the log level name
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DecoderConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted by a decoder

use thiserror::Error;

use crate::config::schema::DecoderConfig;

/// Accepted values for `observability.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("analysis.regex_size_limit must be greater than zero")]
    ZeroRegexSizeLimit,

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Validate a config, collecting every error.
pub fn validate_config(config: &DecoderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.analysis.regex_size_limit == 0 {
        errors.push(ValidationError::ZeroRegexSizeLimit);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&DecoderConfig::default()).is_ok());
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let mut config = DecoderConfig::default();
        config.observability.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DecoderConfig::default();
        config.analysis.regex_size_limit = 0;
        config.observability.log_level = "verbose".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroRegexSizeLimit,
                ValidationError::UnknownLogLevel("verbose".into()),
            ]
        );
    }
}
