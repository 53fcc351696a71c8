//! Error definitions.

use std::fmt;

use thiserror::Error;

use crate::routing::matcher::MatchMode;
use crate::routing::table::FieldPath;

/// Errors raised while turning a structure's declarations into a routing table.
///
/// `field` is always qualified as `Type.field`.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// The pattern tag has no value to match against.
    #[error("tag jsonpat on field {field} must have a value and optional match mode")]
    MissingPatternValue { field: String },

    /// The pattern tag has more than `value,mode`.
    #[error("tag jsonpat on field {field} has {parts} comma-separated parts, expected `value[,mode]`")]
    TooManyParts { field: String, parts: usize },

    /// The mode is not one of prefix, contains, suffix, regex.
    #[error("tag jsonpat on field {field} has invalid mode `{mode}`; must be one of {}", MatchMode::NAMES.join(", "))]
    UnknownMode { field: String, mode: String },

    /// The regex source does not compile.
    #[error("tag jsonpat on field {field} has invalid regex `{pattern}`: {source}")]
    InvalidRegex {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An embedded structure cannot itself be pattern routed.
    #[error("embedded field {field} cannot carry a jsonpat rule")]
    EmbeddedPattern { field: String },
}

impl AnalysisError {
    /// The qualified field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            AnalysisError::MissingPatternValue { field }
            | AnalysisError::TooManyParts { field, .. }
            | AnalysisError::UnknownMode { field, .. }
            | AnalysisError::InvalidRegex { field, .. }
            | AnalysisError::EmbeddedPattern { field } => field,
        }
    }
}

/// Which table a key was routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Known,
    DynamicMap,
    DynamicScalar,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Binding::Known => "known",
            Binding::DynamicMap => "dynamic map",
            Binding::DynamicScalar => "dynamic scalar",
        })
    }
}

/// Errors returned by a decode call.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The destination is not a writable named-field structure.
    #[error("invalid decode target {type_name}: {reason}")]
    InvalidTarget {
        type_name: &'static str,
        reason: String,
    },

    /// The target type's tags are malformed.
    #[error("failed to analyze struct {type_name}: {source}")]
    Analysis {
        type_name: &'static str,
        #[source]
        source: AnalysisError,
    },

    /// The input is not a well-formed JSON object.
    #[error("failed to parse JSON object: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// A routed value does not fit its destination type.
    #[error("failed to decode {binding} key `{key}` into field {path}: {source}")]
    FieldDecode {
        key: String,
        path: FieldPath,
        binding: Binding,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::InvalidTarget { .. } => "invalid_target",
            DecodeError::Analysis { .. } => "analysis",
            DecodeError::MalformedInput(_) => "malformed_input",
            DecodeError::FieldDecode { .. } => "field_decode",
        }
    }

    /// The offending JSON key for `FieldDecode` errors.
    pub fn key(&self) -> Option<&str> {
        match self {
            DecodeError::FieldDecode { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
