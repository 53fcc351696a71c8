//! Field tag grammar.
//!
//! - `#[json("name[,options]")]`: exact key override. `-` ignores the field,
//!   an empty name keeps the declared one, `-,` binds the literal key `-`.
//!   Only a bare `-` ignores; any options after it make `-` a real key name.
//! - `#[jsonpat("value[,mode]")]`: pattern rule. `mode` defaults to `prefix`.

use regex::RegexBuilder;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::routing::matcher::{MatchMode, Rule, UnknownMode};

/// Separator shared by both tags.
pub const TAG_SEPARATOR: char = ',';

/// Interpretation of a `json` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTag<'a> {
    Ignore,
    Declared,
    Rename(&'a str),
}

pub fn parse_name_tag(tag: &str) -> NameTag<'_> {
    let (name, has_options) = match tag.split_once(TAG_SEPARATOR) {
        Some((name, _)) => (name, true),
        None => (tag, false),
    };

    match name {
        "-" if !has_options => NameTag::Ignore,
        "" => NameTag::Declared,
        name => NameTag::Rename(name),
    }
}

/// Parse a `jsonpat` tag into a compiled rule.
///
/// `field` is the qualified field name used in errors.
pub fn parse_pattern_tag(
    field: &str,
    tag: &str,
    config: &AnalysisConfig,
) -> Result<Rule, AnalysisError> {
    let parts: Vec<&str> = tag.split(TAG_SEPARATOR).collect();
    if parts.len() > 2 {
        return Err(AnalysisError::TooManyParts {
            field: field.to_string(),
            parts: parts.len(),
        });
    }

    let value = parts[0];
    if value.is_empty() {
        return Err(AnalysisError::MissingPatternValue {
            field: field.to_string(),
        });
    }

    let mode = match parts.get(1) {
        Some(mode) => mode
            .trim()
            .parse::<MatchMode>()
            .map_err(|UnknownMode(mode)| AnalysisError::UnknownMode {
                field: field.to_string(),
                mode,
            })?,
        None => MatchMode::DEFAULT,
    };

    let rule = match mode {
        MatchMode::Prefix => Rule::Prefix(value.to_string()),
        MatchMode::Contains => Rule::Contains(value.to_string()),
        MatchMode::Suffix => Rule::Suffix(value.to_string()),
        MatchMode::Regex => {
            let re = RegexBuilder::new(value)
                .size_limit(config.regex_size_limit)
                .build()
                .map_err(|source| AnalysisError::InvalidRegex {
                    field: field.to_string(),
                    pattern: value.to_string(),
                    source,
                })?;
            Rule::Regex(re)
        }
    };

    Ok(rule)
}
