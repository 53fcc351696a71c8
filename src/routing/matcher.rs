//! Key matching logic.
//!
//! # Responsibilities
//! - Represent a pattern rule (mode + pattern)
//! - Decide whether a JSON key satisfies a rule
//!
//! # Design Decisions
//! - Rule is a closed enum, switched over explicitly
//! - Regex rules own their compiled expression; compilation happens once
//!   during analysis, never on the decode path
//! - Regex matching is unanchored; the pattern controls anchoring with `^`/`$`
//! - Matching is case-sensitive for every mode

use std::fmt;
use std::str::FromStr;

use regex::Regex;

/// Matching mode named in a pattern tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    Prefix,
    Contains,
    Suffix,
    Regex,
}

impl MatchMode {
    /// Mode used when a tag omits one.
    pub const DEFAULT: MatchMode = MatchMode::Prefix;

    /// All accepted mode names, in documentation order.
    pub const NAMES: [&'static str; 4] = ["prefix", "contains", "suffix", "regex"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Prefix => "prefix",
            MatchMode::Contains => "contains",
            MatchMode::Suffix => "suffix",
            MatchMode::Regex => "regex",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl FromStr for MatchMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefix" => Ok(MatchMode::Prefix),
            "contains" => Ok(MatchMode::Contains),
            "suffix" => Ok(MatchMode::Suffix),
            "regex" => Ok(MatchMode::Regex),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// A compiled matching rule.
#[derive(Debug, Clone)]
pub enum Rule {
    Prefix(String),
    Contains(String),
    Suffix(String),
    Regex(Regex),
}

impl Rule {
    pub fn mode(&self) -> MatchMode {
        match self {
            Rule::Prefix(_) => MatchMode::Prefix,
            Rule::Contains(_) => MatchMode::Contains,
            Rule::Suffix(_) => MatchMode::Suffix,
            Rule::Regex(_) => MatchMode::Regex,
        }
    }

    /// The pattern text (regex source for regex rules).
    pub fn pattern(&self) -> &str {
        match self {
            Rule::Prefix(p) | Rule::Contains(p) | Rule::Suffix(p) => p,
            Rule::Regex(re) => re.as_str(),
        }
    }

    /// Returns true if `key` satisfies this rule.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Rule::Prefix(p) => key.starts_with(p.as_str()),
            Rule::Contains(p) => key.contains(p.as_str()),
            Rule::Suffix(p) => key.ends_with(p.as_str()),
            Rule::Regex(re) => re.is_match(key),
        }
    }
}

// Two rules are equal when they would be built from the same tag.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.mode() == other.mode() && self.pattern() == other.pattern()
    }
}

impl Eq for Rule {}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.pattern(), self.mode())
    }
}

/// Returns true if `key` satisfies `rule`.
pub fn matches(key: &str, rule: &Rule) -> bool {
    rule.matches(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_rule() {
        let rule = Rule::Prefix("dyn_".into());
        assert!(rule.matches("dyn_abc"));
        assert!(rule.matches("dyn_"));
        assert!(!rule.matches("xdyn_abc"));
        assert!(!rule.matches("DYN_abc")); // Case sensitive
    }

    #[test]
    fn test_contains_rule() {
        let rule = Rule::Contains("_val_".into());
        assert!(rule.matches("field_val_1"));
        assert!(rule.matches("_val_"));
        assert!(!rule.matches("field_val"));
    }

    #[test]
    fn test_suffix_rule() {
        let rule = Rule::Suffix("_id".into());
        assert!(rule.matches("user_id"));
        assert!(!rule.matches("user_id_2"));
    }

    #[test]
    fn test_regex_rule_is_unanchored() {
        let anchored = Rule::Regex(Regex::new(r"^scalar_re_\d+$").unwrap());
        assert!(anchored.matches("scalar_re_99"));
        assert!(!anchored.matches("x_scalar_re_99"));
        assert!(!anchored.matches("scalar_re_99x"));

        let loose = Rule::Regex(Regex::new(r"re_\d").unwrap());
        assert!(loose.matches("pre_1_post"));
        assert!(matches("pre_1_post", &loose));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        assert!(Rule::Prefix(String::new()).matches("anything"));
        assert!(Rule::Suffix(String::new()).matches(""));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("prefix".parse::<MatchMode>(), Ok(MatchMode::Prefix));
        assert_eq!("regex".parse::<MatchMode>(), Ok(MatchMode::Regex));
        assert_eq!(
            "Prefix".parse::<MatchMode>(),
            Err(UnknownMode("Prefix".into()))
        );
        for name in MatchMode::NAMES {
            assert_eq!(name.parse::<MatchMode>().unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_rule_equality_ignores_regex_identity() {
        let a = Rule::Regex(Regex::new("^re_").unwrap());
        let b = Rule::Regex(Regex::new("^re_").unwrap());
        assert_eq!(a, b);
        assert_ne!(a, Rule::Prefix("^re_".into()));
        assert_eq!(a.to_string(), "^re_,regex");
    }
}
