//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Once;

use jsonpat::observability::logging::init_logging;
use jsonpat::{ObservabilityConfig, PatternStruct};

#[derive(Debug, Default, Clone, PartialEq, PatternStruct)]
pub struct EmbeddedFields {
    #[json("embedded_field")]
    pub embedded_field: String,
    #[jsonpat("_suffix,suffix")]
    pub dynamic_suffix: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Clone, PartialEq, PatternStruct)]
pub struct Document {
    #[embedded]
    pub embedded: EmbeddedFields,
    #[json("known_field")]
    pub known_field: String,
    #[json("other")]
    pub other_known: i64,
    #[json("-")]
    pub ignored: String,

    #[jsonpat("dyn_,prefix")]
    pub dynamic_prefix: HashMap<String, i64>,
    #[jsonpat("_val_,contains")]
    pub dynamic_contains: HashMap<String, f64>,
    #[jsonpat("^re_.*$,regex")]
    pub dynamic_regex: BTreeMap<String, String>,

    #[jsonpat("scalar_pfx_,prefix")]
    pub scalar_prefix: String,
    #[jsonpat("_scalar_sfx,suffix")]
    pub scalar_suffix: String,
    #[jsonpat("_scalar_cont_,contains")]
    pub scalar_contains: i64,
    #[jsonpat(r"^scalar_re_\d+$,regex")]
    pub scalar_regex: bool,
}

pub const FULL_DOCUMENT: &str = r#"{
    "known_field": "hello",
    "other": 123,
    "ignored": "should not be loaded",
    "embedded_field": "i am embedded",
    "dyn_abc": 1,
    "dyn_xyz": 2,
    "field_val_1": 10.5,
    "field_val_2": 20.75,
    "some_suffix": "test",
    "another_suffix": true,
    "re_a123": "regex-A",
    "re_b456": "regex-B",
    "scalar_pfx_data": "scalar-prefix-val",
    "other_scalar_pfx_field": "not a prefix match",
    "data_scalar_sfx": "scalar-suffix-val",
    "data_scalar_cont_data": 12345,
    "scalar_re_99": true,
    "not_matching": "skip me"
}"#;

static LOGGING: Once = Once::new();

/// Install a subscriber once per test binary; `RUST_LOG` controls output.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = init_logging(&ObservabilityConfig {
            log_level: "warn".to_string(),
        });
    });
}
