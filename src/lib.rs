//! Pattern-routed JSON object decoding.
//!
//! Fields bind to JSON keys by exact name like ordinary serde decoding, and
//! can additionally collect keys that match a prefix, substring, suffix, or
//! regular expression rule declared with `#[jsonpat("value[,mode]")]`.

extern crate self as jsonpat;

pub mod analysis;
pub mod config;
pub mod decoder;
pub mod error;
pub mod observability;
pub mod routing;
pub mod schema;

pub use jsonpat_derive::PatternStruct;
pub use schema::PatternStruct;

pub use analysis::{analyze, MetadataCache};
pub use config::{load_config, AnalysisConfig, ConfigError, DecoderConfig, ObservabilityConfig};
pub use decoder::{decode, default_decoder, Decoder};
pub use error::{AnalysisError, Binding, DecodeError, DecodeResult};
pub use observability::logging::init_logging;
pub use routing::{FieldPath, MatchMode, Rule, RoutingTable};
