//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DecoderConfig (validated, immutable)
//!     → Decoder::new (owns its cache + analysis options)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a decoder is built; a new config means a new decoder
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AnalysisConfig, DecoderConfig, ObservabilityConfig};
