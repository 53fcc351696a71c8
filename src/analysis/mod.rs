//! Structure analysis subsystem.
//!
//! # Data Flow
//! ```text
//! StructDecl (from #[derive(PatternStruct)])
//!     → tag.rs (interpret json / jsonpat tag text)
//!     → analyzer.rs (depth-first walk, flatten embedded structs)
//!     → RoutingTable (immutable)
//!     → cache.rs (publish once per type, share via Arc)
//! ```
//!
//! # Design Decisions
//! - Analysis is a pure function of the type's declarations
//! - Regex rules are compiled here so bad patterns fail before any key is decoded
//! - Concurrent first lookups may analyze twice; only one result is published

pub mod analyzer;
pub mod cache;
pub mod tag;

pub use analyzer::{analyze, analyze_decl};
pub use cache::MetadataCache;
