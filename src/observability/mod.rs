//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! analysis + cache + router produce:
//!     → tracing events (target `jsonpat::*`)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → logging.rs installs a fmt subscriber (optional, host decides)
//!     → any `metrics` recorder installed by the host application
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber or recorder on its own
//! - Per-key events are `trace` level; analysis and cache events are `debug`
//! - Metrics are cheap no-ops when no recorder is installed

pub mod logging;
pub mod metrics;
