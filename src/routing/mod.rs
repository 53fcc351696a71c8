//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Parsed JSON object (key → raw value, ascending key order)
//!     → router.rs (classify each key)
//!     → table.rs (known key lookup, dynamic field lists)
//!     → matcher.rs (evaluate pattern rules)
//!     → Slot write on the target struct
//!
//! Table construction (once per type, see `analysis`):
//!     StructDecl
//!     → Compile rules (regex precompiled)
//!     → Freeze as immutable RoutingTable
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once published
//! - Exact keys always win over pattern rules
//! - Deterministic: same input always routes the same way
//! - Scalar fields take the first match in sorted key order

pub mod matcher;
pub mod router;
pub mod table;

pub use matcher::{MatchMode, Rule};
pub use table::{DynamicField, FieldPath, RoutingTable};
