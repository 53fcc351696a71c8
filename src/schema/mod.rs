//! Compile-time structure introspection.
//!
//! # Data Flow
//! ```text
//! #[derive(PatternStruct)] on a struct
//!     → decl.rs (StructDecl literal: names, visibility, raw tag text, shape)
//!     → analysis (interprets tags, builds RoutingTable)
//!
//! At decode time:
//!     RoutingTable field path
//!     → PatternStruct::slot(index) per path step
//!     → slot.rs (typed write of a raw JSON value)
//! ```
//!
//! # Design Decisions
//! - The derive never interprets tag grammar; tag text is carried verbatim so
//!   malformed rules surface as analysis errors, not compile errors
//! - Fields are addressed by position only
//! - Map vs value is decided by trait resolution (`dispatch.rs`), not by how
//!   the field type is spelled
//! - A hand-written `PatternStruct` impl is allowed; the router validates
//!   every slot it resolves

pub mod decl;
#[doc(hidden)]
pub mod dispatch;
pub mod slot;

pub use decl::{FieldDecl, FieldShape, StructDecl, StructKind};
pub use slot::{MapSlot, Slot, ValueSlot};

/// A structure that can be the target of a pattern-routed decode.
///
/// Normally implemented with `#[derive(PatternStruct)]`.
pub trait PatternStruct: 'static {
    /// Declared fields of the type, in declaration order.
    fn describe() -> StructDecl
    where
        Self: Sized;

    /// Layout of the instance being decoded into.
    fn kind(&self) -> StructKind;

    /// Writable access to the field at `index`.
    ///
    /// Returns `None` for fields that cannot be written (private or ignored).
    fn slot(&mut self, index: usize) -> Option<Slot<'_>>;
}
