//! Map vs value classification for derived impls.
//!
//! The derive cannot see through type aliases or foreign map types, so it
//! leaves the decision to trait resolution. Method lookup on
//! `(&FieldDispatch::<T>)` tries `MapField` (implemented on the dispatcher
//! itself) before `ValueField` (implemented on a reference to it), so any
//! `T: MapSlot` is a map and everything else falls back to a value.
//!
//! Both traits must be in scope at the call site.

use std::cell::Cell;

use super::decl::FieldShape;
use super::slot::{MapSlot, Slot, ValueSlot};

#[doc(hidden)]
pub struct FieldDispatch<'a, T>(Cell<Option<&'a mut T>>);

impl<'a, T> FieldDispatch<'a, T> {
    /// A dispatcher with no field, for shape queries.
    pub fn empty() -> Self {
        Self(Cell::new(None))
    }

    pub fn new(field: &'a mut T) -> Self {
        Self(Cell::new(Some(field)))
    }

    fn take(&self) -> Option<&'a mut T> {
        self.0.take()
    }
}

#[doc(hidden)]
pub trait MapField<'a> {
    fn shape(&self) -> FieldShape;
    fn slot(&self) -> Option<Slot<'a>>;
}

impl<'a, T: MapSlot + 'a> MapField<'a> for FieldDispatch<'a, T> {
    fn shape(&self) -> FieldShape {
        FieldShape::Map
    }

    fn slot(&self) -> Option<Slot<'a>> {
        self.take().map(|field| Slot::Map(field))
    }
}

#[doc(hidden)]
pub trait ValueField<'a> {
    fn shape(&self) -> FieldShape;
    fn slot(&self) -> Option<Slot<'a>>;
}

impl<'a, T: ValueSlot + 'a> ValueField<'a> for &FieldDispatch<'a, T> {
    fn shape(&self) -> FieldShape {
        FieldShape::Value
    }

    fn slot(&self) -> Option<Slot<'a>> {
        self.take().map(|field| Slot::Value(field))
    }
}
