//! Routing tables.
//!
//! # Invariants
//! - `known_fields` keys are unique; registering an existing key replaces its path
//! - A field path appears in at most one of the three tables
//! - Immutable once published by the cache

use std::collections::BTreeMap;
use std::fmt;

use crate::routing::matcher::Rule;

/// Positional address of a (possibly embedded) field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<usize>);

impl FieldPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A new path with `index` appended.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for FieldPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// A pattern-routed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicField {
    pub path: FieldPath,
    pub rule: Rule,
}

/// Complete decode plan for one structure type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    type_name: &'static str,
    known_fields: BTreeMap<String, FieldPath>,
    dynamic_map_fields: Vec<DynamicField>,
    dynamic_scalar_fields: Vec<DynamicField>,
}

impl RoutingTable {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            known_fields: BTreeMap::new(),
            dynamic_map_fields: Vec::new(),
            dynamic_scalar_fields: Vec::new(),
        }
    }

    pub(crate) fn insert_known(&mut self, key: impl Into<String>, path: FieldPath) {
        self.known_fields.insert(key.into(), path);
    }

    pub(crate) fn push_dynamic_map(&mut self, path: FieldPath, rule: Rule) {
        self.dynamic_map_fields.push(DynamicField { path, rule });
    }

    pub(crate) fn push_dynamic_scalar(&mut self, path: FieldPath, rule: Rule) {
        self.dynamic_scalar_fields.push(DynamicField { path, rule });
    }

    /// Name of the type this table was built for.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Path of the field bound to exactly `key`, if any.
    pub fn known_field(&self, key: &str) -> Option<&FieldPath> {
        self.known_fields.get(key)
    }

    /// Exact keys and their paths, in key order.
    pub fn known_fields(&self) -> impl Iterator<Item = (&str, &FieldPath)> {
        self.known_fields.iter().map(|(k, p)| (k.as_str(), p))
    }

    pub fn dynamic_map_fields(&self) -> &[DynamicField] {
        &self.dynamic_map_fields
    }

    pub fn dynamic_scalar_fields(&self) -> &[DynamicField] {
        &self.dynamic_scalar_fields
    }

    /// True when no field uses a pattern rule.
    pub fn is_exact_only(&self) -> bool {
        self.dynamic_map_fields.is_empty() && self.dynamic_scalar_fields.is_empty()
    }
}
