//! Field declarations emitted by the derive.

/// Layout of a structure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    /// `struct S { a: T }`
    Named,
    /// `struct S(T);`
    Tuple,
    /// `struct S;`
    Unit,
}

/// How a field is written at decode time.
#[derive(Debug, Clone, Copy)]
pub enum FieldShape {
    /// Any value decoded wholesale from one raw JSON value.
    Value,
    /// A string-keyed map (`HashMap<String, V>`, `BTreeMap<String, V>`, or an
    /// `Option` of either).
    Map,
    /// An embedded structure whose fields are flattened into the parent.
    Embedded(fn() -> StructDecl),
}

impl FieldShape {
    pub fn is_map(&self) -> bool {
        matches!(self, FieldShape::Map)
    }
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Declared identifier (tuple fields use their position).
    pub name: &'static str,
    /// False for private fields; those are never routed.
    pub exported: bool,
    /// Raw text of `#[json("...")]`.
    pub json_tag: Option<&'static str>,
    /// Raw text of `#[jsonpat("...")]`.
    pub pattern_tag: Option<&'static str>,
    pub shape: FieldShape,
}

impl FieldDecl {
    /// An exported, untagged value field.
    pub fn value(name: &'static str) -> Self {
        Self {
            name,
            exported: true,
            json_tag: None,
            pattern_tag: None,
            shape: FieldShape::Value,
        }
    }

    pub fn with_json_tag(mut self, tag: &'static str) -> Self {
        self.json_tag = Some(tag);
        self
    }

    pub fn with_pattern_tag(mut self, tag: &'static str) -> Self {
        self.pattern_tag = Some(tag);
        self
    }

    pub fn with_shape(mut self, shape: FieldShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }
}

/// The declared field set of one structure type.
#[derive(Debug, Clone)]
pub struct StructDecl {
    /// Type name used in diagnostics.
    pub name: &'static str,
    pub kind: StructKind,
    pub fields: Vec<FieldDecl>,
}

impl StructDecl {
    pub fn named(name: &'static str, fields: Vec<FieldDecl>) -> Self {
        Self {
            name,
            kind: StructKind::Named,
            fields,
        }
    }
}
