//! Per-entity static field registry.
//!
//! The registry is the whitelist that makes the untyped search surface safe:
//! only registered logical names can ever reach the criterion factory, and
//! only names registered as sortable pass sort validation. It is built once
//! at startup through [`FieldRegistryBuilder`] and is immutable afterwards,
//! so it can be shared by reference across concurrent request handlers with
//! no locking.
//!
//! Misregistration (an enum kind without an enum spec, a multi-column kind
//! with fewer than two paths, a duplicate name) is a programming error in the
//! service embedding the engine and panics at construction time; it is never
//! surfaced as a request-time error.

use std::collections::HashMap;

use crate::path::ColumnPath;
use crate::value::EnumSpec;

/// Tag for the search behaviour of a registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// Exact, case-sensitive equality on a text column. Supports `!` negation.
    Text,
    /// Case-insensitive substring match on a text column.
    FuzzyText,
    /// Membership in a list of text values. Supports `!` negation.
    MultiText,
    /// Whitespace-split terms, each substring-matched on one column, combined
    /// with the caller-supplied AND/OR operator.
    MultiFuzzyText,
    /// Whitespace-split terms, each substring-matched across several columns;
    /// every term must match at least one column.
    MultiColumnFuzzyText,
    /// Equality against a resolved enum constant. Supports `!` negation.
    Enum,
    /// Membership in a list of resolved enum constants. Supports `!` negation.
    MultiEnum,
    /// Equality on an integer column. Supports `!` negation.
    Numeric,
    /// Equality on a boolean column.
    Boolean,
    /// Inclusive range on a date-time column; either side may be open.
    DateRange,
}

impl SearchKind {
    pub fn is_enum(self) -> bool {
        matches!(self, Self::Enum | Self::MultiEnum)
    }

    pub fn is_multi_column(self) -> bool {
        matches!(self, Self::MultiColumnFuzzyText)
    }
}

/// Static registry entry for one logical field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    logical_name: String,
    column_paths: Vec<ColumnPath>,
    kind: SearchKind,
    enum_spec: Option<EnumSpec>,
    sortable: bool,
}

impl FieldDescriptor {
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    /// The single column path of a single-column kind. Multi-column kinds
    /// also expose their first path here; sorting uses it as the sort key.
    pub fn path(&self) -> &ColumnPath {
        &self.column_paths[0]
    }

    pub fn paths(&self) -> &[ColumnPath] {
        &self.column_paths
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn enum_spec(&self) -> Option<EnumSpec> {
        self.enum_spec
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }
}

/// Immutable logical-name → descriptor map for one entity type.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: HashMap<String, FieldDescriptor>,
}

impl FieldRegistry {
    pub fn builder() -> FieldRegistryBuilder {
        FieldRegistryBuilder::default()
    }

    /// Look up a logical field name. `None` is not an error: callers
    /// routinely submit a superset of the filters an entity supports, and the
    /// factory skips unresolved names.
    pub fn resolve(&self, logical_name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(logical_name)
    }

    /// True only for registered fields whose `sortable` flag is set.
    pub fn is_sortable(&self, logical_name: &str) -> bool {
        self.fields
            .get(logical_name)
            .is_some_and(FieldDescriptor::is_sortable)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All registered logical names, unordered.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The sortable subset of [`Self::field_names`], unordered.
    pub fn sortable_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .values()
            .filter(|d| d.sortable)
            .map(|d| d.logical_name.as_str())
    }
}

/// Builder consumed into a frozen [`FieldRegistry`].
///
/// All registration methods panic on misconfiguration; see the module docs.
#[derive(Debug, Default)]
pub struct FieldRegistryBuilder {
    fields: HashMap<String, FieldDescriptor>,
}

impl FieldRegistryBuilder {
    /// Register a single-column, non-enum field.
    pub fn field(
        self,
        logical_name: impl Into<String>,
        column_path: &str,
        kind: SearchKind,
        sortable: bool,
    ) -> Self {
        assert!(
            !kind.is_enum(),
            "enum kinds must be registered through enum_field"
        );
        assert!(
            !kind.is_multi_column(),
            "multi-column kinds must be registered through multi_column_field"
        );
        self.insert(
            logical_name.into(),
            vec![ColumnPath::parse(column_path)],
            kind,
            None,
            sortable,
        )
    }

    /// Register an `Enum` or `MultiEnum` field with its literal resolver.
    pub fn enum_field(
        self,
        logical_name: impl Into<String>,
        column_path: &str,
        kind: SearchKind,
        enum_spec: EnumSpec,
        sortable: bool,
    ) -> Self {
        assert!(
            kind.is_enum(),
            "enum_field requires SearchKind::Enum or SearchKind::MultiEnum"
        );
        self.insert(
            logical_name.into(),
            vec![ColumnPath::parse(column_path)],
            kind,
            Some(enum_spec),
            sortable,
        )
    }

    /// Register a `MultiColumnFuzzyText` field spanning two or more columns.
    pub fn multi_column_field<'a>(
        self,
        logical_name: impl Into<String>,
        column_paths: impl IntoIterator<Item = &'a str>,
        sortable: bool,
    ) -> Self {
        let paths: Vec<ColumnPath> = column_paths.into_iter().map(ColumnPath::parse).collect();
        assert!(
            paths.len() >= 2,
            "multi-column fuzzy fields require at least two column paths"
        );
        self.insert(
            logical_name.into(),
            paths,
            SearchKind::MultiColumnFuzzyText,
            None,
            sortable,
        )
    }

    fn insert(
        mut self,
        logical_name: String,
        column_paths: Vec<ColumnPath>,
        kind: SearchKind,
        enum_spec: Option<EnumSpec>,
        sortable: bool,
    ) -> Self {
        assert!(
            column_paths.iter().all(|p| !p.is_empty()),
            "field {logical_name:?}: column path must not be blank"
        );
        assert!(
            !self.fields.contains_key(&logical_name),
            "field {logical_name:?} registered twice"
        );
        self.fields.insert(
            logical_name.clone(),
            FieldDescriptor {
                logical_name,
                column_paths,
                kind,
                enum_spec,
                sortable,
            },
        );
        self
    }

    /// Freeze the builder into an immutable registry.
    pub fn build(self) -> FieldRegistry {
        FieldRegistry {
            fields: self.fields,
        }
    }
}
