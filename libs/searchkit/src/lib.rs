//! Backend-agnostic core of the searchkit request compiler.
//!
//! Searchkit turns untyped, client-submitted `(field, value)` filter pairs and
//! `(field, direction)` sort pairs into a typed intermediate representation
//! that a store adapter can lower to a backend predicate. The flow is:
//!
//! 1. Register the searchable surface of an entity once, at startup, in a
//!    [`FieldRegistry`]: logical name, physical column path(s), search kind,
//!    sortability, and (for enum kinds) a literal resolver.
//! 2. Per request, feed the raw [`SearchInput`] list through
//!    [`build_criteria`], which resolves each field against the registry and
//!    produces typed [`Criterion`] values. Unregistered fields and malformed
//!    values are skipped, not rejected.
//! 3. Validate the requested sort with [`compile_sort`], which is
//!    all-or-nothing: one non-sortable field fails the whole request.
//!
//! Lowering the criteria to an actual SQL condition tree lives in the
//! companion `searchkit-db` crate; this crate never touches a database.
//!
//! # Example
//!
//! ```rust
//! use searchkit::{
//!     FieldRegistry, SearchInput, SearchKind, SortableColumn, build_criteria, compile_sort,
//! };
//!
//! let registry = FieldRegistry::builder()
//!     .field("email", "user.email", SearchKind::FuzzyText, true)
//!     .field("age", "age", SearchKind::Numeric, false)
//!     .build();
//!
//! let inputs = vec![
//!     SearchInput::text("email", "acme"),
//!     SearchInput::text("nonexistent", "ignored"),
//! ];
//! let criteria = build_criteria(&registry, &inputs);
//! assert_eq!(criteria.len(), 1);
//!
//! let sort = compile_sort(&[SortableColumn::asc("email")], &registry).unwrap();
//! assert_eq!(sort[0].path.to_string(), "user.email");
//! ```

pub mod criterion;
pub mod factory;
pub mod input;
pub mod page;
pub mod path;
pub mod registry;
pub mod sort;
pub mod value;

pub use criterion::Criterion;
pub use factory::{build_criteria, build_criterion};
pub use input::{CombineOperator, SearchInput, SortDirection, SortableColumn};
pub use page::Page;
pub use path::ColumnPath;
pub use registry::{FieldDescriptor, FieldRegistry, FieldRegistryBuilder, SearchKind};
pub use sort::{SortError, SortOrder, compile_sort};
pub use value::{EnumSpec, ScalarValue};
