//! `SeaORM`/sea-query lowering for searchkit criteria.
//!
//! This crate is the backend half of the search compiler: it takes the typed
//! [`searchkit::Criterion`] list produced by the core crate and emits a
//! `sea_orm::Condition` boolean expression tree, plus the `(column, order)`
//! pairs for a validated sort. It never executes anything — applying the
//! condition, the joins, and the ordering to an actual query is the store
//! adapter's job.
//!
//! Column paths that traverse relations (`"user.address.city"`) are resolved
//! through the [`EntityRoot`] trait: every non-leaf segment is a LEFT OUTER
//! join step, the leaf is an attribute on the innermost root. [`TableRoot`]
//! is a ready-made alias-tracking implementation that records the join steps
//! for the adapter to replay.
//!
//! ```rust
//! use searchkit::{FieldRegistry, SearchInput, SearchKind, build_criteria};
//! use searchkit_db::{TableRoot, compile_predicate};
//!
//! let registry = FieldRegistry::builder()
//!     .field("email", "user.email", SearchKind::FuzzyText, true)
//!     .build();
//! let criteria = build_criteria(&registry, &[SearchInput::text("email", "acme")]);
//!
//! let mut root = TableRoot::new("accounts");
//! let condition = compile_predicate(&criteria, &mut root).unwrap();
//! assert_eq!(root.joins().len(), 1); // accounts → user, LEFT OUTER
//! # let _ = condition;
//! ```

pub mod predicate;
pub mod root;
pub mod sort;

pub use predicate::compile_predicate;
pub use root::{EntityRoot, JoinStep, TableRoot, resolve_path};
pub use sort::{apply_sort, sort_expressions};
