//! The queryable-root boundary: attribute resolution and relation traversal.

use std::collections::BTreeMap;

use sea_orm::sea_query::{Alias, ColumnRef, IntoIden};
use searchkit::ColumnPath;

/// The store adapter's view of an entity being queried.
///
/// The predicate and sort compilers lower dotted column paths through this
/// trait: each non-leaf segment traverses a relation with [`left_join`]
/// (left outer, so filtering on an optional relation does not silently drop
/// rows where the relation is absent), and the leaf resolves to a concrete
/// [`ColumnRef`] via [`attribute`].
///
/// [`left_join`]: EntityRoot::left_join
/// [`attribute`]: EntityRoot::attribute
pub trait EntityRoot {
    /// Resolve a leaf attribute on this root to a column reference.
    fn attribute(&self, name: &str) -> ColumnRef;

    /// Traverse one relation with a LEFT OUTER join, returning the root of
    /// the target entity. Repeated traversal of the same relation must
    /// return the same root, so several criteria on `user.*` share one join.
    fn left_join(&mut self, relation: &str) -> &mut dyn EntityRoot;
}

/// Walk a pre-parsed column path down the root: joins for every relation
/// segment, then the leaf attribute.
pub fn resolve_path(root: &mut dyn EntityRoot, path: &ColumnPath) -> ColumnRef {
    let mut current = root;
    for relation in path.relations() {
        current = current.left_join(relation);
    }
    current.attribute(path.leaf())
}

/// One recorded LEFT OUTER join edge, for the store adapter to replay onto
/// its query (the adapter knows the ON clause; the engine only knows the
/// relation name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinStep {
    pub from_alias: String,
    pub relation: String,
    pub to_alias: String,
}

/// Alias-tracking [`EntityRoot`] implementation.
///
/// Column references are emitted as `alias.column`. A relation joined
/// directly off the base root is aliased by its relation name (so
/// `"user.email"` renders as `"user"."email"`); deeper relations prefix the
/// parent alias (`"user_address"`) to stay unambiguous.
#[derive(Debug, Clone)]
pub struct TableRoot {
    alias: String,
    base: bool,
    children: BTreeMap<String, TableRoot>,
}

impl TableRoot {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            alias: table.into(),
            base: true,
            children: BTreeMap::new(),
        }
    }

    fn child(alias: String) -> Self {
        Self {
            alias,
            base: false,
            children: BTreeMap::new(),
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// All join steps referenced so far, parent before child.
    pub fn joins(&self) -> Vec<JoinStep> {
        let mut steps = Vec::new();
        self.collect_joins(&mut steps);
        steps
    }

    fn collect_joins(&self, steps: &mut Vec<JoinStep>) {
        for (relation, joined) in &self.children {
            steps.push(JoinStep {
                from_alias: self.alias.clone(),
                relation: relation.clone(),
                to_alias: joined.alias.clone(),
            });
            joined.collect_joins(steps);
        }
    }
}

impl EntityRoot for TableRoot {
    fn attribute(&self, name: &str) -> ColumnRef {
        ColumnRef::TableColumn(Alias::new(&self.alias).into_iden(), Alias::new(name).into_iden())
    }

    fn left_join(&mut self, relation: &str) -> &mut dyn EntityRoot {
        let alias = if self.base {
            relation.to_owned()
        } else {
            format!("{}_{relation}", self.alias)
        };
        self.children
            .entry(relation.to_owned())
            .or_insert_with(|| Self::child(alias))
    }
}
