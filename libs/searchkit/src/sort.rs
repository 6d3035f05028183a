//! Sort validation against the registry's sortable whitelist.
//!
//! Unlike filtering, sorting is fail-closed: silently dropping or reordering
//! a requested sort key would make the API look non-deterministic, so one bad
//! field rejects the whole sort request.

use thiserror::Error;

use crate::input::{SortDirection, SortableColumn};
use crate::path::ColumnPath;
use crate::registry::FieldRegistry;

/// A validated `(path, direction)` pair ready for backend lowering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub path: ColumnPath,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// At least one requested field is unregistered or not sortable. Carries
    /// every requested field name so the caller's error message shows the
    /// whole rejected request, not one offender at a time.
    #[error("sort requested on non-sortable field(s): {}", .requested.join(", "))]
    NonSortableField { requested: Vec<String> },
}

/// Validate the requested sort order and convert it to column paths.
///
/// All-or-nothing: if any requested name fails the whitelist the entire call
/// errors and no [`SortOrder`] values are produced. An empty request is a
/// no-op (`Ok(vec![])`), leaving the store's natural order.
pub fn compile_sort(
    requests: &[SortableColumn],
    registry: &FieldRegistry,
) -> Result<Vec<SortOrder>, SortError> {
    let orders: Vec<SortOrder> = requests
        .iter()
        .filter_map(|request| {
            registry
                .resolve(&request.name)
                .filter(|descriptor| descriptor.is_sortable())
                .map(|descriptor| SortOrder {
                    path: descriptor.path().clone(),
                    direction: request.direction,
                })
        })
        .collect();

    if orders.len() < requests.len() {
        return Err(SortError::NonSortableField {
            requested: requests.iter().map(|r| r.name.clone()).collect(),
        });
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SortableColumn;
    use crate::registry::{FieldRegistry, SearchKind};

    fn registry() -> FieldRegistry {
        FieldRegistry::builder()
            .field("email", "user.email", SearchKind::FuzzyText, true)
            .field("age", "age", SearchKind::Numeric, true)
            .field("notes", "notes", SearchKind::Text, false)
            .build()
    }

    #[test]
    fn valid_sort_maps_to_registered_paths() {
        let orders = compile_sort(
            &[SortableColumn::asc("email"), SortableColumn::desc("age")],
            &registry(),
        )
        .unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].path.to_string(), "user.email");
        assert_eq!(orders[0].direction, SortDirection::Ascending);
        assert_eq!(orders[1].path.to_string(), "age");
        assert_eq!(orders[1].direction, SortDirection::Descending);
    }

    #[test]
    fn empty_request_is_a_noop() {
        assert_eq!(compile_sort(&[], &registry()), Ok(vec![]));
    }

    #[test]
    fn one_bad_field_fails_the_whole_request() {
        let err = compile_sort(
            &[SortableColumn::asc("email"), SortableColumn::asc("unknown")],
            &registry(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SortError::NonSortableField {
                requested: vec!["email".into(), "unknown".into()],
            }
        );
        assert!(err.to_string().contains("unknown"));
    }

    #[test]
    fn registered_but_unsortable_field_is_rejected() {
        let err = compile_sort(&[SortableColumn::asc("notes")], &registry()).unwrap_err();
        assert!(matches!(err, SortError::NonSortableField { .. }));
    }
}
