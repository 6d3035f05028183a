//! Validated sort order → sea-query ordering.

use sea_orm::sea_query::{ColumnRef, Order, OrderedStatement, SelectStatement};
use searchkit::{SortDirection, SortOrder};

use crate::root::{EntityRoot, resolve_path};

/// Lower a validated sort list to `(column, order)` pairs, resolving join
/// paths through the same root the predicate compiler uses.
pub fn sort_expressions(
    orders: &[SortOrder],
    root: &mut dyn EntityRoot,
) -> Vec<(ColumnRef, Order)> {
    orders
        .iter()
        .map(|order| {
            (
                resolve_path(root, &order.path),
                match order.direction {
                    SortDirection::Ascending => Order::Asc,
                    SortDirection::Descending => Order::Desc,
                },
            )
        })
        .collect()
}

/// Apply a validated sort to a sea-query select statement in request order.
pub fn apply_sort(select: &mut SelectStatement, orders: &[SortOrder], root: &mut dyn EntityRoot) {
    for (col, order) in sort_expressions(orders, root) {
        select.order_by(col, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root::TableRoot;
    use searchkit::ColumnPath;

    #[test]
    fn directions_map_to_sea_query_orders() {
        let orders = vec![
            SortOrder {
                path: ColumnPath::parse("user.email"),
                direction: SortDirection::Ascending,
            },
            SortOrder {
                path: ColumnPath::parse("age"),
                direction: SortDirection::Descending,
            },
        ];
        let mut root = TableRoot::new("accounts");
        let exprs = sort_expressions(&orders, &mut root);
        assert_eq!(exprs.len(), 2);
        assert!(matches!(exprs[0].1, Order::Asc));
        assert!(matches!(exprs[1].1, Order::Desc));
        // The join path behind the sort key is registered on the root too.
        assert_eq!(root.joins().len(), 1);
    }
}
