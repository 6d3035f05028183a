//! The typed search-condition model.

use chrono::{DateTime, Utc};

use crate::input::CombineOperator;
use crate::path::ColumnPath;
use crate::value::EnumSpec;

/// One resolved, typed search condition, ready for predicate lowering.
///
/// A `Criterion` is only ever produced by [`crate::build_criterion`] from a
/// registered [`crate::FieldDescriptor`] and a raw [`crate::SearchInput`], so
/// its paths always come from the registry — never straight off the wire.
/// Where a variant carries `negate`, the flag was derived from a leading `!`
/// marker that the factory stripped from the stored value.
///
/// The enum is closed on purpose: the predicate compiler matches it
/// exhaustively, so adding a kind without handling its lowering is a compile
/// error rather than a runtime dispatch gap.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Exact equality on a text column.
    Text {
        path: ColumnPath,
        value: String,
        negate: bool,
    },
    /// Case-insensitive substring match.
    FuzzyText { path: ColumnPath, value: String },
    /// Membership in a list of text values.
    MultiText {
        path: ColumnPath,
        values: Vec<String>,
        negate: bool,
    },
    /// Several substring terms on one column, AND- or OR-combined.
    MultiFuzzyText {
        path: ColumnPath,
        terms: Vec<String>,
        operator: CombineOperator,
    },
    /// Several substring terms, each matched across several columns.
    MultiColumnFuzzyText {
        paths: Vec<ColumnPath>,
        terms: Vec<String>,
    },
    /// Equality against a resolved enum constant.
    Enum {
        path: ColumnPath,
        enum_spec: EnumSpec,
        value: String,
        negate: bool,
    },
    /// Membership in a list of resolved enum constants.
    MultiEnum {
        path: ColumnPath,
        enum_spec: EnumSpec,
        values: Vec<String>,
        negate: bool,
    },
    /// Equality on an integer column.
    Numeric {
        path: ColumnPath,
        value: i64,
        negate: bool,
    },
    /// Equality on a boolean column. No negate flag: equality on a binary
    /// value is already its own negation.
    Boolean { path: ColumnPath, value: bool },
    /// Inclusive date-time range; at least one side is present.
    DateRange {
        path: ColumnPath,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
}
