//! Criterion list → `sea_orm::Condition` boolean expression tree.

use sea_orm::Condition;
use sea_orm::sea_query::{ColumnRef, Expr, Func, SimpleExpr};
use searchkit::{CombineOperator, Criterion, ScalarValue};
use tracing::debug;

use crate::root::{EntityRoot, resolve_path};

/// Compile a criterion list into one conjunctive condition.
///
/// Returns `None` for an empty list: "no predicate" means "match
/// everything", never an error. Disjunction only ever appears inside a
/// single multi-value criterion; across criteria the combinator is AND.
pub fn compile_predicate(criteria: &[Criterion], root: &mut dyn EntityRoot) -> Option<Condition> {
    if criteria.is_empty() {
        return None;
    }
    let mut all = Condition::all();
    for criterion in criteria {
        all = all.add(criterion_condition(criterion, root));
    }
    Some(all)
}

/// Lower one criterion. The match is exhaustive over the closed
/// [`Criterion`] union; an unhandled kind is a compile error here, not a
/// runtime dispatch gap.
fn criterion_condition(criterion: &Criterion, root: &mut dyn EntityRoot) -> Condition {
    match criterion {
        Criterion::Text {
            path,
            value,
            negate,
        } => {
            let col = resolve_path(root, path);
            negate_if(Expr::col(col).eq(value.clone()), *negate)
        }
        Criterion::FuzzyText { path, value } => {
            let col = resolve_path(root, path);
            Condition::all().add(fuzzy_like(col, value))
        }
        Criterion::MultiText {
            path,
            values,
            negate,
        } => {
            let col = resolve_path(root, path);
            negate_if(Expr::col(col).is_in(values.iter().cloned()), *negate)
        }
        Criterion::MultiFuzzyText {
            path,
            terms,
            operator,
        } => {
            let col = resolve_path(root, path);
            let mut combined = match operator {
                CombineOperator::And => Condition::all(),
                CombineOperator::Or => Condition::any(),
            };
            for term in terms {
                combined = combined.add(fuzzy_like(col.clone(), term));
            }
            combined
        }
        Criterion::MultiColumnFuzzyText { paths, terms } => {
            let cols: Vec<ColumnRef> = paths.iter().map(|p| resolve_path(root, p)).collect();
            // Every term must match in at least one column: AND of per-term ORs.
            let mut all = Condition::all();
            for term in terms {
                let mut any_column = Condition::any();
                for col in &cols {
                    any_column = any_column.add(fuzzy_like(col.clone(), term));
                }
                all = all.add(any_column);
            }
            all
        }
        Criterion::Enum {
            path,
            enum_spec,
            value,
            negate,
        } => {
            let col = resolve_path(root, path);
            match enum_spec.resolve(value) {
                Some(constant) => {
                    negate_if(Expr::col(col).eq(scalar_to_value(&constant)), *negate)
                }
                None => {
                    debug!(
                        enum_type = enum_spec.name(),
                        literal = %value,
                        "unresolvable enum literal; compiling to deny-all"
                    );
                    deny_all()
                }
            }
        }
        Criterion::MultiEnum {
            path,
            enum_spec,
            values,
            negate,
        } => {
            let col = resolve_path(root, path);
            let resolved: Option<Vec<sea_orm::Value>> = values
                .iter()
                .map(|v| enum_spec.resolve(v).map(|s| scalar_to_value(&s)))
                .collect();
            match resolved {
                Some(constants) => negate_if(Expr::col(col).is_in(constants), *negate),
                None => {
                    debug!(
                        enum_type = enum_spec.name(),
                        "unresolvable enum literal in list; compiling to deny-all"
                    );
                    deny_all()
                }
            }
        }
        Criterion::Numeric {
            path,
            value,
            negate,
        } => {
            let col = resolve_path(root, path);
            negate_if(Expr::col(col).eq(*value), *negate)
        }
        Criterion::Boolean { path, value } => {
            let col = resolve_path(root, path);
            Condition::all().add(Expr::col(col).eq(*value))
        }
        Criterion::DateRange { path, from, to } => {
            let col = resolve_path(root, path);
            let mut range = Condition::all();
            if let Some(from) = from {
                range = range.add(Expr::col(col.clone()).gte(*from));
            }
            if let Some(to) = to {
                range = range.add(Expr::col(col).lte(*to));
            }
            range
        }
    }
}

/// `WHERE FALSE`: a predicate that can never match. Malformed enum filters
/// degrade to "no rows" instead of failing the request.
fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

fn negate_if(expr: SimpleExpr, negate: bool) -> Condition {
    let cond = Condition::all().add(expr);
    if negate { cond.not() } else { cond }
}

/// `LOWER(col) LIKE '%term%'`, with the term lowercased and LIKE
/// metacharacters escaped so user input cannot inject wildcards.
fn fuzzy_like(col: ColumnRef, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(like_contains(&term.to_lowercase()))
}

fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn like_contains(s: &str) -> String {
    format!("%{}%", like_escape(s))
}

fn scalar_to_value(v: &ScalarValue) -> sea_orm::Value {
    match v {
        ScalarValue::String(s) => sea_orm::Value::from(s.clone()),
        ScalarValue::I64(i) => sea_orm::Value::from(*i),
        ScalarValue::Bool(b) => sea_orm::Value::from(*b),
    }
}
