//! Criterion construction: raw input + registry descriptor → [`Criterion`].
//!
//! The factory is fail-open by design. A search endpoint is typically driven
//! by partially-trusted UI code sending best-effort filters, so anything that
//! cannot be turned into a usable condition — an unregistered field, a blank
//! value, an unparsable number, date or boolean — degrades to "this field is
//! not filtered" with a `debug!` diagnostic, never to a request error.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::criterion::Criterion;
use crate::input::SearchInput;
use crate::path::ColumnPath;
use crate::registry::{FieldDescriptor, FieldRegistry, SearchKind};

/// Resolve and convert a whole request's worth of filters.
///
/// Unregistered field names are skipped with a diagnostic; everything else is
/// delegated to [`build_criterion`].
pub fn build_criteria(registry: &FieldRegistry, inputs: &[SearchInput]) -> Vec<Criterion> {
    inputs
        .iter()
        .filter_map(|input| match registry.resolve(&input.field_name) {
            Some(descriptor) => build_criterion(descriptor, input),
            None => {
                debug!(field = %input.field_name, "skipping unregistered search field");
                None
            }
        })
        .collect()
}

/// Convert one raw input into a typed criterion, dispatching on the
/// descriptor's search kind. Returns `None` when the input carries no usable
/// value for that kind.
pub fn build_criterion(descriptor: &FieldDescriptor, input: &SearchInput) -> Option<Criterion> {
    match descriptor.kind() {
        SearchKind::Text => {
            let (negate, value) = split_negation(text_value(input)?);
            Some(Criterion::Text {
                path: descriptor.path().clone(),
                value: value.to_owned(),
                negate,
            })
        }
        SearchKind::FuzzyText => Some(Criterion::FuzzyText {
            path: descriptor.path().clone(),
            value: text_value(input)?.to_owned(),
        }),
        SearchKind::MultiText => {
            let (negate, values) = split_list_negation(input.text_value_list.as_deref()?)?;
            Some(Criterion::MultiText {
                path: descriptor.path().clone(),
                values,
                negate,
            })
        }
        SearchKind::MultiFuzzyText => Some(Criterion::MultiFuzzyText {
            path: descriptor.path().clone(),
            terms: split_terms(text_value(input)?)?,
            operator: input.operator.unwrap_or_default(),
        }),
        SearchKind::MultiColumnFuzzyText => Some(Criterion::MultiColumnFuzzyText {
            paths: descriptor.paths().to_vec(),
            terms: split_terms(text_value(input)?)?,
        }),
        SearchKind::Enum => {
            let (negate, value) = split_negation(text_value(input)?);
            Some(Criterion::Enum {
                path: descriptor.path().clone(),
                enum_spec: descriptor.enum_spec()?,
                value: value.to_owned(),
                negate,
            })
        }
        SearchKind::MultiEnum => {
            let (negate, values) = split_list_negation(input.text_value_list.as_deref()?)?;
            Some(Criterion::MultiEnum {
                path: descriptor.path().clone(),
                enum_spec: descriptor.enum_spec()?,
                values,
                negate,
            })
        }
        SearchKind::Numeric => {
            let (negate, raw) = split_negation(text_value(input)?);
            let Ok(value) = raw.parse::<i64>() else {
                debug!(
                    field = %descriptor.logical_name(),
                    value = raw,
                    "skipping unparsable numeric filter value"
                );
                return None;
            };
            Some(Criterion::Numeric {
                path: descriptor.path().clone(),
                value,
                negate,
            })
        }
        SearchKind::Boolean => {
            let raw = text_value(input)?;
            let value = if raw.eq_ignore_ascii_case("true") {
                true
            } else if raw.eq_ignore_ascii_case("false") {
                false
            } else {
                debug!(
                    field = %descriptor.logical_name(),
                    value = raw,
                    "skipping unparsable boolean filter value"
                );
                return None;
            };
            Some(Criterion::Boolean {
                path: descriptor.path().clone(),
                value,
            })
        }
        SearchKind::DateRange => {
            let from = parse_datetime(descriptor, input.from_date.as_deref());
            let to = parse_datetime(descriptor, input.to_date.as_deref());
            if from.is_none() && to.is_none() {
                return None;
            }
            Some(Criterion::DateRange {
                path: descriptor.path().clone(),
                from,
                to,
            })
        }
    }
}

/// The scalar text payload, or `None` when absent or blank.
fn text_value(input: &SearchInput) -> Option<&str> {
    input
        .text_value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
}

/// Strip a leading `!` negation marker from a scalar value.
///
/// The marker is a wire convention: a value that legitimately starts with `!`
/// cannot be expressed. Kept for protocol compatibility.
fn split_negation(raw: &str) -> (bool, &str) {
    match raw.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, raw),
    }
}

/// Negation for multi-value inputs: only the first element's marker governs
/// the whole criterion, and only the first element is stripped. A documented
/// quirk of the wire protocol, not a per-element check.
fn split_list_negation(raw: &[String]) -> Option<(bool, Vec<String>)> {
    let (first, rest) = raw.split_first()?;
    let (negate, first) = split_negation(first);
    let mut values = Vec::with_capacity(raw.len());
    values.push(first.to_owned());
    values.extend(rest.iter().cloned());
    Some((negate, values))
}

/// Whitespace-split fuzzy terms; `None` when no terms survive.
fn split_terms(raw: &str) -> Option<Vec<String>> {
    let terms: Vec<String> = raw.split_whitespace().map(str::to_owned).collect();
    if terms.is_empty() { None } else { Some(terms) }
}

fn parse_datetime(descriptor: &FieldDescriptor, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw.filter(|v| !v.trim().is_empty())?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(_) => {
            debug!(
                field = %descriptor.logical_name(),
                value = raw,
                "skipping unparsable date-range bound"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CombineOperator, SearchInput};
    use crate::registry::FieldRegistry;
    use crate::value::{EnumSpec, ScalarValue};
    use chrono::TimeZone;

    const STATUS: EnumSpec = EnumSpec::new("Status", |s| match s {
        "ACTIVE" | "SUSPENDED" | "DELETED" => Some(ScalarValue::String(s.to_owned())),
        _ => None,
    });

    fn registry() -> FieldRegistry {
        FieldRegistry::builder()
            .field("name", "name", SearchKind::Text, true)
            .field("email", "user.email", SearchKind::FuzzyText, true)
            .field("tags", "tag", SearchKind::MultiText, false)
            .field("query", "description", SearchKind::MultiFuzzyText, false)
            .multi_column_field("anywhere", ["name", "description"], false)
            .enum_field("status", "status", SearchKind::Enum, STATUS, true)
            .enum_field("statuses", "status", SearchKind::MultiEnum, STATUS, false)
            .field("age", "age", SearchKind::Numeric, true)
            .field("active", "active", SearchKind::Boolean, false)
            .field("created", "created_at", SearchKind::DateRange, true)
            .build()
    }

    fn one(registry: &FieldRegistry, input: SearchInput) -> Option<Criterion> {
        build_criterion(registry.resolve(&input.field_name).unwrap(), &input)
    }

    #[test]
    fn unregistered_field_produces_no_criterion() {
        let criteria = build_criteria(&registry(), &[SearchInput::text("bogus", "x")]);
        assert!(criteria.is_empty());
    }

    #[test]
    fn text_negation_marker_is_stripped() {
        let registry = registry();
        let criterion = one(&registry, SearchInput::text("name", "!bob")).unwrap();
        assert_eq!(
            criterion,
            Criterion::Text {
                path: ColumnPath::parse("name"),
                value: "bob".into(),
                negate: true,
            }
        );
    }

    #[test]
    fn blank_text_is_skipped() {
        let registry = registry();
        assert!(one(&registry, SearchInput::text("name", "   ")).is_none());
        assert!(
            one(
                &registry,
                SearchInput {
                    field_name: "name".into(),
                    ..SearchInput::default()
                }
            )
            .is_none()
        );
    }

    #[test]
    fn fuzzy_text_keeps_value_verbatim() {
        let registry = registry();
        let criterion = one(&registry, SearchInput::text("email", "!acme")).unwrap();
        // FuzzyText has no negation; the bang is part of the search value.
        assert_eq!(
            criterion,
            Criterion::FuzzyText {
                path: ColumnPath::parse("user.email"),
                value: "!acme".into(),
            }
        );
    }

    #[test]
    fn multi_text_negation_checks_first_element_only() {
        let registry = registry();
        let criterion = one(&registry, SearchInput::list("tags", ["!red", "!blue"])).unwrap();
        assert_eq!(
            criterion,
            Criterion::MultiText {
                path: ColumnPath::parse("tag"),
                values: vec!["red".into(), "!blue".into()],
                negate: true,
            }
        );

        let criterion = one(&registry, SearchInput::list("tags", ["red", "!blue"])).unwrap();
        assert_eq!(
            criterion,
            Criterion::MultiText {
                path: ColumnPath::parse("tag"),
                values: vec!["red".into(), "!blue".into()],
                negate: false,
            }
        );
    }

    #[test]
    fn empty_list_is_skipped() {
        let registry = registry();
        let empty: [&str; 0] = [];
        assert!(one(&registry, SearchInput::list("tags", empty)).is_none());
    }

    #[test]
    fn multi_fuzzy_splits_terms_and_defaults_to_and() {
        let registry = registry();
        let criterion = one(&registry, SearchInput::text("query", "  red  blue ")).unwrap();
        assert_eq!(
            criterion,
            Criterion::MultiFuzzyText {
                path: ColumnPath::parse("description"),
                terms: vec!["red".into(), "blue".into()],
                operator: CombineOperator::And,
            }
        );

        let criterion = one(
            &registry,
            SearchInput::text("query", "red blue").with_operator(CombineOperator::Or),
        )
        .unwrap();
        assert!(matches!(
            criterion,
            Criterion::MultiFuzzyText {
                operator: CombineOperator::Or,
                ..
            }
        ));
    }

    #[test]
    fn multi_column_fuzzy_binds_all_descriptor_paths() {
        let registry = registry();
        let criterion = one(&registry, SearchInput::text("anywhere", "red blue")).unwrap();
        assert_eq!(
            criterion,
            Criterion::MultiColumnFuzzyText {
                paths: vec![ColumnPath::parse("name"), ColumnPath::parse("description")],
                terms: vec!["red".into(), "blue".into()],
            }
        );
    }

    #[test]
    fn enum_criterion_carries_literal_and_negation() {
        let registry = registry();
        let criterion = one(&registry, SearchInput::text("status", "!ACTIVE")).unwrap();
        assert!(matches!(
            criterion,
            Criterion::Enum { ref value, negate: true, .. } if value == "ACTIVE"
        ));
    }

    #[test]
    fn bogus_enum_literal_still_builds_a_criterion() {
        // Resolution happens at predicate time, where it lowers to deny-all.
        let registry = registry();
        assert!(one(&registry, SearchInput::text("status", "BOGUS")).is_some());
    }

    #[test]
    fn numeric_parses_and_negates() {
        let registry = registry();
        let criterion = one(&registry, SearchInput::text("age", "!42")).unwrap();
        assert_eq!(
            criterion,
            Criterion::Numeric {
                path: ColumnPath::parse("age"),
                value: 42,
                negate: true,
            }
        );
    }

    #[test]
    fn unparsable_numeric_is_skipped() {
        let registry = registry();
        assert!(one(&registry, SearchInput::text("age", "forty-two")).is_none());
    }

    #[test]
    fn boolean_parses_case_insensitively() {
        let registry = registry();
        assert_eq!(
            one(&registry, SearchInput::text("active", "TRUE")).unwrap(),
            Criterion::Boolean {
                path: ColumnPath::parse("active"),
                value: true,
            }
        );
        assert_eq!(
            one(&registry, SearchInput::text("active", "false")).unwrap(),
            Criterion::Boolean {
                path: ColumnPath::parse("active"),
                value: false,
            }
        );
        assert!(one(&registry, SearchInput::text("active", "yes")).is_none());
    }

    #[test]
    fn date_range_sides_parse_independently() {
        let registry = registry();
        let criterion = one(
            &registry,
            SearchInput::date_range("created", Some("2024-03-01T00:00:00Z"), None),
        )
        .unwrap();
        let expected_from = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            criterion,
            Criterion::DateRange {
                path: ColumnPath::parse("created_at"),
                from: Some(expected_from),
                to: None,
            }
        );
    }

    #[test]
    fn malformed_date_side_degrades_to_open() {
        let registry = registry();
        let criterion = one(
            &registry,
            SearchInput::date_range("created", Some("not-a-date"), Some("2024-03-02T00:00:00Z")),
        )
        .unwrap();
        assert!(matches!(
            criterion,
            Criterion::DateRange {
                from: None,
                to: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn date_range_with_both_sides_absent_is_skipped() {
        let registry = registry();
        assert!(one(&registry, SearchInput::date_range("created", None, None)).is_none());
        assert!(
            one(
                &registry,
                SearchInput::date_range("created", Some("junk"), Some("also junk"))
            )
            .is_none()
        );
    }

    #[test]
    fn build_criteria_mixes_kinds_and_skips_noise() {
        let registry = registry();
        let inputs = vec![
            SearchInput::text("email", "acme"),
            SearchInput::text("age", "nope"),
            SearchInput::text("mystery", "x"),
            SearchInput::text("status", "SUSPENDED"),
        ];
        let criteria = build_criteria(&registry, &inputs);
        assert_eq!(criteria.len(), 2);
    }
}
