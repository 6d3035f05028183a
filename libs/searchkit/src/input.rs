//! Wire-level request DTOs.
//!
//! These are the untyped shapes the caller-facing layer deserializes from a
//! request body. The engine reads only the fields relevant to the search kind
//! the target field is registered as; it does not enforce that exactly one
//! value shape is populated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

/// One client-submitted filter.
///
/// `field_name` keys into the per-entity [`crate::FieldRegistry`]; the value
/// fields carry the raw, stringly-typed payload. Date-range sides stay raw
/// RFC 3339 strings here and are parsed at criterion-construction time so a
/// malformed side degrades to "absent" instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchInput {
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_value_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    /// Term combinator for multi-term fuzzy search; ignored by other kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<CombineOperator>,
}

impl SearchInput {
    /// A scalar text-valued filter (also used for numeric, boolean, enum and
    /// fuzzy kinds, which all ride in `text_value`).
    pub fn text(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            text_value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A multi-valued text filter.
    pub fn list<I, S>(field_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_name: field_name.into(),
            text_value_list: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// A date-range filter; either side may be `None` for an open end.
    pub fn date_range(
        field_name: impl Into<String>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            from_date: from.map(str::to_owned),
            to_date: to.map(str::to_owned),
            ..Self::default()
        }
    }

    pub fn with_operator(mut self, operator: CombineOperator) -> Self {
        self.operator = Some(operator);
        self
    }
}

/// How the per-term predicates of a multi-term fuzzy search combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CombineOperator {
    #[default]
    And,
    Or,
}

/// One client-submitted sort request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SortableColumn {
    pub name: String,
    pub direction: SortDirection,
}

impl SortableColumn {
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Sort direction, accepted case-insensitively on the wire (`"asc"`,
/// `"DESC"`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Ascending)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Descending)
        } else {
            Err(format!("invalid sort direction: {s:?}"))
        }
    }
}

impl Serialize for SortDirection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
