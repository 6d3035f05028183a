//! Backend-neutral scalar values and enum literal resolution.

use std::fmt;

/// A resolved scalar ready for coercion into a backend value.
///
/// The core crate never speaks a database's value type; enum resolvers
/// produce one of these and the store adapter coerces it (the `searchkit-db`
/// crate maps them onto `sea_orm::Value`).
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    String(String),
    I64(i64),
    Bool(bool),
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        Self::I64(i)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Describes an enumerated value type for `Enum` / `MultiEnum` fields.
///
/// `resolve` maps a wire literal (e.g. `"ACTIVE"`) to the constant stored in
/// the database column, or `None` when the literal names no constant. An
/// unresolvable literal is not an error at this layer; the predicate compiler
/// lowers it to a condition that can never match.
///
/// ```rust
/// use searchkit::{EnumSpec, ScalarValue};
///
/// const STATUS: EnumSpec = EnumSpec::new("UserStatus", |s| match s {
///     "ACTIVE" | "SUSPENDED" | "DELETED" => Some(ScalarValue::String(s.to_owned())),
///     _ => None,
/// });
/// assert!(STATUS.resolve("ACTIVE").is_some());
/// assert!(STATUS.resolve("BOGUS").is_none());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct EnumSpec {
    name: &'static str,
    resolve: fn(&str) -> Option<ScalarValue>,
}

impl EnumSpec {
    pub const fn new(name: &'static str, resolve: fn(&str) -> Option<ScalarValue>) -> Self {
        Self { name, resolve }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn resolve(&self, literal: &str) -> Option<ScalarValue> {
        (self.resolve)(literal)
    }
}

impl fmt::Debug for EnumSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumSpec").field("name", &self.name).finish()
    }
}
