//! Dotted column paths, parsed once at registration time.

use std::fmt;

/// A physical column path: zero or more relation traversals ending in a leaf
/// attribute, written on the wire as a dotted string (`"user.address.city"`).
///
/// The dotted form is kept for caller compatibility, but it is split into
/// segments exactly once, when the owning descriptor is registered; every
/// later consumer works on the pre-parsed segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnPath {
    segments: Vec<String>,
}

impl ColumnPath {
    /// Parse a dotted path. Empty segments (leading, trailing, or doubled
    /// dots) are dropped.
    pub fn parse(raw: &str) -> Self {
        Self {
            segments: raw
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// True when the path has no segments at all (parsed from a blank string).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every segment except the last: the relations to traverse, in order.
    pub fn relations(&self) -> &[String] {
        match self.segments.len() {
            0 => &[],
            n => &self.segments[..n - 1],
        }
    }

    /// The final segment: the leaf attribute on the innermost relation.
    ///
    /// Registration rejects empty paths, so a path reachable through a
    /// [`crate::FieldDescriptor`] always has a leaf.
    pub fn leaf(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for ColumnPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
