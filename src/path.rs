//! Issue path representation.
//!
//! This module provides [`IssuePath`] and [`PathSegment`] for describing where in
//! the validated input an [`Issue`](crate::Issue) was found. A path renders as its
//! segments joined by `.`, so `["items", 0, "name"]` becomes `items.0.name`.

use std::fmt::{self, Display};

/// A key carried by a [`PathSegment::Keyed`] segment.
///
/// Schemas that report segments as `{ key }` objects rather than bare keys use
/// this type. It renders exactly like the equivalent bare segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// A named key (e.g. `email`).
    Name(String),
    /// A numeric key (e.g. an array position).
    Index(usize),
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Name(name) => f.write_str(name),
            PropertyKey::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Name(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::Name(name)
    }
}

impl From<usize> for PropertyKey {
    fn from(idx: usize) -> Self {
        PropertyKey::Index(idx)
    }
}

/// A segment of an issue path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g. `user`, `email`)
    Field(String),
    /// An array index access (e.g. `0`, `42`)
    Index(usize),
    /// A segment reported in object form, `{ key }`.
    Keyed(PropertyKey),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Creates a new object-form segment.
    pub fn keyed(key: impl Into<PropertyKey>) -> Self {
        PathSegment::Keyed(key.into())
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
            PathSegment::Keyed(key) => write!(f, "{}", key),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in the validated input.
///
/// # Example
///
/// ```rust
/// use stins::IssuePath;
///
/// let path = IssuePath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users.0.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IssuePath {
    segments: Vec<PathSegment>,
}

impl IssuePath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Creates a path from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new path with an object-form `{ key }` segment appended.
    pub fn push_key(&self, key: impl Into<PropertyKey>) -> Self {
        self.push(PathSegment::Keyed(key.into()))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Renders the path as a dotted string, or `None` for the root path.
    pub fn to_dotted(&self) -> Option<String> {
        if self.is_root() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for IssuePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<PathSegment>> for IssuePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = IssuePath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert_eq!(path.to_dotted(), None);
    }

    #[test]
    fn test_nested_fields() {
        let path = IssuePath::root().push_field("user").push_field("email");
        assert_eq!(path.to_string(), "user.email");
    }

    #[test]
    fn test_index_joins_with_dot() {
        let path = IssuePath::root().push_field("items").push_index(0);
        assert_eq!(path.to_string(), "items.0");
    }

    #[test]
    fn test_keyed_segments_render_their_key() {
        let path = IssuePath::root().push_key("items").push_key(0usize);
        assert_eq!(path.to_dotted().as_deref(), Some("items.0"));
    }

    #[test]
    fn test_path_immutability() {
        let base = IssuePath::root().push_field("users");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "users");
        assert_eq!(path_a.to_string(), "users.0");
        assert_eq!(path_b.to_string(), "users.1");
    }

    #[test]
    fn test_from_iterator_of_mixed_segments() {
        let path: IssuePath = vec![
            PathSegment::field("a"),
            PathSegment::index(1),
            PathSegment::keyed("b"),
        ]
        .into_iter()
        .collect();

        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some(&PathSegment::Keyed(PropertyKey::Name("b".into()))));
        assert_eq!(path.to_string(), "a.1.b");
    }

    #[test]
    fn test_from_constructors() {
        assert_eq!(IssuePath::from_field("name").to_string(), "name");
        assert_eq!(IssuePath::from_index(5).to_string(), "5");
    }
}
