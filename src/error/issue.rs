//! Validation issue types.
//!
//! This module provides [`Issue`] for a single problem reported by a schema and
//! [`Issues`] for the ordered collection a failed validation carries.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::IssuePath;

/// A single validation issue reported by a schema.
///
/// `Issue` is deliberately small: a human-readable message and, when the
/// schema knows it, the path to the offending value.
///
/// # Example
///
/// ```rust
/// use stins::{Issue, IssuePath};
///
/// let issue = Issue::new("Invalid email").with_path(IssuePath::from_field("email"));
///
/// assert_eq!(issue.to_string(), "email: Invalid email");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Human-readable error message.
    pub message: String,
    /// Where in the input the issue occurred, if known.
    pub path: Option<IssuePath>,
}

impl Issue {
    /// Creates an issue without a path.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Creates an issue located at `path`.
    pub fn at(path: IssuePath, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Sets the path and returns self for chaining.
    pub fn with_path(mut self, path: IssuePath) -> Self {
        self.path = Some(path);
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path.as_ref().and_then(IssuePath::to_dotted) {
            Some(path) => write!(f, "{}: {}", path, self.message),
            None => write!(f, "(root): {}", self.message),
        }
    }
}

impl std::error::Error for Issue {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// The ordered issues carried by a failed validation.
///
/// A schema signalling failure is expected to report at least one issue, but
/// an empty list is still a failure with zero detail. `Issues` therefore does
/// not enforce non-emptiness; it only preserves order.
///
/// # Combining Issues
///
/// `Issues` implements `Semigroup`, so results of independent validations can
/// be merged:
///
/// ```rust
/// use stins::{Issue, Issues};
/// use stillwater::prelude::*;
///
/// let a = Issues::single(Issue::new("name is required"));
/// let b = Issues::single(Issue::new("email is invalid"));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Issues(Vec<Issue>);

impl Issues {
    /// Creates an `Issues` containing a single issue.
    pub fn single(issue: Issue) -> Self {
        Self(vec![issue])
    }

    /// Returns the number of issues in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the schema failed without reporting any detail.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the contained issues.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Returns all issues located at `path`.
    pub fn at_path(&self, path: &IssuePath) -> Vec<&Issue> {
        self.0
            .iter()
            .filter(|issue| issue.path.as_ref() == Some(path))
            .collect()
    }

    /// Returns the first issue, if any.
    pub fn first(&self) -> Option<&Issue> {
        self.0.first()
    }

    /// Returns the issues as a slice.
    pub fn as_slice(&self) -> &[Issue] {
        &self.0
    }

    /// Converts this collection into a `Vec<Issue>`.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0
    }
}

impl From<Vec<Issue>> for Issues {
    fn from(issues: Vec<Issue>) -> Self {
        Self(issues)
    }
}

impl FromIterator<Issue> for Issues {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Semigroup for Issues {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
