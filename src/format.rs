//! Serializable renderings of validation issues.
//!
//! [`format_issues`] flattens each issue's path into a dotted string.
//! [`format_issues_as_object`] groups messages by that string, which suits
//! form-style error displays.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Issue;

/// Group key used for issues without a path.
pub const ROOT_KEY: &str = "_root";

/// An issue with its path joined into a single string.
///
/// Serializes as `{"message": ..., "path": ...}` with `path` omitted when the
/// issue had no path or an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedIssue {
    /// Human-readable error message.
    pub message: String,
    /// Dotted path, e.g. `user.email`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&Issue> for FormattedIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            message: issue.message.clone(),
            path: issue.path.as_ref().and_then(|path| path.to_dotted()),
        }
    }
}

/// Formats issues one-to-one, preserving order.
///
/// # Example
///
/// ```rust
/// use stins::{format_issues, FormattedIssue, Issue, IssuePath};
///
/// let issues = vec![Issue::at(IssuePath::root().push_field("user").push_field("email"), "Invalid email")];
///
/// assert_eq!(
///     format_issues(&issues),
///     vec![FormattedIssue { message: "Invalid email".into(), path: Some("user.email".into()) }]
/// );
/// ```
pub fn format_issues<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Vec<FormattedIssue> {
    issues.into_iter().map(FormattedIssue::from).collect()
}

/// Groups issue messages by formatted path.
///
/// Issues without a path are grouped under [`ROOT_KEY`]. Keys appear in order
/// of first occurrence, and messages keep their order within each group.
pub fn format_issues_as_object<'a>(
    issues: impl IntoIterator<Item = &'a Issue>,
) -> IndexMap<String, Vec<String>> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();

    for issue in issues {
        let key = issue
            .path
            .as_ref()
            .and_then(|path| path.to_dotted())
            .unwrap_or_else(|| ROOT_KEY.to_string());
        grouped.entry(key).or_default().push(issue.message.clone());
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::IssuePath;
    use serde_json::json;

    #[test]
    fn test_issue_without_path() {
        let formatted = format_issues(&[Issue::new("Required")]);
        assert_eq!(formatted, vec![FormattedIssue { message: "Required".into(), path: None }]);
    }

    #[test]
    fn test_empty_path_formats_as_none() {
        let formatted = format_issues(&[Issue::at(IssuePath::root(), "Error")]);
        assert_eq!(formatted[0].path, None);
    }

    #[test]
    fn test_keyed_segments() {
        let path = IssuePath::root().push_key("items").push_key(0usize);
        let formatted = format_issues(&[Issue::at(path, "Too short")]);
        assert_eq!(formatted[0].path.as_deref(), Some("items.0"));
    }

    #[test]
    fn test_serialization_omits_missing_path() {
        let formatted = format_issues(&[
            Issue::new("Required"),
            Issue::at(IssuePath::from_field("name"), "Too short"),
        ]);

        assert_eq!(
            serde_json::to_value(&formatted).unwrap(),
            json!([
                { "message": "Required" },
                { "message": "Too short", "path": "name" }
            ])
        );
    }

    #[test]
    fn test_group_by_path_in_first_occurrence_order() {
        let issues = vec![
            Issue::at(IssuePath::from_field("name"), "Required"),
            Issue::at(IssuePath::from_field("email"), "Invalid"),
            Issue::at(IssuePath::from_field("name"), "Too short"),
        ];

        let grouped = format_issues_as_object(&issues);
        let keys: Vec<_> = grouped.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["name", "email"]);
        assert_eq!(grouped["name"], vec!["Required", "Too short"]);
        assert_eq!(grouped["email"], vec!["Invalid"]);
    }

    #[test]
    fn test_group_root_issues() {
        let issues = vec![Issue::new("Root error"), Issue::new("Another root error")];

        let grouped = format_issues_as_object(&issues);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[ROOT_KEY], vec!["Root error", "Another root error"]);
    }

    #[test]
    fn test_group_empty() {
        let none: &[Issue] = &[];
        assert!(format_issues_as_object(none).is_empty());
    }
}
