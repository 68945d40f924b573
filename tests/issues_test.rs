//! Integration tests for Issue and Issues.

use stillwater::prelude::*;
use stillwater::Validation;
use stins::{Issue, IssuePath, Issues, ValidationResult};

#[test]
fn test_issue_with_and_without_path() {
    let issue = Issue::at(IssuePath::root().push_field("email"), "invalid email format");
    assert_eq!(issue.path.as_ref().map(ToString::to_string).as_deref(), Some("email"));
    assert_eq!(issue.to_string(), "email: invalid email format");

    let root = Issue::new("body must be an object");
    assert_eq!(root.path, None);
    assert_eq!(root.to_string(), "(root): body must be an object");
}

#[test]
fn test_issues_may_be_empty() {
    let issues = Issues::default();

    assert!(issues.is_empty());
    assert_eq!(issues.first(), None);
    assert_eq!(issues.to_string(), "Validation failed with 0 issue(s):\n");
}

#[test]
fn test_issues_combine_via_semigroup() {
    let e1 = Issues::single(Issue::at(IssuePath::from_field("name"), "name is required"));
    let e2 = Issues::single(Issue::at(IssuePath::from_field("email"), "email is invalid"));
    let e3 = Issues::single(Issue::at(IssuePath::from_field("age"), "age must be positive"));

    let combined = e1.combine(e2).combine(e3);

    let messages: Vec<&str> = combined.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["name is required", "email is invalid", "age must be positive"]);
}

#[test]
fn test_validation_and_accumulates_issues() {
    let v1: ValidationResult<i32> =
        Validation::Failure(Issues::single(Issue::at(IssuePath::from_field("a"), "error a")));
    let v2: ValidationResult<i32> =
        Validation::Failure(Issues::single(Issue::at(IssuePath::from_field("b"), "error b")));

    match v1.and(v2) {
        Validation::Failure(issues) => {
            assert_eq!(issues.len(), 2);
            let paths: Vec<String> = issues
                .iter()
                .filter_map(|issue| issue.path.as_ref().map(ToString::to_string))
                .collect();
            assert_eq!(paths, vec!["a", "b"]);
        }
        Validation::Success(_) => panic!("Expected failure"),
    }
}

#[test]
fn test_validation_map() {
    let result: ValidationResult<i32> = Validation::Success(10);

    match result.map(|x| x * 2) {
        Validation::Success(v) => assert_eq!(v, 20),
        Validation::Failure(_) => panic!("Expected success"),
    }
}

#[test]
fn test_issues_at_path() {
    let name = IssuePath::from_field("name");
    let issues: Issues = vec![
        Issue::at(name.clone(), "Required"),
        Issue::at(IssuePath::from_field("email"), "Invalid"),
        Issue::at(name.clone(), "Too short"),
    ]
    .into();

    let at_name: Vec<&str> = issues.at_path(&name).iter().map(|i| i.message.as_str()).collect();
    assert_eq!(at_name, vec!["Required", "Too short"]);
}

#[test]
fn test_issues_is_an_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}

    let issues = Issues::single(Issue::new("bad"));
    assert_error(&issues);
    assert_error(&Issue::new("bad"));
}
