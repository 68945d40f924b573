//! HTTP status codes and phrases.
//!
//! Status values come from the [`http`] crate; this module adds the phrase
//! lookup used when rendering statuses for humans.

pub use http::StatusCode;

/// Canonical reason phrase for `code`, e.g. `"Not Found"` for 404.
pub fn status_phrase(code: StatusCode) -> Option<&'static str> {
    code.canonical_reason()
}
