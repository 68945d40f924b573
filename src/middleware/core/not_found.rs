use crate::middleware::types::{MiddlewareResponse, MiddlewareResponseBody};
use crate::status::StatusCode;

/// Creates a 404 response naming `path`.
///
/// The path is used verbatim, including an empty string or a query suffix.
///
/// # Example
///
/// ```rust
/// use stins::{create_not_found_response, StatusCode};
///
/// let response = create_not_found_response("/api/users/123");
/// assert_eq!(response.status, StatusCode::NOT_FOUND);
/// assert_eq!(response.body.message, "Not Found: /api/users/123");
/// ```
pub fn create_not_found_response(path: &str) -> MiddlewareResponse {
    MiddlewareResponse::new(
        StatusCode::NOT_FOUND,
        MiddlewareResponseBody::message(format!("Not Found: {}", path)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_404() {
        assert_eq!(create_not_found_response("/api/users").status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_paths_are_verbatim() {
        for (path, message) in [
            ("/", "Not Found: /"),
            ("", "Not Found: "),
            ("/api/search?q=test", "Not Found: /api/search?q=test"),
        ] {
            let response = create_not_found_response(path);
            assert_eq!(response.body.message, message);
            assert_eq!(response.body.errors, None);
            assert_eq!(response.body.stack, None);
        }
    }
}
