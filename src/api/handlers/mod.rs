//! HTTP request handlers.

pub mod auth_handler;
pub mod blog_handler;
pub mod comment_handler;

pub use auth_handler::auth_routes;
pub use blog_handler::blog_routes;
pub use comment_handler::comment_routes;

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Parse a path/body resource id.
///
/// A malformed id cannot reference any resource, so it reports NotFound
/// rather than a validation error.
pub(crate) fn parse_resource_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_id() {
        assert!(parse_resource_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(matches!(
            parse_resource_id("not-a-uuid"),
            Err(AppError::NotFound)
        ));
    }
}
