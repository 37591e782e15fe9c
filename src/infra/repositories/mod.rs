//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod blog_repository;
mod comment_repository;
pub(crate) mod entities;
mod user_repository;

pub use blog_repository::{BlogFilter, BlogRepository, BlogStore, NewBlog, SortDirection};
pub use comment_repository::{CommentRepository, CommentStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use blog_repository::MockBlogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use comment_repository::MockCommentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
