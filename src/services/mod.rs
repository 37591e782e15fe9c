//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, with the Unit of Work providing repository
//! access.

mod auth_service;
mod blog_service;
mod comment_service;
pub mod container;
mod token;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, TokenPair};
pub use blog_service::{
    BlogListQuery, BlogManager, BlogService, CreateBlogData, ImageUpload, UpdateBlogData,
};
pub use comment_service::{CommentManager, CommentService};
pub use token::{Claims, TokenService};
