//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Redis cache (rate limiting)
//! - The external image asset host
//! - Unit of Work for repository access

pub mod assets;
pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use assets::{public_id_from_url, AssetStore, HttpAssetStore};
pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    BlogFilter, BlogRepository, BlogStore, CommentRepository, CommentStore, NewBlog,
    SortDirection, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use assets::MockAssetStore;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockBlogRepository, MockCommentRepository, MockUserRepository};
