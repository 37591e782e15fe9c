//! Unit of Work - centralized repository access.
//!
//! Services depend on this seam instead of concrete stores, which keeps
//! them testable with in-memory repositories. Each request runs its
//! operations independently; refresh-token writes for the same user are
//! last-writer-wins by design, so no transaction coordination is needed
//! here.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    BlogRepository, BlogStore, CommentRepository, CommentStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get blog repository
    fn blogs(&self) -> Arc<dyn BlogRepository>;

    /// Get comment repository
    fn comments(&self) -> Arc<dyn CommentRepository>;
}

/// Concrete implementation of UnitOfWork backed by the database
pub struct Persistence {
    user_repo: Arc<UserStore>,
    blog_repo: Arc<BlogStore>,
    comment_repo: Arc<CommentStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            blog_repo: Arc::new(BlogStore::new(db.clone())),
            comment_repo: Arc::new(CommentStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn blogs(&self) -> Arc<dyn BlogRepository> {
        self.blog_repo.clone()
    }

    fn comments(&self) -> Arc<dyn CommentRepository> {
        self.comment_repo.clone()
    }
}
