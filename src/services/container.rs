//! Service Container - Centralized service access.
//!
//! Wires concrete services to the persistence layer and external
//! collaborators in one place, so the rest of the application only ever
//! sees the service traits.

use std::sync::Arc;

use super::{AuthService, BlogService, CommentService, TokenService};
use crate::config::Config;
use crate::infra::{AssetStore, Persistence};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get blog service
    fn blogs(&self) -> Arc<dyn BlogService>;

    /// Get comment service
    fn comments(&self) -> Arc<dyn CommentService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    blog_service: Arc<dyn BlogService>,
    comment_service: Arc<dyn CommentService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        blog_service: Arc<dyn BlogService>,
        comment_service: Arc<dyn CommentService>,
    ) -> Self {
        Self {
            auth_service,
            blog_service,
            comment_service,
        }
    }

    /// Create service container from a database connection, the asset host
    /// client and configuration
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        assets: Arc<dyn AssetStore>,
        config: &Config,
    ) -> Self {
        use super::{Authenticator, BlogManager, CommentManager};

        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), TokenService::new(config)));
        let blog_service = Arc::new(BlogManager::new(
            uow.clone(),
            assets,
            config.asset_folder.clone(),
        ));
        let comment_service = Arc::new(CommentManager::new(uow));

        Self {
            auth_service,
            blog_service,
            comment_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn blogs(&self) -> Arc<dyn BlogService> {
        self.blog_service.clone()
    }

    fn comments(&self) -> Arc<dyn CommentService> {
        self.comment_service.clone()
    }
}
