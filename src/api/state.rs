//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{AssetStore, Cache, Database};
use crate::services::{AuthService, BlogService, CommentService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Blog service
    pub blog_service: Arc<dyn BlogService>,
    /// Comment service
    pub comment_service: Arc<dyn CommentService>,
    /// Redis cache (rate limiting, health)
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from infrastructure and config.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service wiring.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        assets: Arc<dyn AssetStore>,
        config: &Config,
    ) -> Self {
        let container = Services::from_connection(database.get_connection(), assets, config);

        Self {
            auth_service: container.auth(),
            blog_service: container.blogs(),
            comment_service: container.comments(),
            cache,
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        blog_service: Arc<dyn BlogService>,
        comment_service: Arc<dyn CommentService>,
        cache: Arc<Cache>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            blog_service,
            comment_service,
            cache,
            database,
        }
    }
}
