//! Blog API - A JWT-authenticated blogging backend.
//!
//! Registration/login with access + refresh tokens, blog CRUD with image
//! upload to an external asset host, a publish/unpublish workflow, likes,
//! and per-blog comments. Authorization is enforced per-resource: only an
//! author may edit or delete their own content.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, Redis, asset host)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, response envelope)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Blog, BlogStatus, Comment, Password, User};
pub use errors::{AppError, AppResult};
