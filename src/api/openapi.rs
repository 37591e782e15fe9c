//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, blog_handler, comment_handler};
use crate::domain::{Author, BlogResponse, BlogStatus, CommentResponse, UserResponse};
use crate::services::TokenPair;
use crate::types::PaginationMeta;

/// OpenAPI documentation for the blog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        version = "0.1.0",
        description = "Blogging REST API with JWT sessions, built on Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
        (url = "https://api.example.com", description = "Production server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::refresh_token,
        auth_handler::logout,
        auth_handler::profile,
        // Blog endpoints
        blog_handler::list_blogs,
        blog_handler::create_blog,
        blog_handler::update_blog,
        blog_handler::delete_blog,
        blog_handler::get_blog_by_slug,
        blog_handler::publish_blog,
        blog_handler::unpublish_blog,
        blog_handler::like_blog,
        blog_handler::unlike_blog,
        // Comment endpoints
        comment_handler::list_comments,
        comment_handler::add_comment,
        comment_handler::delete_comment,
    ),
    components(
        schemas(
            // Domain types
            Author,
            BlogStatus,
            BlogResponse,
            CommentResponse,
            UserResponse,
            PaginationMeta,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::RefreshTokenRequest,
            auth_handler::AccessTokenData,
            TokenPair,
            // Blog handler types
            blog_handler::UpdateBlogRequest,
            blog_handler::PublishRequest,
            blog_handler::BlogIdData,
            blog_handler::BlogStatusData,
            blog_handler::BlogLikesData,
            // Comment handler types
            comment_handler::CommentRequest,
            comment_handler::CommentIdData,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and session lifecycle"),
        (name = "Blogs", description = "Blog CRUD, publication workflow and likes"),
        (name = "Comments", description = "Per-blog comments")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT access token obtained from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
