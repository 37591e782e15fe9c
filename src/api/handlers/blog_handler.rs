//! Blog handlers.

use axum::{
    extract::{Extension, Multipart, Path, Query, State},
    middleware,
    response::Json,
    routing::{get, patch, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::parse_resource_id;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::config::{ALLOWED_IMAGE_FORMATS, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_IMAGE_BYTES};
use crate::domain::{Author, BlogResponse, BlogStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::SortDirection;
use crate::services::{BlogListQuery, CreateBlogData, ImageUpload, UpdateBlogData};
use crate::types::{ApiResponse, PaginatedResponse, PaginationMeta, PaginationParams};

/// Query parameters for the blog list endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Case-insensitive search over title, short description and content
    pub search: Option<String>,
    /// Filter by publication status (`draft` or `published`)
    pub status: Option<String>,
    /// Sort by creation time: `asc` or `desc` (default)
    pub sort_order: Option<String>,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Blog update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    #[validate(length(min = 1, message = "Title, content, and short description are required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Title, content, and short description are required"))]
    pub short_description: String,
    #[validate(length(min = 1, message = "Title, content, and short description are required"))]
    pub content: String,
    /// Tags to append to the existing tag list
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Publish / unpublish request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// Id of the blog to change
    #[validate(length(min = 1, message = "Blog ID is required"))]
    pub blog_id: String,
}

/// Minimal payload naming the affected blog
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogIdData {
    pub blog_id: Uuid,
}

/// Payload for publish/unpublish responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogStatusData {
    pub blog_id: Uuid,
    pub status: BlogStatus,
}

/// Payload for like/unlike responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogLikesData {
    pub blog_id: Uuid,
    pub total_likes: u64,
}

/// Create blog routes
pub fn blog_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_blogs))
        .route("/:slug", get(get_blog_by_slug));

    let guarded = Router::new()
        .route("/", post(create_blog))
        .route("/:slug", put(update_blog).delete(delete_blog))
        .route("/publish", post(publish_blog))
        .route("/unpublish", post(unpublish_blog))
        .route("/like/:id", patch(like_blog))
        .route("/unlike/:id", patch(unlike_blog))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(guarded)
}

/// List blogs with pagination, search, status filter and sorting
#[utoipa::path(
    get,
    path = "/api/v1/blogs",
    tag = "Blogs",
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<u64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Case-insensitive search term"),
        ("status" = Option<String>, Query, description = "draft or published"),
        ("sortOrder" = Option<String>, Query, description = "asc or desc by creation time")
    ),
    responses(
        (status = 200, description = "Blogs fetched successfully", body = [BlogResponse])
    )
)]
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(params): Query<BlogListParams>,
) -> AppResult<Json<PaginatedResponse<BlogResponse>>> {
    let pagination = PaginationParams {
        page: params.page,
        limit: params.limit,
    };

    let query = BlogListQuery {
        search: params.search,
        status: params.status.as_deref().and_then(BlogStatus::parse),
        sort: params.sort_order.as_deref().map(|order| {
            if order == "asc" {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            }
        }),
        pagination: pagination.clone(),
    };

    let (rows, total) = state.blog_service.list_blogs(query).await?;

    let data = rows
        .into_iter()
        .map(|(blog, author)| BlogResponse::new(blog, author))
        .collect();

    Ok(Json(PaginatedResponse::success(
        "Blogs fetched successfully",
        data,
        PaginationMeta::new(pagination.page, pagination.limit(), total),
    )))
}

/// Create a new blog (multipart: text fields plus an optional image)
#[utoipa::path(
    post,
    path = "/api/v1/blogs",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Blog created successfully", body = BlogResponse),
        (status = 400, description = "Missing required field or bad image"),
        (status = 401, description = "Missing or invalid access token")
    )
)]
pub async fn create_blog(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<BlogResponse>>> {
    let data = read_blog_form(multipart).await?;

    let blog = state.blog_service.create_blog(current_user.id, data).await?;

    let author = Author {
        id: current_user.id,
        username: current_user.username,
    };

    Ok(Json(ApiResponse::success(
        "Blog created successfully",
        BlogResponse::new(blog, Some(author)),
    )))
}

/// Update a blog (author only)
#[utoipa::path(
    put,
    path = "/api/v1/blogs/{id}",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog updated successfully", body = BlogIdData),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "Caller does not own this blog"),
        (status = 404, description = "Blog not found")
    )
)]
pub async fn update_blog(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateBlogRequest>,
) -> AppResult<Json<ApiResponse<BlogIdData>>> {
    let blog_id = parse_resource_id(&id)?;

    let blog = state
        .blog_service
        .update_blog(
            current_user.id,
            blog_id,
            UpdateBlogData {
                title: payload.title,
                short_description: payload.short_description,
                content: payload.content,
                tags: payload.tags,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(
        "Blog updated successfully",
        BlogIdData { blog_id: blog.id },
    )))
}

/// Delete a blog and its hosted image (author only)
#[utoipa::path(
    delete,
    path = "/api/v1/blogs/{id}",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted successfully", body = BlogIdData),
        (status = 401, description = "Caller does not own this blog"),
        (status = 404, description = "Blog not found")
    )
)]
pub async fn delete_blog(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BlogIdData>>> {
    let blog_id = parse_resource_id(&id)?;

    state.blog_service.delete_blog(current_user.id, blog_id).await?;

    Ok(Json(ApiResponse::success(
        "Blog deleted successfully",
        BlogIdData { blog_id },
    )))
}

/// Fetch a single blog by its slug
#[utoipa::path(
    get,
    path = "/api/v1/blogs/{slug}",
    tag = "Blogs",
    params(("slug" = String, Path, description = "Blog slug")),
    responses(
        (status = 200, description = "Blog fetched successfully", body = BlogResponse),
        (status = 404, description = "Blog not found")
    )
)]
pub async fn get_blog_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<BlogResponse>>> {
    let (blog, author) = state.blog_service.get_blog_by_slug(&slug).await?;

    Ok(Json(ApiResponse::success(
        "Blog fetched successfully",
        BlogResponse::new(blog, author),
    )))
}

/// Publish a draft blog
#[utoipa::path(
    post,
    path = "/api/v1/blogs/publish",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Blog published successfully", body = BlogStatusData),
        (status = 400, description = "Blog is already published"),
        (status = 404, description = "Blog not found")
    )
)]
pub async fn publish_blog(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PublishRequest>,
) -> AppResult<Json<ApiResponse<BlogStatusData>>> {
    let blog_id = parse_resource_id(&payload.blog_id)?;

    let blog = state.blog_service.publish_blog(blog_id).await?;

    Ok(Json(ApiResponse::success(
        "Blog published successfully",
        BlogStatusData {
            blog_id: blog.id,
            status: blog.status,
        },
    )))
}

/// Move a published blog back to draft
#[utoipa::path(
    post,
    path = "/api/v1/blogs/unpublish",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Blog unpublished successfully", body = BlogStatusData),
        (status = 400, description = "Blog is already in draft status"),
        (status = 404, description = "Blog not found")
    )
)]
pub async fn unpublish_blog(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PublishRequest>,
) -> AppResult<Json<ApiResponse<BlogStatusData>>> {
    let blog_id = parse_resource_id(&payload.blog_id)?;

    let blog = state.blog_service.unpublish_blog(blog_id).await?;

    Ok(Json(ApiResponse::success(
        "Blog unpublished successfully",
        BlogStatusData {
            blog_id: blog.id,
            status: blog.status,
        },
    )))
}

/// Like a blog
#[utoipa::path(
    patch,
    path = "/api/v1/blogs/like/{id}",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog liked successfully", body = BlogLikesData),
        (status = 400, description = "Already liked"),
        (status = 404, description = "Blog not found")
    )
)]
pub async fn like_blog(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BlogLikesData>>> {
    let blog_id = parse_resource_id(&id)?;

    let total_likes = state.blog_service.like_blog(current_user.id, blog_id).await?;

    Ok(Json(ApiResponse::success(
        "Blog liked successfully",
        BlogLikesData {
            blog_id,
            total_likes,
        },
    )))
}

/// Remove a like from a blog
#[utoipa::path(
    patch,
    path = "/api/v1/blogs/unlike/{id}",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog unliked successfully", body = BlogLikesData),
        (status = 400, description = "Not previously liked"),
        (status = 404, description = "Blog not found")
    )
)]
pub async fn unlike_blog(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BlogLikesData>>> {
    let blog_id = parse_resource_id(&id)?;

    let total_likes = state
        .blog_service
        .unlike_blog(current_user.id, blog_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Blog unliked successfully",
        BlogLikesData {
            blog_id,
            total_likes,
        },
    )))
}

/// Read the multipart blog form: text fields plus an optional image.
async fn read_blog_form(mut multipart: Multipart) -> AppResult<CreateBlogData> {
    let mut title = None;
    let mut short_description = None;
    let mut content = None;
    let mut tags_raw = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = Some(read_text_field(field).await?),
            "shortDescription" => short_description = Some(read_text_field(field).await?),
            "content" => content = Some(read_text_field(field).await?),
            "tags" => tags_raw = Some(read_text_field(field).await?),
            "image" => image = Some(read_image_field(field).await?),
            _ => {}
        }
    }

    let title = require_field(title)?;
    let short_description = require_field(short_description)?;
    let content = require_field(content)?;

    let tags: Vec<String> = serde_json::from_str(tags_raw.as_deref().unwrap_or("[]"))
        .map_err(|_| AppError::validation("tags must be a JSON array of strings"))?;

    Ok(CreateBlogData {
        title,
        short_description,
        content,
        tags,
        image,
    })
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart field: {}", e)))
}

async fn read_image_field(
    field: axum::extract::multipart::Field<'_>,
) -> AppResult<ImageUpload> {
    let filename = field.file_name().unwrap_or("image").to_string();

    let extension = std::path::Path::new(&filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !ALLOWED_IMAGE_FORMATS.contains(&extension.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported image format: {}. Supported: {}",
            extension,
            ALLOWED_IMAGE_FORMATS.join(", ")
        )));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::validation(format!("Failed to read image: {}", e)))?;

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::validation(format!(
            "Image too large: {} bytes (max {})",
            bytes.len(),
            MAX_IMAGE_BYTES
        )));
    }

    Ok(ImageUpload {
        filename,
        bytes: bytes.to_vec(),
    })
}

fn require_field(value: Option<String>) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation("Title, content, and short description are required"))
}
