//! Comment handlers.

use axum::{
    extract::{Extension, Path, State},
    middleware,
    response::Json,
    routing::get,
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
use crate::domain::{Author, CommentResponse};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// New comment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentRequest {
    /// Comment text
    #[validate(length(min = 1, message = "Comment content is required"))]
    #[schema(example = "Great post!")]
    pub content: String,
}

/// Minimal payload naming the affected comment
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentIdData {
    pub comment_id: Uuid,
}

/// Create comment routes.
///
/// The single path parameter is a blog id for GET/POST and a comment id
/// for DELETE, mirroring the public API shape.
pub fn comment_routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/:id", get(list_comments));

    let guarded = Router::new()
        .route("/:id", axum::routing::post(add_comment).delete(delete_comment))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(guarded)
}

/// List all comments for a blog
#[utoipa::path(
    get,
    path = "/api/v1/comments/{blogId}",
    tag = "Comments",
    params(("blogId" = String, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Comments fetched successfully", body = [CommentResponse]),
        (status = 404, description = "Malformed blog id")
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<CommentResponse>>>> {
    let blog_id = parse_resource_id(&blog_id)?;

    let comments = state.comment_service.list_comments(blog_id).await?;

    let data = comments
        .into_iter()
        .map(|(comment, author)| CommentResponse::new(comment, author))
        .collect();

    Ok(Json(ApiResponse::success(
        "Comments fetched successfully",
        data,
    )))
}

/// Add a comment to a blog
#[utoipa::path(
    post,
    path = "/api/v1/comments/{blogId}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("blogId" = String, Path, description = "Blog ID")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment added successfully", body = CommentResponse),
        (status = 400, description = "Missing content"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 404, description = "Blog not found")
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(blog_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CommentRequest>,
) -> AppResult<Json<ApiResponse<CommentResponse>>> {
    let blog_id = parse_resource_id(&blog_id)?;

    let comment = state
        .comment_service
        .add_comment(current_user.id, blog_id, payload.content)
        .await?;

    let author = Author {
        id: current_user.id,
        username: current_user.username,
    };

    Ok(Json(ApiResponse::success(
        "Comment added successfully",
        CommentResponse::new(comment, Some(author)),
    )))
}

/// Delete a comment (author only)
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{commentId}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("commentId" = String, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted successfully", body = CommentIdData),
        (status = 403, description = "Caller does not own this comment"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(comment_id): Path<String>,
) -> AppResult<Json<ApiResponse<CommentIdData>>> {
    let comment_id = parse_resource_id(&comment_id)?;

    state
        .comment_service
        .delete_comment(current_user.id, comment_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Comment deleted successfully",
        CommentIdData { comment_id },
    )))
}
