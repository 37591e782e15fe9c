//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::TokenPair;
use crate::types::ApiResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Unique username
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    #[schema(example = "jdoe")]
    pub username: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "pw123456", min_length = 8)]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[validate(length(min = 1, message = "Email and password are required."))]
    #[schema(example = "pw123456")]
    pub password: String,
}

/// Refresh / logout request carrying the refresh token in the body
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// The refresh token issued at login
    #[validate(length(min = 1, message = "Refresh token is required."))]
    pub refresh_token: String,
}

/// Refresh response payload: a fresh access token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenData {
    pub access_token: String,
}

/// Create authentication routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout));

    let guarded = Router::new()
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(guarded)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state
        .auth_service
        .register(payload.username, payload.email, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "User registered successfully",
            UserResponse::from(user),
        )),
    ))
}

/// Login and get an access/refresh token pair
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenPair),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "No account for this email")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let tokens = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(ApiResponse::success("Login successful", tokens)))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh-token",
    tag = "Authentication",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Access token refreshed successfully", body = AccessTokenData),
        (status = 400, description = "Refresh token missing"),
        (status = 401, description = "Invalid, expired or superseded refresh token")
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<ApiResponse<AccessTokenData>>> {
    let access_token = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::success(
        "Access token refreshed successfully",
        AccessTokenData { access_token },
    )))
}

/// Invalidate the session holding this refresh token
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Logged out successfully"),
        (status = 400, description = "Refresh token missing"),
        (status = 404, description = "No session holds this refresh token")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.auth_service.logout(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::message("Logged out successfully")))
}

/// Get the authenticated caller's profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/profile",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User profile fetched successfully", body = UserResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 404, description = "Token user no longer exists")
    )
)]
pub async fn profile(
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    Ok(Json(ApiResponse::success(
        "User profile fetched successfully",
        UserResponse::from(current_user),
    )))
}
