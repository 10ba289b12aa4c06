use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::auth::{RefreshRequest, RegisterAdminRequest, RegisterRequest, TokenPair, TokenRequest},
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::UserDetails,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/register/admin", post(register_admin))
        .route("/user/details", get(user_details))
        .route("/token", post(obtain_token))
        .route("/token/refresh", post(refresh_token))
}

#[utoipa::path(
    post,
    path = "/api/user/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register an adopter", body = ApiResponse<UserDetails>),
        (status = 400, description = "Validation error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserDetails>>)> {
    let resp = auth_service::register_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/user/register/admin/",
    request_body = RegisterAdminRequest,
    responses(
        (status = 201, description = "Register an admin user", body = ApiResponse<UserDetails>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn register_admin(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<RegisterAdminRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserDetails>>)> {
    let resp = auth_service::register_admin(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/user/details/",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDetails>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn user_details(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserDetails>>> {
    let resp = auth_service::user_details(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/token/",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Access and refresh tokens", body = ApiResponse<TokenPair>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn obtain_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TokenRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let resp = auth_service::obtain_tokens(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/token/refresh/",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Fresh token pair", body = ApiResponse<TokenPair>),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "Auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefreshRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let resp = auth_service::refresh_tokens(&state, payload).await?;
    Ok(Json(resp))
}
