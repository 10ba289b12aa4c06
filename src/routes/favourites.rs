use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::favourites::{FavouriteAdded, FavouriteList},
    error::AppResult,
    extract::{AppPath, AppQuery},
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::favourite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favourite/{id}/add", post(add_favourite))
        .route("/favourite/{id}/remove", delete(remove_favourite))
        .route("/favourite/list", get(list_favourites))
}

#[utoipa::path(
    post,
    path = "/api/favourite/{id}/add/",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 201, description = "Added to favourites", body = ApiResponse<FavouriteAdded>),
        (status = 200, description = "Already a favourite", body = ApiResponse<FavouriteAdded>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pet not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
pub async fn add_favourite(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(pet_id): AppPath<Uuid>,
) -> AppResult<(StatusCode, Json<ApiResponse<FavouriteAdded>>)> {
    let resp = favourite_service::add_favourite(&state, &user, pet_id).await?;
    let status = match resp.data.as_ref() {
        Some(added) if added.created => StatusCode::CREATED,
        _ => StatusCode::OK,
    };
    Ok((status, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/favourite/{id}/remove/",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 204, description = "Removed from favourites"),
        (status = 404, description = "Favourite not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
pub async fn remove_favourite(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(pet_id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    favourite_service::remove_favourite(&state, &user, pet_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/favourite/list/",
    params(Pagination),
    responses(
        (status = 200, description = "Caller's favourite pets", body = ApiResponse<FavouriteList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Favourites"
)]
pub async fn list_favourites(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> AppResult<Json<ApiResponse<FavouriteList>>> {
    let resp = favourite_service::list_favourites(&state, &user, pagination).await?;
    Ok(Json(resp))
}
