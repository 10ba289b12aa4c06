use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod applications;
pub mod auth;
pub mod doc;
pub mod donations;
pub mod favourites;
pub mod health;
pub mod params;
pub mod pets;
pub mod shelters;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(pets::router())
        .merge(applications::router())
        .merge(shelters::router())
        .merge(favourites::router())
        .merge(donations::router())
}

/// Full application router with state bound. Transport layers are added by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_check))
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

/// Routes are declared without a trailing slash; `/api/pets/` and `/api/pets` reach the same handler.
pub fn normalize(app: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
