use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::donations::{CreateDonationRequest, DonationList},
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    middleware::auth::AuthUser,
    models::Donation,
    response::ApiResponse,
    routes::params::Pagination,
    services::donation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/donate", post(create_donation))
        .route("/donations/list", get(list_donations))
        .route("/donations/{id}", get(get_donation))
}

#[utoipa::path(
    post,
    path = "/api/donate/",
    request_body = CreateDonationRequest,
    responses(
        (status = 201, description = "Donation recorded", body = ApiResponse<Donation>),
        (status = 400, description = "Missing or invalid shelter id or amount"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Shelter not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Donations"
)]
pub async fn create_donation(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateDonationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Donation>>)> {
    let resp = donation_service::create_donation(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/donations/{id}/",
    params(("id" = Uuid, Path, description = "Donation ID")),
    responses(
        (status = 200, description = "Donation", body = ApiResponse<Donation>),
        (status = 403, description = "Not the donor"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Donations"
)]
pub async fn get_donation(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Donation>>> {
    let resp = donation_service::get_donation(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/donations/list/",
    params(Pagination),
    responses(
        (status = 200, description = "Caller's donations", body = ApiResponse<DonationList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Donations"
)]
pub async fn list_donations(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> AppResult<Json<ApiResponse<DonationList>>> {
    let resp = donation_service::list_donations(&state, &user, pagination).await?;
    Ok(Json(resp))
}
