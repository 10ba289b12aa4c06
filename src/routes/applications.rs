use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::applications::{
        ApplicationList, ApplicationStatusUpdate, CreateApplicationRequest,
        UpdateApplicationStatusRequest,
    },
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    middleware::auth::AuthUser,
    models::AdoptionApplication,
    response::ApiResponse,
    routes::params::ApplicationListQuery,
    services::application_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/adoption-application",
            get(list_applications).post(create_application),
        )
        .route("/adoption-application/list", get(list_applications))
        .route(
            "/adoption-application/{id}",
            get(get_application).delete(delete_application),
        )
        .route(
            "/adoption-application/{id}/update-status",
            patch(update_application_status),
        )
        .route(
            "/admin/adoption-application/list",
            get(admin_list_applications),
        )
}

#[utoipa::path(
    post,
    path = "/api/adoption-application/",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApiResponse<AdoptionApplication>),
        (status = 400, description = "Pet is not available"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pet not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Adoption Applications"
)]
pub async fn create_application(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateApplicationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AdoptionApplication>>)> {
    let resp = application_service::create_application(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/adoption-application/list/",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "Own applications, or all of them for admins", body = ApiResponse<ApplicationList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Adoption Applications"
)]
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<ApplicationListQuery>,
) -> AppResult<Json<ApiResponse<ApplicationList>>> {
    let resp = application_service::list_applications(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/adoption-application/list/",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "All applications", body = ApiResponse<ApplicationList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn admin_list_applications(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<ApplicationListQuery>,
) -> AppResult<Json<ApiResponse<ApplicationList>>> {
    let resp = application_service::admin_list_applications(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/adoption-application/{id}/",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application", body = ApiResponse<AdoptionApplication>),
        (status = 403, description = "Not the applicant"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Adoption Applications"
)]
pub async fn get_application(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<AdoptionApplication>>> {
    let resp = application_service::get_application(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/adoption-application/{id}/",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Not the applicant"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Adoption Applications"
)]
pub async fn delete_application(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = application_service::delete_application(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/adoption-application/{id}/update-status/",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "Status updated and pet status cascaded", body = ApiResponse<ApplicationStatusUpdate>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateApplicationStatusRequest>,
) -> AppResult<Json<ApiResponse<ApplicationStatusUpdate>>> {
    let resp = application_service::update_application_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
