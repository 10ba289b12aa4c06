use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::shelters::{
        CreateShelterManagementRequest, CreateShelterRequest, ShelterList,
        UpdateShelterManagementRequest, UpdateShelterRequest,
    },
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Shelter, ShelterManagement},
    response::ApiResponse,
    routes::params::Pagination,
    services::{auth_service, shelter_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/shelter", post(create_shelter))
        .route("/admin/shelters", get(list_shelters))
        .route("/admin/shelter/list", get(list_shelters))
        .route(
            "/admin/shelter/{id}",
            get(get_shelter).put(update_shelter).delete(delete_shelter),
        )
        .route("/admin/shelter-management", post(create_management))
        .route(
            "/admin/shelter-management/{id}",
            get(get_management)
                .put(update_management)
                .delete(delete_management),
        )
}

#[utoipa::path(
    post,
    path = "/api/admin/shelter/",
    request_body = CreateShelterRequest,
    responses(
        (status = 201, description = "Shelter created and assigned to the root admin", body = ApiResponse<Shelter>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Shelters"
)]
pub async fn create_shelter(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateShelterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Shelter>>)> {
    ensure_admin(&user)?;
    let manager_id = auth_service::find_root_admin(&state.orm)
        .await?
        .map(|admin| admin.id);
    let resp = shelter_service::create_shelter(&state, &user, payload, manager_id).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/admin/shelters/",
    params(Pagination),
    responses(
        (status = 200, description = "List shelters", body = ApiResponse<ShelterList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Shelters"
)]
pub async fn list_shelters(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> AppResult<Json<ApiResponse<ShelterList>>> {
    let resp = shelter_service::list_shelters(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/shelter/{id}/",
    params(("id" = Uuid, Path, description = "Shelter ID")),
    responses(
        (status = 200, description = "Shelter", body = ApiResponse<Shelter>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shelters"
)]
pub async fn get_shelter(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Shelter>>> {
    let resp = shelter_service::get_shelter(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/shelter/{id}/",
    params(("id" = Uuid, Path, description = "Shelter ID")),
    request_body = UpdateShelterRequest,
    responses(
        (status = 200, description = "Shelter updated", body = ApiResponse<Shelter>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shelters"
)]
pub async fn update_shelter(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateShelterRequest>,
) -> AppResult<Json<ApiResponse<Shelter>>> {
    let resp = shelter_service::update_shelter(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/shelter/{id}/",
    params(("id" = Uuid, Path, description = "Shelter ID")),
    responses(
        (status = 204, description = "Shelter deleted with its pets and management records"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shelters"
)]
pub async fn delete_shelter(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    shelter_service::delete_shelter(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/admin/shelter-management/",
    request_body = CreateShelterManagementRequest,
    responses(
        (status = 201, description = "Caller assigned as shelter manager", body = ApiResponse<ShelterManagement>),
        (status = 400, description = "Invalid date range"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Shelter not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shelters"
)]
pub async fn create_management(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateShelterManagementRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ShelterManagement>>)> {
    let resp = shelter_service::create_management(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/admin/shelter-management/{id}/",
    params(("id" = Uuid, Path, description = "Shelter management ID")),
    responses(
        (status = 200, description = "Shelter management record", body = ApiResponse<ShelterManagement>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shelters"
)]
pub async fn get_management(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<ShelterManagement>>> {
    let resp = shelter_service::get_management(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/shelter-management/{id}/",
    params(("id" = Uuid, Path, description = "Shelter management ID")),
    request_body = UpdateShelterManagementRequest,
    responses(
        (status = 200, description = "Shelter management updated", body = ApiResponse<ShelterManagement>),
        (status = 400, description = "Invalid date range"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shelters"
)]
pub async fn update_management(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateShelterManagementRequest>,
) -> AppResult<Json<ApiResponse<ShelterManagement>>> {
    let resp = shelter_service::update_management(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/shelter-management/{id}/",
    params(("id" = Uuid, Path, description = "Shelter management ID")),
    responses(
        (status = 204, description = "Shelter management deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shelters"
)]
pub async fn delete_management(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    shelter_service::delete_management(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
