use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::pets::{CreatePetRequest, PetList, UpdatePetRequest},
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    middleware::auth::AuthUser,
    models::Pet,
    response::ApiResponse,
    routes::params::PetQuery,
    services::pet_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register-pet", post(create_pet))
        .route("/pets", get(list_pets))
        .route(
            "/pets/{id}",
            get(get_pet)
                .put(update_pet)
                .patch(update_pet)
                .delete(delete_pet),
        )
}

#[utoipa::path(
    get,
    path = "/api/pets/",
    params(PetQuery),
    responses(
        (status = 200, description = "List pets", body = ApiResponse<PetList>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "Pets"
)]
pub async fn list_pets(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PetQuery>,
) -> AppResult<Json<ApiResponse<PetList>>> {
    let resp = pet_service::list_pets(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/register-pet/",
    request_body = CreatePetRequest,
    responses(
        (status = 201, description = "Pet created", body = ApiResponse<Pet>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Shelter not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Pets"
)]
pub async fn create_pet(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreatePetRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Pet>>)> {
    let resp = pet_service::create_pet(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/pets/{id}/",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet", body = ApiResponse<Pet>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Pets"
)]
pub async fn get_pet(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = pet_service::get_pet(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/pets/{id}/",
    params(("id" = Uuid, Path, description = "Pet ID")),
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Pet updated (PUT behaves the same)", body = ApiResponse<Pet>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Pets"
)]
pub async fn update_pet(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdatePetRequest>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = pet_service::update_pet(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/pets/{id}/",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 204, description = "Pet deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Pets"
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    pet_service::delete_pet(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
