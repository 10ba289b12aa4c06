use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::pets::{CreatePetRequest, PetList, UpdatePetRequest},
    entity::{
        AdoptionStatus, Gender, PetType, Pets, Shelters,
        pets::{ActiveModel as PetActive, Column as PetCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Pet,
    response::{ApiResponse, Meta},
    routes::params::PetQuery,
    state::AppState,
    validation::{FieldValidator, PET_NAME_MAX_LEN, parse_choice},
};

pub async fn list_pets(state: &AppState, query: PetQuery) -> AppResult<ApiResponse<PetList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(raw) = query.pet_type.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(PetCol::PetType.eq(parse_choice::<PetType>("pet_type", raw)?));
    }
    if let Some(raw) = query.gender.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(PetCol::Gender.eq(parse_choice::<Gender>("gender", raw)?));
    }
    if let Some(raw) = query.adoption_status.as_deref().filter(|s| !s.is_empty()) {
        condition = condition.add(
            PetCol::AdoptionStatus.eq(parse_choice::<AdoptionStatus>("adoption_status", raw)?),
        );
    }
    if let Some(shelter_id) = query.shelter_id {
        condition = condition.add(PetCol::ShelterId.eq(shelter_id));
    }

    let finder = Pets::find()
        .filter(condition)
        .order_by_desc(PetCol::CreatedAt)
        .order_by_asc(PetCol::Id);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .find_also_related(Shelters)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(pet, shelter)| Pet::with_shelter(pet, shelter))
        .collect();

    Ok(ApiResponse::paged("OK", PetList { items }, page, limit, total))
}

pub async fn get_pet(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Pet>> {
    let found = Pets::find_by_id(id)
        .find_also_related(Shelters)
        .one(&state.orm)
        .await?;
    let (pet, shelter) = found.ok_or(AppError::NotFound("Pet"))?;

    Ok(ApiResponse::success(
        "OK",
        Pet::with_shelter(pet, shelter),
        Some(Meta::empty()),
    ))
}

pub async fn create_pet(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePetRequest,
) -> AppResult<ApiResponse<Pet>> {
    ensure_admin(user)?;

    let mut validator = FieldValidator::new();

    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    validator
        .require("name", name)
        .max_len("name", name, PET_NAME_MAX_LEN);

    match payload.age {
        Some(age) if age <= 0 => {
            validator.add("age", "Age must be greater than 0.");
        }
        None => {
            validator.add("age", "This field is required.");
        }
        _ => {}
    }

    let gender = match payload.gender.as_deref() {
        Some(raw) => validator.choice::<Gender>("gender", raw),
        None => {
            validator.add("gender", "This field is required.");
            None
        }
    };
    let pet_type = match payload.pet_type.as_deref() {
        Some(raw) => validator.choice::<PetType>("pet_type", raw),
        None => Some(PetType::Dog),
    };
    let adoption_status = match payload.adoption_status.as_deref() {
        Some(raw) => validator.choice::<AdoptionStatus>("adoption_status", raw),
        None => Some(AdoptionStatus::Available),
    };
    if payload.shelter_id.is_none() {
        validator.add("shelter_id", "This field is required.");
    }

    validator.finish()?;

    // All of these were checked by the validator above.
    let (Some(age), Some(gender), Some(pet_type), Some(adoption_status), Some(shelter_id)) = (
        payload.age,
        gender,
        pet_type,
        adoption_status,
        payload.shelter_id,
    ) else {
        return Err(AppError::BadRequest("Invalid pet payload".into()));
    };

    let shelter = Shelters::find_by_id(shelter_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Shelter"))?;

    let now = Utc::now();
    let pet = PetActive {
        id: Set(Uuid::new_v4()),
        shelter_id: Set(shelter.id),
        name: Set(name.to_string()),
        age: Set(age),
        gender: Set(gender),
        domesticated: Set(payload.domesticated.unwrap_or(false)),
        pet_type: Set(pet_type),
        adoption_status: Set(adoption_status),
        image: Set(payload.image.filter(|i| !i.trim().is_empty())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(pet_id = %pet.id, shelter_id = %shelter.id, "pet registered");

    Ok(ApiResponse::success(
        "Pet created",
        Pet::with_shelter(pet, Some(shelter)),
        Some(Meta::empty()),
    ))
}

pub async fn update_pet(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdatePetRequest,
) -> AppResult<ApiResponse<Pet>> {
    ensure_admin(user)?;

    let existing = Pets::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Pet"))?;

    if let Some(shelter_id) = payload.shelter_id {
        let exists = Shelters::find_by_id(shelter_id).one(&state.orm).await?.is_some();
        if !exists {
            return Err(AppError::NotFound("Shelter"));
        }
    }

    let mut active: PetActive = existing.into();
    apply_pet_update(&mut active, payload)?;
    active.updated_at = Set(Utc::now().into());
    let pet = active.update(&state.orm).await?;

    let shelter = Shelters::find_by_id(pet.shelter_id).one(&state.orm).await?;

    tracing::info!(pet_id = %pet.id, status = ?pet.adoption_status, "pet updated");

    Ok(ApiResponse::success(
        "Pet updated",
        Pet::with_shelter(pet, shelter),
        Some(Meta::empty()),
    ))
}

pub async fn delete_pet(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;

    let result = Pets::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Pet"));
    }

    tracing::info!(pet_id = %id, "pet deleted");
    Ok(())
}

/// Copy the allowed fields of a partial update onto the active model.
///
/// Only the fields listed here can change; everything else on the row,
/// such as `id` and `created_at`, stays as loaded. An empty `image` is
/// ignored rather than clearing the stored reference.
pub fn apply_pet_update(active: &mut PetActive, payload: UpdatePetRequest) -> AppResult<()> {
    let mut validator = FieldValidator::new();

    if let Some(name) = payload.name {
        let name = name.trim();
        if name.is_empty() {
            validator.add("name", "This field may not be blank.");
        } else if name.chars().count() > PET_NAME_MAX_LEN {
            validator.max_len("name", name, PET_NAME_MAX_LEN);
        } else {
            active.name = Set(name.to_string());
        }
    }
    if let Some(age) = payload.age {
        if age <= 0 {
            validator.add("age", "Age must be greater than 0.");
        } else {
            active.age = Set(age);
        }
    }
    if let Some(raw) = payload.gender.as_deref() {
        if let Some(gender) = validator.choice::<Gender>("gender", raw) {
            active.gender = Set(gender);
        }
    }
    if let Some(raw) = payload.pet_type.as_deref() {
        if let Some(pet_type) = validator.choice::<PetType>("pet_type", raw) {
            active.pet_type = Set(pet_type);
        }
    }
    if let Some(raw) = payload.adoption_status.as_deref() {
        if let Some(status) = validator.choice::<AdoptionStatus>("adoption_status", raw) {
            active.adoption_status = Set(status);
        }
    }
    if let Some(domesticated) = payload.domesticated {
        active.domesticated = Set(domesticated);
    }
    if let Some(shelter_id) = payload.shelter_id {
        active.shelter_id = Set(shelter_id);
    }
    if let Some(image) = payload.image.filter(|i| !i.trim().is_empty()) {
        active.image = Set(Some(image));
    }

    validator.finish()
}

