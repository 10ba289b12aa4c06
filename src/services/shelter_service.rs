use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    dto::shelters::{
        CreateShelterManagementRequest, CreateShelterRequest, ShelterList,
        UpdateShelterManagementRequest, UpdateShelterRequest,
    },
    entity::{
        ShelterManagements, Shelters,
        shelter_managements::{self, ActiveModel as ManagementActive},
        shelters::{ActiveModel as ShelterActive, Column as ShelterCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Shelter, ShelterManagement},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
    validation::{
        FieldValidator, PHONE_MAX_LEN, SHELTER_NAME_MAX_LEN, field_error, is_digits, is_web_url,
    },
};

/// Create a shelter and, when a manager is given, assign them to it.
///
/// The manager is resolved by the caller (normally the root admin) so that
/// this function never looks up an implicit "current admin" on its own.
pub async fn create_shelter(
    state: &AppState,
    user: &AuthUser,
    payload: CreateShelterRequest,
    manager_id: Option<Uuid>,
) -> AppResult<ApiResponse<Shelter>> {
    ensure_admin(user)?;

    let mut validator = FieldValidator::new();
    validator
        .require("name", &payload.name)
        .require("address", &payload.address)
        .max_len("name", &payload.name, SHELTER_NAME_MAX_LEN);
    validate_phone(&mut validator, &payload.phone_number);
    let website_url = normalize_website(&mut validator, payload.website_url);
    validator.finish()?;

    let name = payload.name.trim().to_string();
    ensure_name_free(&state.orm, &name, None).await?;

    let txn = state.orm.begin().await?;
    let shelter = ShelterActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        address: Set(payload.address.trim().to_string()),
        phone_number: Set(payload.phone_number.trim().to_string()),
        website_url: Set(website_url),
        created_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(duplicate_name)?;

    if let Some(manager_id) = manager_id {
        ManagementActive {
            id: Set(Uuid::new_v4()),
            shelter_id: Set(shelter.id),
            admin_user_id: Set(manager_id),
            start_date: Set(Some(Utc::now().date_naive())),
            end_date: Set(None),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    tracing::info!(shelter_id = %shelter.id, manager_id = ?manager_id, "shelter created");

    Ok(ApiResponse::success(
        "Shelter created",
        shelter.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_shelters(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ShelterList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Shelters::find().order_by_asc(ShelterCol::Name);

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Shelter::from)
        .collect();

    Ok(ApiResponse::paged("OK", ShelterList { items }, page, limit, total))
}

pub async fn get_shelter(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Shelter>> {
    let shelter = Shelters::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Shelter"))?;
    Ok(ApiResponse::success("OK", shelter.into(), Some(Meta::empty())))
}

pub async fn update_shelter(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateShelterRequest,
) -> AppResult<ApiResponse<Shelter>> {
    ensure_admin(user)?;

    let existing = Shelters::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Shelter"))?;

    let mut validator = FieldValidator::new();
    let mut active: ShelterActive = existing.into();

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            validator.add("name", "This field may not be blank.");
        } else if name.chars().count() > SHELTER_NAME_MAX_LEN {
            validator.max_len("name", &name, SHELTER_NAME_MAX_LEN);
        } else {
            ensure_name_free(&state.orm, &name, Some(id)).await?;
            active.name = Set(name);
        }
    }
    if let Some(address) = payload.address {
        if address.trim().is_empty() {
            validator.add("address", "This field may not be blank.");
        } else {
            active.address = Set(address.trim().to_string());
        }
    }
    if let Some(phone) = payload.phone_number {
        validate_phone(&mut validator, &phone);
        active.phone_number = Set(phone.trim().to_string());
    }
    if payload.website_url.is_some() {
        active.website_url = Set(normalize_website(&mut validator, payload.website_url));
    }
    validator.finish()?;

    let shelter = active.update(&state.orm).await.map_err(duplicate_name)?;
    tracing::info!(shelter_id = %shelter.id, "shelter updated");

    Ok(ApiResponse::success(
        "Shelter updated",
        shelter.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_shelter(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;
    let result = Shelters::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Shelter"));
    }
    tracing::info!(shelter_id = %id, "shelter deleted");
    Ok(())
}

pub async fn create_management(
    state: &AppState,
    user: &AuthUser,
    payload: CreateShelterManagementRequest,
) -> AppResult<ApiResponse<ShelterManagement>> {
    ensure_admin(user)?;
    validate_date_range(payload.start_date, payload.end_date)?;

    let shelter_exists = Shelters::find_by_id(payload.shelter_id)
        .one(&state.orm)
        .await?
        .is_some();
    if !shelter_exists {
        return Err(AppError::NotFound("Shelter"));
    }

    let record = ManagementActive {
        id: Set(Uuid::new_v4()),
        shelter_id: Set(payload.shelter_id),
        admin_user_id: Set(user.user_id),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(management_id = %record.id, shelter_id = %record.shelter_id, "shelter manager assigned");

    Ok(ApiResponse::success(
        "Shelter management created",
        record.into(),
        Some(Meta::empty()),
    ))
}

pub async fn get_management(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ShelterManagement>> {
    ensure_admin(user)?;
    let record = find_management(state, id).await?;
    Ok(ApiResponse::success("OK", record.into(), Some(Meta::empty())))
}

pub async fn update_management(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateShelterManagementRequest,
) -> AppResult<ApiResponse<ShelterManagement>> {
    ensure_admin(user)?;
    let existing = find_management(state, id).await?;

    let start_date = payload.start_date.or(existing.start_date);
    let end_date = payload.end_date.or(existing.end_date);
    validate_date_range(start_date, end_date)?;

    if let Some(shelter_id) = payload.shelter_id {
        let exists = Shelters::find_by_id(shelter_id).one(&state.orm).await?.is_some();
        if !exists {
            return Err(AppError::NotFound("Shelter"));
        }
    }

    let mut active: ManagementActive = existing.into();
    if let Some(shelter_id) = payload.shelter_id {
        active.shelter_id = Set(shelter_id);
    }
    active.start_date = Set(start_date);
    active.end_date = Set(end_date);
    let record = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Shelter management updated",
        record.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_management(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;
    let result = ShelterManagements::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Shelter management"));
    }
    Ok(())
}

pub fn validate_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(field_error(
            "end_date",
            "End date must not be before the start date.",
        )),
        _ => Ok(()),
    }
}

async fn find_management(state: &AppState, id: Uuid) -> AppResult<shelter_managements::Model> {
    ShelterManagements::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Shelter management"))
}

async fn ensure_name_free<C: ConnectionTrait>(
    db: &C,
    name: &str,
    except: Option<Uuid>,
) -> AppResult<()> {
    let mut query = Shelters::find().filter(ShelterCol::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(ShelterCol::Id.ne(id));
    }
    if query.one(db).await?.is_some() {
        return Err(field_error("name", "A shelter with this name already exists."));
    }
    Ok(())
}

fn duplicate_name(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            field_error("name", "A shelter with this name already exists.")
        }
        _ => AppError::OrmError(err),
    }
}

fn validate_phone(validator: &mut FieldValidator, phone: &str) {
    if !is_digits(phone.trim()) {
        validator.add("phone_number", "Phone number must contain only digits.");
    }
    validator.max_len("phone_number", phone, PHONE_MAX_LEN);
}

fn normalize_website(validator: &mut FieldValidator, url: Option<String>) -> Option<String> {
    let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())?;
    if !is_web_url(&url) {
        validator.add("website_url", "Enter a valid URL.");
    }
    Some(url)
}
