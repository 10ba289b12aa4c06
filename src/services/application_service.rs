use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::applications::{
        ApplicationList, ApplicationStatusUpdate, CreateApplicationRequest,
        UpdateApplicationStatusRequest,
    },
    entity::{
        AdoptionApplications, ApplicationStatus, Pets, Users,
        adoption_applications::{self, ActiveModel as ApplicationActive, Column as ApplicationCol},
        pets::{self, ActiveModel as PetActive},
        users::{self, Column as UserCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_owner_or_admin},
    models::AdoptionApplication,
    response::{ApiResponse, Meta},
    routes::params::ApplicationListQuery,
    state::AppState,
    validation::parse_choice,
    workflow::{PET_STATUS_ON_SUBMISSION, ensure_pet_available, parse_application_status, pet_status_after},
};

/// Submit an application for an available pet and put the pet on hold.
pub async fn create_application(
    state: &AppState,
    user: &AuthUser,
    payload: CreateApplicationRequest,
) -> AppResult<ApiResponse<AdoptionApplication>> {
    let txn = state.orm.begin().await?;

    let pet = Pets::find_by_id(payload.pet_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Pet"))?;

    ensure_pet_available(pet.adoption_status)?;

    let now = Utc::now();
    let application = ApplicationActive {
        id: Set(Uuid::new_v4()),
        pet_id: Set(pet.id),
        adopter_user_id: Set(user.user_id),
        application_status: Set(ApplicationStatus::Pending),
        message: Set(payload.message.filter(|m| !m.trim().is_empty())),
        submission_date: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let mut pet_active: PetActive = pet.into();
    pet_active.adoption_status = Set(PET_STATUS_ON_SUBMISSION);
    pet_active.updated_at = Set(now.into());
    let pet = pet_active.update(&txn).await?;

    let adopter = Users::find_by_id(user.user_id).one(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        application_id = %application.id,
        pet_id = %pet.id,
        adopter_id = %user.user_id,
        "adoption application submitted"
    );

    Ok(ApiResponse::success(
        "Adoption application created",
        AdoptionApplication::with_relations(application, Some(&pet), adopter.as_ref()),
        Some(Meta::empty()),
    ))
}

/// Record an admin decision and mirror it onto the pet in the same transaction.
pub async fn update_application_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateApplicationStatusRequest,
) -> AppResult<ApiResponse<ApplicationStatusUpdate>> {
    ensure_admin(user)?;
    let new_status = parse_application_status(&payload.application_status)?;

    let txn = state.orm.begin().await?;

    let application = AdoptionApplications::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Adoption application"))?;
    let pet_id = application.pet_id;
    let now = Utc::now();

    let mut active: ApplicationActive = application.into();
    active.application_status = Set(new_status);
    active.updated_at = Set(now.into());
    let application = active.update(&txn).await?;

    let pet = Pets::find_by_id(pet_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "adoption application {id} references missing pet {pet_id}"
            ))
        })?;

    let pet = match pet_status_after(new_status) {
        Some(pet_status) => {
            let mut pet_active: PetActive = pet.into();
            pet_active.adoption_status = Set(pet_status);
            pet_active.updated_at = Set(now.into());
            pet_active.update(&txn).await?
        }
        None => pet,
    };

    let adopter = Users::find_by_id(application.adopter_user_id).one(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        application_id = %application.id,
        status = ?new_status,
        pet_id = %pet.id,
        pet_status = ?pet.adoption_status,
        decided_by = %user.user_id,
        "application status updated"
    );

    let data = ApplicationStatusUpdate {
        pet_id: pet.id,
        pet_adoption_status: pet.adoption_status,
        application: AdoptionApplication::with_relations(application, Some(&pet), adopter.as_ref()),
    };

    Ok(ApiResponse::success(
        "Application status updated successfully",
        data,
        Some(Meta::empty()),
    ))
}

/// Admins see every application; everyone else sees only their own.
pub async fn list_applications(
    state: &AppState,
    user: &AuthUser,
    query: ApplicationListQuery,
) -> AppResult<ApiResponse<ApplicationList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if !user.is_admin() {
        condition = condition.add(ApplicationCol::AdopterUserId.eq(user.user_id));
    }
    if let Some(raw) = query.status.as_deref().filter(|s| !s.is_empty()) {
        let status = parse_choice::<ApplicationStatus>("status", raw)?;
        condition = condition.add(ApplicationCol::ApplicationStatus.eq(status));
    }

    let finder = AdoptionApplications::find()
        .filter(condition)
        .order_by_desc(ApplicationCol::SubmissionDate)
        .order_by_asc(ApplicationCol::Id);

    let total = finder.clone().count(&state.orm).await?;

    let rows = finder
        .find_also_related(Pets)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let adopter_ids: Vec<Uuid> = rows.iter().map(|(app, _)| app.adopter_user_id).collect();
    let adopters = load_users(&state.orm, adopter_ids).await?;

    let items = rows
        .into_iter()
        .map(|(app, pet)| {
            let adopter = adopters.get(&app.adopter_user_id);
            AdoptionApplication::with_relations(app, pet.as_ref(), adopter)
        })
        .collect();

    Ok(ApiResponse::paged(
        "OK",
        ApplicationList { items },
        page,
        limit,
        total,
    ))
}

pub async fn admin_list_applications(
    state: &AppState,
    user: &AuthUser,
    query: ApplicationListQuery,
) -> AppResult<ApiResponse<ApplicationList>> {
    ensure_admin(user)?;
    list_applications(state, user, query).await
}

pub async fn get_application(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<AdoptionApplication>> {
    let (application, pet) = find_with_pet(state, id).await?;
    ensure_owner_or_admin(user, application.adopter_user_id)?;

    let adopter = Users::find_by_id(application.adopter_user_id)
        .one(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "OK",
        AdoptionApplication::with_relations(application, pet.as_ref(), adopter.as_ref()),
        Some(Meta::empty()),
    ))
}

/// Withdraw an application. The pet's status is left as it is.
pub async fn delete_application(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let application = AdoptionApplications::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Adoption application"))?;
    ensure_owner_or_admin(user, application.adopter_user_id)?;

    AdoptionApplications::delete_by_id(application.id)
        .exec(&state.orm)
        .await?;

    tracing::info!(application_id = %id, deleted_by = %user.user_id, "adoption application deleted");

    Ok(ApiResponse::message(
        "Adoption application deleted successfully.",
    ))
}

async fn find_with_pet(
    state: &AppState,
    id: Uuid,
) -> AppResult<(adoption_applications::Model, Option<pets::Model>)> {
    AdoptionApplications::find_by_id(id)
        .find_also_related(Pets)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Adoption application"))
}

async fn load_users<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, users::Model>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let users = Users::find()
        .filter(UserCol::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    Ok(users)
}
