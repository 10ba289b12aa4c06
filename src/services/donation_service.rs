use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::donations::{CreateDonationRequest, DonationList},
    entity::{
        Donations, Shelters,
        donations::{ActiveModel as DonationActive, Column as DonationCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner_or_admin},
    models::Donation,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
    validation::FieldValidator,
};

/// Largest amount that fits `NUMERIC(12, 2)`.
fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999_99, 2)
}

/// Validate a donation payload into a shelter id and a positive amount.
pub fn validate_donation(payload: &CreateDonationRequest) -> AppResult<(Uuid, Decimal)> {
    let shelter_id = payload
        .shelter_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (Some(shelter_id), Some(amount)) = (shelter_id, payload.amount) else {
        return Err(AppError::BadRequest(
            "Shelter ID and amount are required.".into(),
        ));
    };

    let shelter_id = Uuid::parse_str(shelter_id)
        .map_err(|_| AppError::BadRequest("Invalid shelter ID.".into()))?;

    let mut validator = FieldValidator::new();
    if amount <= Decimal::ZERO {
        validator.add("amount", "Amount must be greater than 0.");
    } else if amount.round_dp(2) != amount {
        validator.add("amount", "Amount may have at most 2 decimal places.");
    } else if amount > max_amount() {
        validator.add("amount", "Amount is too large.");
    }
    validator.finish()?;

    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    Ok((shelter_id, amount))
}

pub async fn create_donation(
    state: &AppState,
    user: &AuthUser,
    payload: CreateDonationRequest,
) -> AppResult<ApiResponse<Donation>> {
    let (shelter_id, amount) = validate_donation(&payload)?;

    let shelter = Shelters::find_by_id(shelter_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Shelter"))?;

    let donation = DonationActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        shelter_id: Set(shelter.id),
        amount: Set(amount),
        donation_date: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        donation_id = %donation.id,
        shelter_id = %shelter.id,
        amount = %donation.amount,
        "donation recorded"
    );

    Ok(ApiResponse::success(
        "Donation recorded",
        donation.into(),
        Some(Meta::empty()),
    ))
}

pub async fn get_donation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Donation>> {
    let donation = Donations::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Donation"))?;
    ensure_owner_or_admin(user, donation.user_id)?;

    Ok(ApiResponse::success("OK", donation.into(), Some(Meta::empty())))
}

pub async fn list_donations(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<DonationList>> {
    let (page, limit, offset) = pagination.normalize();

    let finder = Donations::find()
        .filter(DonationCol::UserId.eq(user.user_id))
        .order_by_desc(DonationCol::DonationDate)
        .order_by_asc(DonationCol::Id);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Donation::from)
        .collect();

    Ok(ApiResponse::paged("OK", DonationList { items }, page, limit, total))
}
