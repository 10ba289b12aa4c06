use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::favourites::{FavouriteAdded, FavouriteList},
    entity::{
        Favourites, Pets,
        favourites::{ActiveModel as FavouriteActive, Column as FavouriteCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Favourite,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
};
use crate::state::AppState;

pub async fn list_favourites(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<FavouriteList>> {
    let (page, limit, offset) = pagination.normalize();

    let finder = Favourites::find()
        .filter(FavouriteCol::UserId.eq(user.user_id))
        .order_by_desc(FavouriteCol::CreatedAt)
        .order_by_asc(FavouriteCol::Id);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .find_also_related(Pets)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|(favourite, pet)| pet.map(|pet| Favourite::new(favourite, pet)))
        .collect();

    Ok(ApiResponse::paged("OK", FavouriteList { items }, page, limit, total))
}

/// Create-if-absent. `created` tells the caller whether a new row was written.
pub async fn add_favourite(
    state: &AppState,
    user: &AuthUser,
    pet_id: Uuid,
) -> AppResult<ApiResponse<FavouriteAdded>> {
    let pet = Pets::find_by_id(pet_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Pet"))?;

    let inserted = Favourites::insert(FavouriteActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        pet_id: Set(pet.id),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::columns([FavouriteCol::UserId, FavouriteCol::PetId])
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(&state.orm)
    .await?;

    let favourite = Favourites::find()
        .filter(
            Condition::all()
                .add(FavouriteCol::UserId.eq(user.user_id))
                .add(FavouriteCol::PetId.eq(pet.id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Favourite"))?;

    let created = inserted > 0;
    if created {
        tracing::info!(user_id = %user.user_id, pet_id = %pet.id, "favourite added");
    }

    let message = if created {
        "Pet added to favourites"
    } else {
        "Pet already in favourites"
    };

    Ok(ApiResponse::success(
        message,
        FavouriteAdded {
            created,
            favourite: Favourite::new(favourite, pet),
        },
        Some(Meta::empty()),
    ))
}

pub async fn remove_favourite(state: &AppState, user: &AuthUser, pet_id: Uuid) -> AppResult<()> {
    let result = Favourites::delete_many()
        .filter(
            Condition::all()
                .add(FavouriteCol::UserId.eq(user.user_id))
                .add(FavouriteCol::PetId.eq(pet_id)),
        )
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Favourite"));
    }

    tracing::info!(user_id = %user.user_id, pet_id = %pet_id, "favourite removed");
    Ok(())
}
