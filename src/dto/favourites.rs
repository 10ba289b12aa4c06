use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Favourite;

#[derive(Debug, Serialize, ToSchema)]
pub struct FavouriteAdded {
    /// `false` when the pet was already a favourite.
    pub created: bool,
    pub favourite: Favourite,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FavouriteList {
    #[schema(value_type = Vec<Favourite>)]
    pub items: Vec<Favourite>,
}
