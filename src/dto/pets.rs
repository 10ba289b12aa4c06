use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Pet;

/// Enum-valued fields arrive as strings so that bad choices produce field errors.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePetRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub shelter_id: Option<Uuid>,
    pub pet_type: Option<String>,
    pub adoption_status: Option<String>,
    pub domesticated: Option<bool>,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub shelter_id: Option<Uuid>,
    pub pet_type: Option<String>,
    pub adoption_status: Option<String>,
    pub domesticated: Option<bool>,
    pub image: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct PetList {
    #[schema(value_type = Vec<Pet>)]
    pub items: Vec<Pet>,
}
