use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Shelter;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShelterRequest {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub website_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateShelterRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ShelterList {
    #[schema(value_type = Vec<Shelter>)]
    pub items: Vec<Shelter>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShelterManagementRequest {
    pub shelter_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateShelterManagementRequest {
    pub shelter_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
