use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::AdoptionStatus,
    models::AdoptionApplication,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateApplicationRequest {
    pub pet_id: Uuid,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateApplicationStatusRequest {
    /// One of `Pending`, `Approved`, `Rejected`.
    #[serde(alias = "status")]
    pub application_status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationStatusUpdate {
    pub application: AdoptionApplication,
    pub pet_id: Uuid,
    pub pet_adoption_status: AdoptionStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ApplicationList {
    #[schema(value_type = Vec<AdoptionApplication>)]
    pub items: Vec<AdoptionApplication>,
}
