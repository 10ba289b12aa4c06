use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Donation;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDonationRequest {
    /// Kept as a string so a malformed id is reported as a validation error.
    pub shelter_id: Option<String>,
    #[schema(value_type = Option<String>, example = "25.00")]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DonationList {
    #[schema(value_type = Vec<Donation>)]
    pub items: Vec<Donation>,
}
