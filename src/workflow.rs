//! Adoption-application status rules.
//!
//! An application starts out `Pending`. Admins move it to `Approved` or
//! `Rejected`, and every decision is mirrored onto the pet:
//!
//! | application | pet         |
//! |-------------|-------------|
//! | `Approved`  | `Adopted`   |
//! | `Rejected`  | `Available` |
//! | `Pending`   | unchanged   |
//!
//! Nothing here touches the database; the transactional side lives in
//! [`crate::services::application_service`].

use crate::{
    entity::{AdoptionStatus, ApplicationStatus},
    error::AppResult,
    validation::{field_error, parse_choice},
};

/// Status a pet takes on once an application for it has been submitted.
pub const PET_STATUS_ON_SUBMISSION: AdoptionStatus = AdoptionStatus::Pending;

/// Parse a requested application status. Matching is exact and case-sensitive.
pub fn parse_application_status(raw: &str) -> AppResult<ApplicationStatus> {
    parse_choice("application_status", raw)
}

/// The pet status implied by an application decision, or `None` when the pet is left alone.
pub fn pet_status_after(decision: ApplicationStatus) -> Option<AdoptionStatus> {
    match decision {
        ApplicationStatus::Approved => Some(AdoptionStatus::Adopted),
        ApplicationStatus::Rejected => Some(AdoptionStatus::Available),
        ApplicationStatus::Pending => None,
    }
}

/// New applications may only target pets that are still available.
pub fn ensure_pet_available(status: AdoptionStatus) -> AppResult<()> {
    if status == AdoptionStatus::Available {
        Ok(())
    } else {
        Err(field_error(
            "pet_id",
            "This pet is not available for adoption.",
        ))
    }
}
